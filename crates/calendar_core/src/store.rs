//! Registry of named day states plus the sparse per-date overlay.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::domain::{DateKey, DateStateEntry, StateDefinition};

#[derive(Debug, Clone, Default)]
pub struct StateStore {
    definitions: BTreeMap<String, StateDefinition>,
    overlay: BTreeMap<DateKey, String>,
}

impl StateStore {
    pub fn new(definitions: impl IntoIterator<Item = StateDefinition>) -> Self {
        let mut store = Self::default();
        store.set_definitions(definitions);
        store
    }

    /// Replaces the registry. Later duplicates win. The overlay is left alone:
    /// entries naming a removed state simply stop resolving.
    pub fn set_definitions(&mut self, definitions: impl IntoIterator<Item = StateDefinition>) {
        self.definitions = definitions
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
    }

    /// Stores `state` for `date` when it names a registered state; anything
    /// else (including `None` and `""`) clears the date.
    pub fn set_date_state(&mut self, date: NaiveDate, state: Option<&str>) {
        let key = DateKey::new(date);
        match state.filter(|name| self.is_registered(name)) {
            Some(name) => {
                self.overlay.insert(key, name.to_string());
            }
            None => {
                self.overlay.remove(&key);
            }
        }
    }

    /// Discards the whole overlay, then applies `entries` in order.
    pub fn replace_date_states<'a>(&mut self, entries: impl IntoIterator<Item = &'a DateStateEntry>) {
        self.overlay.clear();
        for entry in entries {
            self.set_date_state(entry.date, Some(entry.state.as_str()));
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        !name.is_empty() && self.definitions.contains_key(name)
    }

    pub fn definition(&self, name: &str) -> Option<&StateDefinition> {
        self.definitions.get(name)
    }

    /// Registered states ordered by name.
    pub fn definitions(&self) -> impl Iterator<Item = &StateDefinition> {
        self.definitions.values()
    }

    /// Raw overlay value, which may name a state no longer registered.
    pub fn state_name(&self, date: NaiveDate) -> Option<&str> {
        self.overlay.get(&DateKey::new(date)).map(String::as_str)
    }

    /// Overlay value resolved against the current registry.
    pub fn resolve(&self, date: NaiveDate) -> Option<&StateDefinition> {
        self.state_name(date).and_then(|name| self.definitions.get(name))
    }

    pub fn overlay(&self) -> &BTreeMap<DateKey, String> {
        &self.overlay
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
