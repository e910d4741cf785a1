use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{DateKey, StateDefinition};

use crate::config::ControlConfig;

pub const DEFAULT_SETTINGS_FILE: &str = "calendar.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub states: Vec<StateDefinition>,
    pub states_file: Option<PathBuf>,
    pub date_states: Vec<DateStateSetting>,
    pub hilite_today: bool,
    pub hilite_selected: bool,
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateStateSetting {
    pub date: DateKey,
    #[serde(default)]
    pub state: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            states_file: None,
            date_states: Vec::new(),
            hilite_today: true,
            hilite_selected: true,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    #[serde(default)]
    states: Vec<StateDefinition>,
    states_file: Option<PathBuf>,
    #[serde(default)]
    date_states: Vec<DateStateSetting>,
    hilite_today: Option<bool>,
    hilite_selected: Option<bool>,
    log_filter: Option<String>,
}

/// Defaults, then the settings file at `path` (usually `calendar.toml`),
/// then the process environment.
pub fn load_settings(path: &Path) -> Settings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    %err,
                    "settings: ignoring unreadable settings file"
                );
            }
        }
    }

    if let Some(v) = env_value(&env, "CALENDAR_STATES_FILE", "APP__STATES_FILE") {
        settings.states_file = Some(PathBuf::from(v));
    }
    if let Some(v) = env_value(&env, "CALENDAR_HILITE_TODAY", "APP__HILITE_TODAY") {
        if let Some(flag) = parse_env_flag(&v) {
            settings.hilite_today = flag;
        }
    }
    if let Some(v) = env_value(&env, "CALENDAR_HILITE_SELECTED", "APP__HILITE_SELECTED") {
        if let Some(flag) = parse_env_flag(&v) {
            settings.hilite_selected = flag;
        }
    }
    if let Some(v) = env_value(&env, "RUST_LOG", "APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    settings.states = file_cfg.states;
    settings.states_file = file_cfg.states_file;
    settings.date_states = file_cfg.date_states;
    if let Some(v) = file_cfg.hilite_today {
        settings.hilite_today = v;
    }
    if let Some(v) = file_cfg.hilite_selected {
        settings.hilite_selected = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

// The APP__ alias wins when both are set.
fn env_value(env: &impl Fn(&str) -> Option<String>, primary: &str, alias: &str) -> Option<String> {
    env(alias).or_else(|| env(primary))
}

fn parse_env_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Inline states followed by the ones from `states_file`, if any.
    pub fn resolve_states(&self) -> anyhow::Result<Vec<StateDefinition>> {
        let mut states = self.states.clone();
        if let Some(path) = &self.states_file {
            states.extend(load_states_file(path)?);
        }
        Ok(states)
    }

    pub fn control_config(&self) -> anyhow::Result<ControlConfig> {
        Ok(ControlConfig {
            states: self.resolve_states()?,
            hilite_today: self.hilite_today,
            hilite_selected: self.hilite_selected,
        })
    }
}

/// A JSON array of state definitions.
pub fn load_states_file(path: &Path) -> anyhow::Result<Vec<StateDefinition>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read states file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse states file '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
