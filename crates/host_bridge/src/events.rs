//! Outbound event emission towards the host.

use std::collections::BTreeMap;

use crossbeam_channel::{Sender, TrySendError};
use serde_json::Value;
use shared::protocol::{HostEvent, HostEventKind};

/// The host side of the event channel.
pub trait HostChannel {
    /// Whether the host currently accepts events with this id.
    fn can_send_event(&self, _id: u32) -> bool {
        true
    }

    fn send_event(&mut self, name: &str, params: Vec<(&'static str, Value)>);
}

/// An event as delivered to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct HostMessage {
    pub name: String,
    pub params: Vec<(&'static str, Value)>,
}

/// Forwards events into a crossbeam channel, e.g. towards a UI thread.
pub struct ChannelHost {
    tx: Sender<HostMessage>,
    disabled: Vec<u32>,
}

impl ChannelHost {
    pub fn new(tx: Sender<HostMessage>) -> Self {
        Self {
            tx,
            disabled: Vec::new(),
        }
    }

    pub fn disable_event(&mut self, kind: HostEventKind) {
        self.disabled.push(kind.id());
    }
}

impl HostChannel for ChannelHost {
    fn can_send_event(&self, id: u32) -> bool {
        !self.disabled.contains(&id)
    }

    fn send_event(&mut self, name: &str, params: Vec<(&'static str, Value)>) {
        let message = HostMessage {
            name: name.to_string(),
            params,
        };
        match self.tx.try_send(message) {
            Ok(()) => tracing::debug!(event = name, "bridge: queued host event"),
            Err(TrySendError::Full(_)) => {
                tracing::warn!(event = name, "bridge: host event queue is full; dropping event")
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!(event = name, "bridge: host event receiver disconnected")
            }
        }
    }
}

/// Registry of the events this control declares to the host.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    registered: BTreeMap<u32, HostEventKind>,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(HostEventKind::ALL)
    }
}

impl EventDispatcher {
    pub fn new(kinds: impl IntoIterator<Item = HostEventKind>) -> Self {
        Self {
            registered: kinds.into_iter().map(|kind| (kind.id(), kind)).collect(),
        }
    }

    /// Sends `event` if it is registered and the host accepts it. Returns
    /// whether it was sent.
    pub fn trigger<H: HostChannel + ?Sized>(&self, host: &mut H, event: &HostEvent) -> bool {
        let Some(kind) = self.registered.get(&event.kind().id()) else {
            return false;
        };
        if !host.can_send_event(kind.id()) {
            return false;
        }
        host.send_event(kind.name(), event.params());
        true
    }
}
