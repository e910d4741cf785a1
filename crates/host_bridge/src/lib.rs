//! Adapter between a scripting host and the calendar engine.
//!
//! The host speaks in property names, JSON values and numbered events; this
//! crate validates that surface and maps it onto [`calendar_core::Calendar`].

pub mod config;
pub mod control;
pub mod events;
pub mod properties;
pub mod settings;

pub use config::ControlConfig;
pub use control::CalendarControl;
pub use events::{ChannelHost, EventDispatcher, HostChannel, HostMessage};
pub use properties::CalendarProperty;
pub use settings::{load_settings, Settings};
