//! Controller layer: host event formatting for the event log.

pub mod events;
