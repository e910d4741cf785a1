//! UI layer: app shell and calendar palette.

pub mod app;
pub mod theme;

pub use app::CalendarApp;
