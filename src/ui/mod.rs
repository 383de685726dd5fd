//! Presentational views for the HomeShell dashboard
//!
//! These render shell state into display lines. They hold no state of their
//! own and never mutate the coordinator; visibility is driven entirely by the
//! flags passed in.

pub mod shortcut_grid;
pub mod status_bar;
pub mod weather_panel;

pub use shortcut_grid::*;
pub use status_bar::*;
pub use weather_panel::*;
