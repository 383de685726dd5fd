//! Data models for the HomeShell dashboard

pub mod caption;
pub mod command;
pub mod shortcut;
pub mod weather;

pub use caption::*;
pub use command::*;
pub use shortcut::*;
pub use weather::*;
