//! HomeShell - Desktop-Style Personal Dashboard Shell
//!
//! HomeShell composes a clock, a command bar with static suggestions, a grid of
//! shortcut tiles, a hidden background-music controller, and scripted overlays
//! into a single coordinator that owns all shared UI state.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;

pub use models::*;
pub use services::*;

/// Result type alias for HomeShell operations
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to HomeShell operations
#[derive(thiserror::Error, Debug)]
pub enum HomeShellError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Shortcut tile not found: {0}")]
    TileNotFound(uuid::Uuid),
}
