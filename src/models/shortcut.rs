//! Shortcut tile model for the HomeShell dashboard
//!
//! Represents the static grid of clickable cards, each optionally bound to a
//! shell action

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{HomeShellError, Result};

/// Actions a tile, command, or suggestion can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellAction {
    /// Toggle the background-music player
    ToggleMusic,
    /// Slide up the weather panel
    ShowWeather,
    /// Start the scripted website-building overlay
    BuildWebsite,
}

/// A clickable card on the dashboard grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcutTile {
    /// Unique identifier
    pub id: Uuid,

    /// Emoji glyph shown on the card
    pub icon: String,

    /// Card title
    pub title: String,

    /// Short supporting line under the title
    pub desc: String,

    /// Bound shell action; inert tile when absent
    pub action: Option<ShellAction>,
}

impl ShortcutTile {
    /// Create a tile bound to an action
    pub fn bound(icon: &str, title: &str, desc: &str, action: ShellAction) -> Result<Self> {
        Self::build(icon, title, desc, Some(action))
    }

    /// Create an inert tile with no bound action
    pub fn inert(icon: &str, title: &str, desc: &str) -> Result<Self> {
        Self::build(icon, title, desc, None)
    }

    fn build(icon: &str, title: &str, desc: &str, action: Option<ShellAction>) -> Result<Self> {
        if title.is_empty() {
            return Err(
                HomeShellError::ValidationError("Tile title cannot be empty".to_string()).into(),
            );
        }

        Ok(ShortcutTile {
            id: Uuid::new_v4(),
            icon: icon.to_string(),
            title: title.to_string(),
            desc: desc.to_string(),
            action,
        })
    }

    /// Whether clicking this tile does anything
    pub fn is_interactive(&self) -> bool {
        self.action.is_some()
    }
}

/// The default dashboard grid
pub fn default_tiles() -> Vec<ShortcutTile> {
    let tile = |icon: &str, title: &str, desc: &str, action: Option<ShellAction>| ShortcutTile {
        id: Uuid::new_v4(),
        icon: icon.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
        action,
    };

    vec![
        tile("📝", "Start New Note", "Quickly write down your thoughts", None),
        tile(
            "🎵",
            "Play Relaxing Music",
            "Set the mood while working",
            Some(ShellAction::ToggleMusic),
        ),
        tile("📂", "Open Recent Files", "Resume your latest work", None),
        tile(
            "🌤️",
            "Show Weather",
            "Check today's forecast",
            Some(ShellAction::ShowWeather),
        ),
        tile("🖼️", "Start Drawing", "Open canvas to sketch", None),
        tile("📧", "Check Emails", "Review your inbox", None),
        tile(
            "🛠️",
            "Build a Website",
            "Watch your site come together",
            Some(ShellAction::BuildWebsite),
        ),
    ]
}
