//! Command phrase model for the command bar
//!
//! Matching is exact-set membership over a small enumerated phrase list, not
//! fuzzy search. The accepted set must stay stable; callers normalize input
//! with [`normalize_phrase`] before membership checks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::shortcut::ShellAction;

/// Phrases recognized as the play-music intent
pub const PLAY_MUSIC_PHRASES: [&str; 5] = [
    "play music",
    "play a song",
    "play song",
    "music",
    "play a music",
];

/// Trim surrounding whitespace and lowercase for set membership
pub fn normalize_phrase(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Resolve a typed phrase to its bound action, if recognized
pub fn match_phrase(text: &str) -> Option<ShellAction> {
    let normalized = normalize_phrase(text);
    if PLAY_MUSIC_PHRASES.contains(&normalized.as_str()) {
        Some(ShellAction::ToggleMusic)
    } else {
        None
    }
}

/// A static entry in the command bar dropdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Unique identifier
    pub id: Uuid,

    /// Label shown in the dropdown row
    pub label: String,

    /// Action invoked when the row is clicked
    pub action: ShellAction,
}

impl Suggestion {
    pub fn new(label: &str, action: ShellAction) -> Self {
        Suggestion {
            id: Uuid::new_v4(),
            label: label.to_string(),
            action,
        }
    }
}

/// The static dropdown contents
pub fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new("Play relaxing music", ShellAction::ToggleMusic),
        Suggestion::new("Show the weather", ShellAction::ShowWeather),
        Suggestion::new("Build me a website", ShellAction::BuildWebsite),
    ]
}
