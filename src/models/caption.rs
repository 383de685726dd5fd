//! Thought captions for the website-building overlay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed caption pool the overlay cycles through
pub const THOUGHT_CAPTIONS: [&str; 8] = [
    "Sketching the hero section...",
    "Picking a color palette that feels right...",
    "Writing the navigation markup...",
    "Laying out a responsive grid...",
    "Choosing typography pairings...",
    "Wiring up the contact form...",
    "Polishing hover animations...",
    "Running one last lighthouse pass...",
];

/// A caption currently shown by the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtCaption {
    /// Caption text, always drawn from [`THOUGHT_CAPTIONS`]
    pub text: String,

    /// When the caption is due to be replaced
    pub active_until: DateTime<Utc>,
}

impl ThoughtCaption {
    /// Pick a caption valid for the given display window
    pub fn pick(lifetime: chrono::Duration) -> Self {
        use rand::Rng;

        let mut rng = rand::rng();
        let index = rng.random_range(0..THOUGHT_CAPTIONS.len());

        ThoughtCaption {
            text: THOUGHT_CAPTIONS[index].to_string(),
            active_until: Utc::now() + lifetime,
        }
    }
}
