//! Command bar service
//!
//! Text input plus a static suggestion dropdown. Typed phrases are matched
//! against the fixed accepted set; the dropdown closes on blur only after a
//! short grace period so a click on a suggestion can land first.

use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::debug;
use uuid::Uuid;

use crate::models::command::{default_suggestions, match_phrase, Suggestion};
use crate::models::shortcut::ShellAction;

/// Configuration for command bar behavior
#[derive(Debug, Clone)]
pub struct CommandBarConfig {
    /// Delay between blur and the dropdown actually closing
    pub blur_grace: Duration,
}

impl Default for CommandBarConfig {
    fn default() -> Self {
        CommandBarConfig {
            blur_grace: Duration::from_millis(200),
        }
    }
}

/// Metrics for command bar operations
#[derive(Debug, Default, Clone)]
pub struct CommandBarMetrics {
    pub submissions: u64,
    pub matched_commands: u64,
    pub suggestion_selections: u64,
}

#[derive(Debug, Default)]
struct InputState {
    text: String,
    dropdown_open: bool,
}

/// The command-style text input and its dropdown
pub struct CommandBar {
    state: Arc<RwLock<InputState>>,
    suggestions: Vec<Suggestion>,
    metrics: Arc<RwLock<CommandBarMetrics>>,
    config: CommandBarConfig,
    blur_timer: Mutex<Option<JoinHandle<()>>>,
}

impl CommandBar {
    pub fn new(config: CommandBarConfig) -> Self {
        Self::with_suggestions(config, default_suggestions())
    }

    pub fn with_suggestions(config: CommandBarConfig, suggestions: Vec<Suggestion>) -> Self {
        CommandBar {
            state: Arc::new(RwLock::new(InputState::default())),
            suggestions,
            metrics: Arc::new(RwLock::new(CommandBarMetrics::default())),
            config,
            blur_timer: Mutex::new(None),
        }
    }

    /// Focus the input: opens the dropdown and cancels a pending blur close
    pub async fn focus(&self) {
        self.cancel_blur_timer();
        self.state.write().await.dropdown_open = true;
    }

    /// Replace the input text. Typing keeps the dropdown open.
    pub async fn set_text(&self, text: &str) {
        let mut state = self.state.write().await;
        state.text = text.to_string();
        state.dropdown_open = true;
    }

    /// Current input text
    pub async fn text(&self) -> String {
        self.state.read().await.text.clone()
    }

    /// Whether the dropdown is currently visible
    pub async fn dropdown_open(&self) -> bool {
        self.state.read().await.dropdown_open
    }

    /// The static dropdown entries
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Submit the typed text. A recognized phrase clears the input and
    /// returns its action exactly once; anything else leaves the text as
    /// typed and returns nothing.
    pub async fn submit(&self) -> Option<ShellAction> {
        self.metrics.write().await.submissions += 1;

        let mut state = self.state.write().await;
        match match_phrase(&state.text) {
            Some(action) => {
                state.text.clear();
                drop(state);
                self.metrics.write().await.matched_commands += 1;
                debug!(?action, "Command phrase recognized");
                Some(action)
            }
            None => None,
        }
    }

    /// Select a dropdown entry by id: clears the input, closes the dropdown
    /// immediately, and returns the bound action.
    pub async fn select_suggestion(&self, id: Uuid) -> Option<ShellAction> {
        let action = self
            .suggestions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.action)?;

        self.cancel_blur_timer();
        let mut state = self.state.write().await;
        state.text.clear();
        state.dropdown_open = false;
        drop(state);

        self.metrics.write().await.suggestion_selections += 1;
        debug!(?action, "Suggestion selected");
        Some(action)
    }

    /// Blur the input: the dropdown closes after the grace period unless the
    /// input is refocused or a suggestion is clicked first.
    pub fn blur(&self) {
        let state = self.state.clone();
        let grace = self.config.blur_grace;

        let handle = tokio::spawn(async move {
            sleep(grace).await;
            state.write().await.dropdown_open = false;
        });

        if let Ok(mut timer) = self.blur_timer.lock() {
            if let Some(previous) = timer.replace(handle) {
                previous.abort();
            }
        }
    }

    /// Retrieve current metrics
    pub async fn metrics(&self) -> CommandBarMetrics {
        self.metrics.read().await.clone()
    }

    fn cancel_blur_timer(&self) {
        if let Ok(mut timer) = self.blur_timer.lock() {
            if let Some(handle) = timer.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for CommandBar {
    fn drop(&mut self) {
        self.cancel_blur_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_bar() -> CommandBar {
        CommandBar::new(CommandBarConfig {
            blur_grace: Duration::from_millis(20),
        })
    }

    #[tokio::test]
    async fn recognized_phrase_submits_once_and_clears() {
        let bar = fast_bar();
        bar.set_text("  Play Music ").await;

        assert_eq!(bar.submit().await, Some(ShellAction::ToggleMusic));
        assert_eq!(bar.text().await, "");

        // The cleared input no longer matches.
        assert_eq!(bar.submit().await, None);
    }

    #[tokio::test]
    async fn unrecognized_phrase_is_left_as_typed() {
        let bar = fast_bar();
        bar.set_text("play all the music").await;

        assert_eq!(bar.submit().await, None);
        assert_eq!(bar.text().await, "play all the music");
    }

    #[tokio::test]
    async fn blur_closes_dropdown_after_grace() {
        let bar = fast_bar();
        bar.focus().await;
        assert!(bar.dropdown_open().await);

        bar.blur();
        assert!(bar.dropdown_open().await, "still open inside the grace window");

        sleep(Duration::from_millis(60)).await;
        assert!(!bar.dropdown_open().await);
    }

    #[tokio::test]
    async fn refocus_cancels_pending_blur() {
        let bar = fast_bar();
        bar.focus().await;
        bar.blur();
        bar.focus().await;

        sleep(Duration::from_millis(60)).await;
        assert!(bar.dropdown_open().await);
    }

    #[tokio::test]
    async fn suggestion_click_beats_the_blur_timer() {
        let bar = fast_bar();
        bar.set_text("pla").await;
        bar.blur();

        let id = bar.suggestions()[0].id;
        let action = bar.select_suggestion(id).await;
        assert_eq!(action, Some(ShellAction::ToggleMusic));
        assert_eq!(bar.text().await, "");
        assert!(!bar.dropdown_open().await);

        sleep(Duration::from_millis(60)).await;
        let metrics = bar.metrics().await;
        assert_eq!(metrics.suggestion_selections, 1);
    }

    #[tokio::test]
    async fn unknown_suggestion_id_is_ignored() {
        let bar = fast_bar();
        bar.set_text("hello").await;

        assert_eq!(bar.select_suggestion(Uuid::new_v4()).await, None);
        assert_eq!(bar.text().await, "hello");
    }
}
