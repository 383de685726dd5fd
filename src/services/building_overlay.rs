//! Scripted website-building overlay
//!
//! A two-state machine: Idle (hidden, no timers) and Active (visible).
//! Activation picks a random thought caption, shows a thinking indicator for
//! a fixed window, and rotates captions on an interval. Every exit path
//! cancels all outstanding timers; no timer from a previous active period may
//! fire after the overlay returns to idle.

use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing::debug;

use crate::models::caption::ThoughtCaption;

/// Configuration for overlay timing
#[derive(Debug, Clone)]
pub struct BuildingOverlayConfig {
    /// How long the thinking indicator stays lit after activation
    pub thinking_window: Duration,
    /// How often the caption is replaced while active
    pub caption_interval: Duration,
}

impl Default for BuildingOverlayConfig {
    fn default() -> Self {
        BuildingOverlayConfig {
            thinking_window: Duration::from_millis(3000),
            caption_interval: Duration::from_millis(7500),
        }
    }
}

/// Metrics for overlay operations
#[derive(Debug, Default, Clone)]
pub struct BuildingOverlayMetrics {
    pub activations: u64,
    pub closes: u64,
    pub caption_changes: u64,
}

/// Overlay state. The timers backing an active period live next to the state
/// and die with it.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildingState {
    Idle,
    Active {
        caption: ThoughtCaption,
        thinking: bool,
    },
}

struct ActiveTimers {
    thinking_clear: JoinHandle<()>,
    caption_cycle: JoinHandle<()>,
}

impl ActiveTimers {
    fn cancel(self) {
        self.thinking_clear.abort();
        self.caption_cycle.abort();
    }
}

/// The scripted "building a website" overlay
pub struct BuildingOverlay {
    state: Arc<RwLock<BuildingState>>,
    metrics: Arc<RwLock<BuildingOverlayMetrics>>,
    timers: Mutex<Option<ActiveTimers>>,
    config: BuildingOverlayConfig,
}

impl BuildingOverlay {
    pub fn new(config: BuildingOverlayConfig) -> Self {
        BuildingOverlay {
            state: Arc::new(RwLock::new(BuildingState::Idle)),
            metrics: Arc::new(RwLock::new(BuildingOverlayMetrics::default())),
            timers: Mutex::new(None),
            config,
        }
    }

    /// Idle → Active. Picks an initial caption immediately, lights the
    /// thinking indicator for the configured window, and starts caption
    /// rotation. A no-op when already active.
    pub async fn open(&self) {
        {
            let mut state = self.state.write().await;
            if matches!(*state, BuildingState::Active { .. }) {
                return;
            }
            *state = BuildingState::Active {
                caption: ThoughtCaption::pick(self.caption_lifetime()),
                thinking: true,
            };
        }
        self.metrics.write().await.activations += 1;
        debug!("Building overlay activated");

        let thinking_clear = {
            let state = self.state.clone();
            let window = self.config.thinking_window;
            tokio::spawn(async move {
                sleep(window).await;
                if let BuildingState::Active { thinking, .. } = &mut *state.write().await {
                    *thinking = false;
                }
            })
        };

        let caption_cycle = {
            let state = self.state.clone();
            let metrics = self.metrics.clone();
            let every = self.config.caption_interval;
            let lifetime = self.caption_lifetime();
            tokio::spawn(async move {
                let mut ticker = interval(every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // The first tick completes immediately; the opening caption
                // already covers it.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    let next = ThoughtCaption::pick(lifetime);
                    if let BuildingState::Active { caption, .. } = &mut *state.write().await {
                        *caption = next;
                        metrics.write().await.caption_changes += 1;
                    }
                }
            })
        };

        if let Ok(mut timers) = self.timers.lock() {
            if let Some(stale) = timers.replace(ActiveTimers {
                thinking_clear,
                caption_cycle,
            }) {
                stale.cancel();
            }
        }
    }

    /// Active → Idle. Cancels all outstanding timers unconditionally and
    /// force-clears the thinking indicator.
    pub async fn close(&self) {
        self.cancel_timers();

        let mut state = self.state.write().await;
        if matches!(*state, BuildingState::Active { .. }) {
            *state = BuildingState::Idle;
            drop(state);
            self.metrics.write().await.closes += 1;
            debug!("Building overlay closed");
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> BuildingState {
        self.state.read().await.clone()
    }

    /// Whether the overlay is visible
    pub async fn is_active(&self) -> bool {
        matches!(*self.state.read().await, BuildingState::Active { .. })
    }

    /// Retrieve current metrics
    pub async fn metrics(&self) -> BuildingOverlayMetrics {
        self.metrics.read().await.clone()
    }

    fn caption_lifetime(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.config.caption_interval)
            .unwrap_or_else(|_| chrono::Duration::zero())
    }

    fn cancel_timers(&self) {
        if let Ok(mut timers) = self.timers.lock() {
            if let Some(active) = timers.take() {
                active.cancel();
            }
        }
    }
}

impl Drop for BuildingOverlay {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::caption::THOUGHT_CAPTIONS;

    fn fast_overlay() -> BuildingOverlay {
        BuildingOverlay::new(BuildingOverlayConfig {
            thinking_window: Duration::from_millis(30),
            caption_interval: Duration::from_millis(50),
        })
    }

    #[tokio::test]
    async fn opening_shows_caption_and_thinking() {
        let overlay = fast_overlay();
        overlay.open().await;

        match overlay.state().await {
            BuildingState::Active { caption, thinking } => {
                assert!(thinking);
                assert!(THOUGHT_CAPTIONS.contains(&caption.text.as_str()));
            }
            BuildingState::Idle => panic!("overlay should be active"),
        }
    }

    #[tokio::test]
    async fn thinking_clears_after_the_window() {
        let overlay = fast_overlay();
        overlay.open().await;

        sleep(Duration::from_millis(100)).await;
        match overlay.state().await {
            BuildingState::Active { thinking, .. } => assert!(!thinking),
            BuildingState::Idle => panic!("overlay should still be active"),
        }
    }

    #[tokio::test]
    async fn captions_rotate_while_active() {
        let overlay = fast_overlay();
        overlay.open().await;

        sleep(Duration::from_millis(180)).await;
        let metrics = overlay.metrics().await;
        assert!(
            metrics.caption_changes >= 1,
            "expected at least one rotation, saw {}",
            metrics.caption_changes
        );
    }

    #[tokio::test]
    async fn closing_before_any_timer_fires_leaves_no_stale_effects() {
        let overlay = fast_overlay();
        overlay.open().await;
        overlay.close().await;

        sleep(Duration::from_millis(200)).await;
        assert_eq!(overlay.state().await, BuildingState::Idle);
        assert_eq!(overlay.metrics().await.caption_changes, 0);
    }

    #[tokio::test]
    async fn reopening_restarts_the_script() {
        let overlay = fast_overlay();
        overlay.open().await;
        overlay.close().await;
        overlay.open().await;

        assert!(overlay.is_active().await);
        let metrics = overlay.metrics().await;
        assert_eq!(metrics.activations, 2);
        assert_eq!(metrics.closes, 1);
    }

    #[tokio::test]
    async fn open_is_idempotent_while_active() {
        let overlay = fast_overlay();
        overlay.open().await;
        overlay.open().await;

        assert_eq!(overlay.metrics().await.activations, 1);
    }
}
