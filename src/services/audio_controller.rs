//! Background-music controller
//!
//! Mediates play/pause intent to an externally embedded media surface over a
//! one-way, fire-and-forget command channel. The surface loads its media
//! source lazily the first time playback is requested; commands are JSON
//! string payloads posted with a wildcard target origin. An unready surface is
//! not an error, only an unready capability.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

/// Target origin used for every posted command
pub const WILDCARD_ORIGIN: &str = "*";

/// One-way command channel into the embedded player
#[cfg_attr(test, mockall::automock)]
pub trait MediaChannel: Send + Sync {
    /// Post a raw payload. Fire-and-forget; there is no acknowledgment path.
    fn post(&self, payload: &str, target_origin: &str);
}

/// Embedded surface that hands out a channel once its content is ready
#[cfg_attr(test, mockall::automock)]
pub trait MediaSurface: Send + Sync {
    /// Begin loading the media source. Idempotent; invoked lazily on the
    /// first playback request. The surface holds an inert placeholder until
    /// then.
    fn load(&self, media_id: &str);

    /// The command channel, if the surface has finished initializing
    fn channel(&self) -> Option<Arc<dyn MediaChannel>>;
}

/// The two commands the surface understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCommand {
    Play,
    Pause,
}

impl MediaCommand {
    /// Exact wire payload for this command
    pub const fn payload(&self) -> &'static str {
        match self {
            MediaCommand::Play => r#"{"event":"command","func":"playVideo","args":""}"#,
            MediaCommand::Pause => r#"{"event":"command","func":"pauseVideo","args":""}"#,
        }
    }
}

/// Logical playback state
#[derive(Clone, Default)]
pub struct PlaybackState {
    /// Whether the user intends music to be playing
    pub is_playing: bool,
    /// Channel to the surface; present only after the surface signaled ready
    pub channel: Option<Arc<dyn MediaChannel>>,
}

/// Configuration for audio controller behavior
#[derive(Debug, Clone)]
pub struct AudioControllerConfig {
    /// Wait inserted before the first channel acquisition attempt, allowing
    /// the embedded surface to finish initializing
    pub settle_delay: Duration,
    /// Fixed identifier of the media source loaded on first playback
    pub media_source_id: String,
}

impl Default for AudioControllerConfig {
    fn default() -> Self {
        AudioControllerConfig {
            settle_delay: Duration::from_millis(1000),
            media_source_id: "jfKfPfyJRdk".to_string(),
        }
    }
}

/// Metrics for audio controller operations
#[derive(Debug, Default, Clone)]
pub struct AudioControllerMetrics {
    pub toggles: u64,
    pub commands_posted: u64,
    pub acquire_attempts: u64,
}

/// Owns the "now playing" toggle and the channel to the embedded surface
pub struct AudioController {
    surface: Arc<dyn MediaSurface>,
    state: Arc<RwLock<PlaybackState>>,
    metrics: Arc<RwLock<AudioControllerMetrics>>,
    config: AudioControllerConfig,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl AudioController {
    pub fn new(surface: Arc<dyn MediaSurface>, config: AudioControllerConfig) -> Self {
        AudioController {
            surface,
            state: Arc::new(RwLock::new(PlaybackState::default())),
            metrics: Arc::new(RwLock::new(AudioControllerMetrics::default())),
            config,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Toggle playback. With an acquired channel this posts play or pause and
    /// flips the state; without one it records intent-to-play, lazily loads
    /// the media source, and schedules channel acquisition after the settle
    /// delay. Returns the resulting `is_playing`.
    ///
    /// A second toggle arriving before acquisition completes takes the
    /// acquire path again; the duplicate start intent is accepted behavior.
    pub async fn toggle_playback(&self) -> bool {
        self.metrics.write().await.toggles += 1;

        let mut state = self.state.write().await;
        if let Some(channel) = state.channel.clone() {
            let command = if state.is_playing {
                MediaCommand::Pause
            } else {
                MediaCommand::Play
            };
            channel.post(command.payload(), WILDCARD_ORIGIN);
            state.is_playing = !state.is_playing;
            let playing = state.is_playing;
            drop(state);

            self.metrics.write().await.commands_posted += 1;
            debug!(?command, playing, "Posted media command");
            playing
        } else {
            state.is_playing = true;
            drop(state);

            self.surface.load(&self.config.media_source_id);
            self.spawn_acquisition();
            debug!("Playback requested before surface ready; acquiring channel");
            true
        }
    }

    /// Schedule one channel acquisition attempt after the settle delay
    fn spawn_acquisition(&self) {
        let surface = self.surface.clone();
        let state = self.state.clone();
        let metrics = self.metrics.clone();
        let delay = self.config.settle_delay;

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            metrics.write().await.acquire_attempts += 1;

            match surface.channel() {
                Some(channel) => {
                    state.write().await.channel = Some(channel);
                    debug!("Media channel acquired");
                }
                None => {
                    // Unready capability, not an error; the next toggle
                    // falls back to acquire semantics.
                    warn!("Media surface not ready after settle delay");
                }
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
    }

    /// Whether the user currently intends music to be playing
    pub async fn is_playing(&self) -> bool {
        self.state.read().await.is_playing
    }

    /// Whether the command channel has been acquired
    pub async fn has_channel(&self) -> bool {
        self.state.read().await.channel.is_some()
    }

    /// Retrieve current metrics
    pub async fn metrics(&self) -> AudioControllerMetrics {
        self.metrics.read().await.clone()
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        if let Ok(pending) = self.pending.lock() {
            for handle in pending.iter() {
                handle.abort();
            }
        }
    }
}

/// Default surface implementation: a hidden embedded player that becomes
/// ready once `load` has been called, with a channel that traces payloads
struct TracingChannel;

impl MediaChannel for TracingChannel {
    fn post(&self, payload: &str, target_origin: &str) {
        debug!(payload, target_origin, "Media command forwarded to embed");
    }
}

/// Hidden embedded player used by the running shell. Starts as an inert
/// placeholder; `load` flips it ready.
#[derive(Default)]
pub struct EmbeddedPlayerSurface {
    loaded: AtomicBool,
}

impl EmbeddedPlayerSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaSurface for EmbeddedPlayerSurface {
    fn load(&self, media_id: &str) {
        if !self.loaded.swap(true, Ordering::SeqCst) {
            debug!(media_id, "Embedded player loading media source");
        }
    }

    fn channel(&self) -> Option<Arc<dyn MediaChannel>> {
        if self.loaded.load(Ordering::SeqCst) {
            Some(Arc::new(TracingChannel))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingChannel {
        posts: Mutex<Vec<(String, String)>>,
    }

    impl MediaChannel for RecordingChannel {
        fn post(&self, payload: &str, target_origin: &str) {
            if let Ok(mut posts) = self.posts.lock() {
                posts.push((payload.to_string(), target_origin.to_string()));
            }
        }
    }

    struct ReadySurface {
        channel: Arc<RecordingChannel>,
    }

    impl MediaSurface for ReadySurface {
        fn load(&self, _media_id: &str) {}
        fn channel(&self) -> Option<Arc<dyn MediaChannel>> {
            Some(self.channel.clone())
        }
    }

    struct NeverReadySurface;

    impl MediaSurface for NeverReadySurface {
        fn load(&self, _media_id: &str) {}
        fn channel(&self) -> Option<Arc<dyn MediaChannel>> {
            None
        }
    }

    fn fast_config() -> AudioControllerConfig {
        AudioControllerConfig {
            settle_delay: Duration::from_millis(10),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn first_toggle_marks_intent_then_acquires() {
        let channel = Arc::new(RecordingChannel::default());
        let surface = Arc::new(ReadySurface {
            channel: channel.clone(),
        });
        let controller = AudioController::new(surface, fast_config());

        assert!(controller.toggle_playback().await);
        assert!(controller.is_playing().await);
        assert!(!controller.has_channel().await);

        sleep(Duration::from_millis(50)).await;
        assert!(controller.has_channel().await);
        // Acquisition alone posts nothing; the embed autoplays on load.
        assert!(channel.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggles_with_channel_post_pause_then_play() {
        let channel = Arc::new(RecordingChannel::default());
        let surface = Arc::new(ReadySurface {
            channel: channel.clone(),
        });
        let controller = AudioController::new(surface, fast_config());

        controller.toggle_playback().await;
        sleep(Duration::from_millis(50)).await;

        assert!(!controller.toggle_playback().await);
        assert!(controller.toggle_playback().await);

        let posts = channel.posts.lock().unwrap();
        let payloads: Vec<&str> = posts.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            payloads,
            [MediaCommand::Pause.payload(), MediaCommand::Play.payload()]
        );
        assert!(posts.iter().all(|(_, origin)| origin == WILDCARD_ORIGIN));
    }

    #[tokio::test]
    async fn unready_surface_falls_back_to_acquire_semantics() {
        let controller = AudioController::new(Arc::new(NeverReadySurface), fast_config());

        controller.toggle_playback().await;
        sleep(Duration::from_millis(50)).await;
        assert!(!controller.has_channel().await);
        assert!(controller.is_playing().await);

        // Still no channel; the toggle silently re-enters acquisition.
        controller.toggle_playback().await;
        assert!(controller.is_playing().await);
        let metrics = controller.metrics().await;
        assert_eq!(metrics.commands_posted, 0);
        assert_eq!(metrics.toggles, 2);
    }

    #[tokio::test]
    async fn wire_payloads_are_exact() {
        assert_eq!(
            MediaCommand::Play.payload(),
            r#"{"event":"command","func":"playVideo","args":""}"#
        );
        assert_eq!(
            MediaCommand::Pause.payload(),
            r#"{"event":"command","func":"pauseVideo","args":""}"#
        );
    }

    #[tokio::test]
    async fn mocked_surface_load_is_lazy() {
        let mut surface = MockMediaSurface::new();
        surface.expect_load().times(1).return_const(());
        surface.expect_channel().returning(|| None);

        let controller = AudioController::new(Arc::new(surface), fast_config());
        controller.toggle_playback().await;
    }
}
