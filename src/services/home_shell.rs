//! Top-level dashboard coordinator
//!
//! Holds all shared UI state and wires the leaf services together. Children
//! never message each other; every tile click, command submission, and
//! suggestion selection routes through here to exactly one state mutation.
//! Registered listeners observe state changes read-only.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::shortcut::{default_tiles, ShellAction, ShortcutTile};
use crate::models::weather::WeatherReport;
use crate::services::audio_controller::AudioController;
use crate::services::building_overlay::BuildingOverlay;
use crate::services::clock::ClockService;
use crate::services::command_bar::CommandBar;
use crate::{HomeShellError, Result};

type ShellEventListener = Box<dyn Fn(ShellEvent) + Send + Sync>;

/// Events emitted when shell state changes
#[derive(Debug, Clone)]
pub enum ShellEvent {
    WeatherOpened,
    WeatherClosed,
    BuildingOpened,
    BuildingClosed,
    PlaybackToggled { is_playing: bool },
    CommandMatched { action: ShellAction },
    SuggestionSelected { action: ShellAction },
    TileClicked { tile_id: Uuid },
}

/// Configuration for the shell coordinator
#[derive(Debug, Clone)]
pub struct HomeShellConfig {
    /// Name shown in the header greeting
    pub greeting_name: String,
}

impl Default for HomeShellConfig {
    fn default() -> Self {
        HomeShellConfig {
            greeting_name: "Mark".to_string(),
        }
    }
}

/// The single-writer state store coordinating every dashboard component
pub struct HomeShell {
    config: HomeShellConfig,
    weather_open: Arc<RwLock<bool>>,
    weather: WeatherReport,
    tiles: Vec<ShortcutTile>,
    clock: Arc<ClockService>,
    audio: Arc<AudioController>,
    command_bar: Arc<CommandBar>,
    building: Arc<BuildingOverlay>,
    listeners: Arc<Mutex<Vec<ShellEventListener>>>,
}

impl HomeShell {
    pub fn new(
        config: HomeShellConfig,
        clock: Arc<ClockService>,
        audio: Arc<AudioController>,
        command_bar: Arc<CommandBar>,
        building: Arc<BuildingOverlay>,
    ) -> Self {
        HomeShell {
            config,
            weather_open: Arc::new(RwLock::new(false)),
            weather: WeatherReport::preset(),
            tiles: default_tiles(),
            clock,
            audio,
            command_bar,
            building,
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Header greeting text
    pub fn greeting(&self) -> String {
        format!("Hi, {}", self.config.greeting_name)
    }

    /// The shortcut grid
    pub fn tiles(&self) -> &[ShortcutTile] {
        &self.tiles
    }

    /// The hardcoded weather report
    pub fn weather_report(&self) -> &WeatherReport {
        &self.weather
    }

    pub fn clock(&self) -> &Arc<ClockService> {
        &self.clock
    }

    pub fn audio(&self) -> &Arc<AudioController> {
        &self.audio
    }

    pub fn command_bar(&self) -> &Arc<CommandBar> {
        &self.command_bar
    }

    pub fn building_overlay(&self) -> &Arc<BuildingOverlay> {
        &self.building
    }

    /// Route an action to its single state mutation
    pub async fn dispatch(&self, action: ShellAction) {
        match action {
            ShellAction::ToggleMusic => {
                let is_playing = self.audio.toggle_playback().await;
                self.emit_event(ShellEvent::PlaybackToggled { is_playing })
                    .await;
            }
            ShellAction::ShowWeather => self.open_weather().await,
            ShellAction::BuildWebsite => {
                self.building.open().await;
                self.emit_event(ShellEvent::BuildingOpened).await;
            }
        }
    }

    /// Click a tile by id. Inert tiles are a no-op beyond the click event.
    pub async fn click_tile(&self, tile_id: Uuid) -> Result<()> {
        let tile = self
            .tiles
            .iter()
            .find(|t| t.id == tile_id)
            .ok_or(HomeShellError::TileNotFound(tile_id))?;

        debug!(title = %tile.title, "Tile clicked");
        self.emit_event(ShellEvent::TileClicked { tile_id }).await;

        if let Some(action) = tile.action {
            self.dispatch(action).await;
        }
        Ok(())
    }

    /// Submit the command bar text, dispatching on a recognized phrase
    pub async fn submit_command(&self) {
        if let Some(action) = self.command_bar.submit().await {
            self.emit_event(ShellEvent::CommandMatched { action }).await;
            self.dispatch(action).await;
        }
    }

    /// Select a dropdown suggestion, dispatching its bound action
    pub async fn select_suggestion(&self, suggestion_id: Uuid) {
        if let Some(action) = self.command_bar.select_suggestion(suggestion_id).await {
            self.emit_event(ShellEvent::SuggestionSelected { action })
                .await;
            self.dispatch(action).await;
        }
    }

    /// Slide the weather panel up
    pub async fn open_weather(&self) {
        let mut open = self.weather_open.write().await;
        if !*open {
            *open = true;
            drop(open);
            self.emit_event(ShellEvent::WeatherOpened).await;
        }
    }

    /// Close the weather panel (backdrop click or the explicit control)
    pub async fn close_weather(&self) {
        let mut open = self.weather_open.write().await;
        if *open {
            *open = false;
            drop(open);
            self.emit_event(ShellEvent::WeatherClosed).await;
        }
    }

    /// Whether the weather panel is visible
    pub async fn weather_open(&self) -> bool {
        *self.weather_open.read().await
    }

    /// Close the building overlay (backdrop click)
    pub async fn close_building(&self) {
        self.building.close().await;
        self.emit_event(ShellEvent::BuildingClosed).await;
    }

    /// Register a read-only observer
    pub async fn add_event_listener<F>(&self, listener: F)
    where
        F: Fn(ShellEvent) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().await;
        listeners.push(Box::new(listener));
    }

    /// Stop every timer-backed child. Called once on shutdown.
    pub async fn shutdown(&self) {
        self.clock.stop();
        self.building.close().await;
        info!("Shell services stopped");
    }

    async fn emit_event(&self, event: ShellEvent) {
        let listeners = self.listeners.lock().await;
        for listener in listeners.iter() {
            listener(event.clone());
        }
    }
}
