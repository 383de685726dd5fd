//! HomeShell - Desktop-Style Personal Dashboard Shell
//!
//! Main application entry point with initialization, signal handling, and
//! application lifecycle management.

use clap::Parser;
use homeshell::{
    cli::{load_config, run_cli, HomeShellCli},
    config::ShellConfig,
    logging::{init_logging, LogConfig},
    services::{
        audio_controller::{AudioController, AudioControllerConfig, EmbeddedPlayerSurface},
        building_overlay::{BuildingOverlay, BuildingOverlayConfig},
        clock::{ClockConfig, ClockService, TimeStyle},
        command_bar::{CommandBar, CommandBarConfig},
        home_shell::{HomeShell, HomeShellConfig},
    },
    ui::{ShortcutGridView, StatusBar},
    HomeShellError, Result,
};
use std::sync::Arc;
use tokio::{
    signal,
    sync::broadcast,
    time::Duration,
};
use tracing::{debug, error, info, warn, instrument};

/// Application wiring and lifecycle
pub struct HomeShellApp {
    shell: Arc<HomeShell>,
    status_bar: StatusBar,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl HomeShellApp {
    /// Build every service from the shell configuration
    #[instrument(skip_all)]
    pub fn new(config: ShellConfig) -> Result<Self> {
        info!(
            "HomeShell - Desktop-Style Personal Dashboard v{}",
            env!("CARGO_PKG_VERSION")
        );
        info!("Initializing dashboard components...");

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let clock = Arc::new(ClockService::new(ClockConfig {
            tick_interval: Duration::from_millis(config.clock_tick_ms),
            style: TimeStyle::detect(),
        }));

        let surface = Arc::new(EmbeddedPlayerSurface::new());
        let audio = Arc::new(AudioController::new(
            surface,
            AudioControllerConfig {
                settle_delay: Duration::from_millis(config.settle_delay_ms),
                media_source_id: config.media_source_id.clone(),
            },
        ));

        let command_bar = Arc::new(CommandBar::new(CommandBarConfig {
            blur_grace: Duration::from_millis(config.blur_grace_ms),
        }));

        let building = Arc::new(BuildingOverlay::new(BuildingOverlayConfig {
            thinking_window: Duration::from_millis(config.thinking_window_ms),
            caption_interval: Duration::from_millis(config.caption_interval_ms),
        }));

        let shell = Arc::new(HomeShell::new(
            HomeShellConfig {
                greeting_name: config.greeting_name,
            },
            clock,
            audio,
            command_bar,
            building,
        ));

        debug!("All dashboard services initialized");

        Ok(Self {
            shell,
            status_bar: StatusBar::new(),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Run the main application loop
    #[instrument(skip_all)]
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting HomeShell main loop");

        let shutdown_tx = self.shutdown_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = Self::setup_signal_handlers(shutdown_tx).await {
                error!("Failed to setup signal handlers: {}", e);
            }
        });

        self.render_dashboard().await;
        self.shell.clock().start();
        let mut clock_rx = self.shell.clock().subscribe();

        loop {
            tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown signal received");
                    break;
                }

                changed = clock_rx.changed() => {
                    if changed.is_err() {
                        warn!("Clock channel closed");
                        break;
                    }
                    let time = clock_rx.borrow().clone();
                    let is_playing = self.shell.audio().is_playing().await;
                    println!("{}    {}", time, self.status_bar.render(is_playing));
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Print the static dashboard chrome once at startup
    async fn render_dashboard(&self) {
        println!("{}", self.shell.greeting());
        println!();
        for row in ShortcutGridView::rows(self.shell.tiles()) {
            println!("  {row}");
        }
        println!();
    }

    /// Stop every timer-backed service
    #[instrument(skip_all)]
    async fn shutdown(&self) {
        info!("Shutting down HomeShell...");
        self.shell.shutdown().await;
        info!("HomeShell shutdown complete");
    }

    async fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>) -> Result<()> {
        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            tokio::select! {
                res = signal::ctrl_c() => {
                    match res {
                        Ok(_) => info!("Received SIGINT (Ctrl+C)"),
                        Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
                    }
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM");
                }
            }
        }

        #[cfg(not(unix))]
        {
            match signal::ctrl_c().await {
                Ok(_) => info!("Received Ctrl+C"),
                Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
            }
        }

        if shutdown_tx.send(()).is_err() {
            warn!("Failed to send shutdown signal - no receivers");
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = HomeShellCli::parse();

    let log_config = if cli.verbose {
        LogConfig::development()
    } else {
        LogConfig::from_env()
    };
    init_logging(&log_config)
        .map_err(|e| HomeShellError::ConfigurationError(format!("Failed to initialize logging: {}", e)))?;

    let config = load_config(&cli)?;

    match &cli.command {
        Some(command) => run_cli(&cli, command),
        None => {
            let mut app = HomeShellApp::new(config)?;
            if let Err(e) = app.run().await {
                error!("Application error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
