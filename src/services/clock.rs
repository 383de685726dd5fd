//! Wall-clock service for the dashboard header
//!
//! Publishes a formatted local hour:minute string over a watch channel,
//! refreshed once per tick while running. Only the hour and minute fields are
//! selected; the 12/24-hour style follows the host locale.

use chrono::{DateTime, Local, Timelike};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

/// Hour convention detected from the host locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    TwelveHour,
    TwentyFourHour,
}

impl TimeStyle {
    /// Detect the hour convention from `LC_TIME`-family environment variables.
    /// Falls back to 24-hour when the locale gives no signal.
    pub fn detect() -> Self {
        let locale = std::env::var("LC_TIME")
            .or_else(|_| std::env::var("LC_ALL"))
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_default();

        // Locales that conventionally render clocks with a meridiem marker
        const TWELVE_HOUR_LOCALES: [&str; 6] =
            ["en_US", "en_PH", "en_CA", "en_AU", "en_NZ", "en_IN"];

        if TWELVE_HOUR_LOCALES
            .iter()
            .any(|prefix| locale.starts_with(prefix))
        {
            TimeStyle::TwelveHour
        } else {
            TimeStyle::TwentyFourHour
        }
    }
}

/// Configuration for clock behavior
#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// Refresh interval for the published time string
    pub tick_interval: Duration,
    /// Hour convention used for formatting
    pub style: TimeStyle,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            tick_interval: Duration::from_millis(1000),
            style: TimeStyle::detect(),
        }
    }
}

/// Format a local timestamp as an hour:minute display string
pub fn format_wall_clock(now: &DateTime<Local>, style: TimeStyle) -> String {
    match style {
        TimeStyle::TwentyFourHour => format!("{:02}:{:02}", now.hour(), now.minute()),
        TimeStyle::TwelveHour => {
            let (is_pm, hour) = now.hour12();
            let meridiem = if is_pm { "PM" } else { "AM" };
            format!("{:02}:{:02} {}", hour, now.minute(), meridiem)
        }
    }
}

/// Publishes the formatted local time while running
pub struct ClockService {
    config: ClockConfig,
    tx: Arc<watch::Sender<String>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl ClockService {
    /// Create a stopped clock seeded with the current time
    pub fn new(config: ClockConfig) -> Self {
        let initial = format_wall_clock(&Local::now(), config.style);
        let (tx, _rx) = watch::channel(initial);

        ClockService {
            config,
            tx: Arc::new(tx),
            ticker: Mutex::new(None),
        }
    }

    /// Subscribe to formatted time updates
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }

    /// Current formatted time without subscribing
    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Start the tick task. Restarting replaces any previous ticker.
    pub fn start(&self) {
        let tx = self.tx.clone();
        let style = self.config.style;
        let tick = self.config.tick_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let formatted = format_wall_clock(&Local::now(), style);
                tx.send_replace(formatted);
            }
        });

        if let Ok(mut ticker) = self.ticker.lock() {
            if let Some(previous) = ticker.replace(handle) {
                previous.abort();
            }
        }
        debug!("Clock ticker started");
    }

    /// Stop the tick task. The ticker must never outlive the service.
    pub fn stop(&self) {
        if let Ok(mut ticker) = self.ticker.lock() {
            if let Some(handle) = ticker.take() {
                handle.abort();
                debug!("Clock ticker stopped");
            }
        }
    }
}

impl Drop for ClockService {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, hour, minute, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn twenty_four_hour_formatting() {
        assert_eq!(format_wall_clock(&at(9, 5), TimeStyle::TwentyFourHour), "09:05");
        assert_eq!(format_wall_clock(&at(23, 59), TimeStyle::TwentyFourHour), "23:59");
    }

    #[test]
    fn twelve_hour_formatting_carries_meridiem() {
        assert_eq!(format_wall_clock(&at(9, 5), TimeStyle::TwelveHour), "09:05 AM");
        assert_eq!(format_wall_clock(&at(15, 30), TimeStyle::TwelveHour), "03:30 PM");
    }

    #[tokio::test]
    async fn clock_publishes_updates_while_running() {
        let clock = ClockService::new(ClockConfig {
            tick_interval: Duration::from_millis(10),
            style: TimeStyle::TwentyFourHour,
        });
        let mut rx = clock.subscribe();
        clock.start();

        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("clock should tick within the window")
            .expect("sender alive");

        let value = rx.borrow().clone();
        assert!(value.contains(':'), "expected hour:minute, got {value}");
        clock.stop();
    }

    #[tokio::test]
    async fn stopped_clock_emits_nothing() {
        let clock = ClockService::new(ClockConfig {
            tick_interval: Duration::from_millis(10),
            style: TimeStyle::TwentyFourHour,
        });
        let mut rx = clock.subscribe();
        clock.start();
        clock.stop();

        // A tick may have landed between start and stop; clear it before
        // asserting silence.
        let _ = rx.borrow_and_update();
        let waited =
            tokio::time::timeout(Duration::from_millis(80), rx.changed()).await;
        assert!(waited.is_err(), "no tick may fire after stop");
    }
}
