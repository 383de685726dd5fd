//! Slide-up weather panel view
//!
//! Pure presentation over the hardcoded report. The panel always exists; the
//! open flag only drives visibility, mirroring an opacity transition rather
//! than a mount/unmount.

use crate::models::weather::WeatherReport;

/// A rendered panel frame
#[derive(Debug, Clone)]
pub struct PanelFrame {
    /// Whether the frame should be shown
    pub visible: bool,
    /// Display lines, present even when hidden
    pub lines: Vec<String>,
}

/// Renders the weather report into panel frames
pub struct WeatherPanelView {
    report: WeatherReport,
}

impl WeatherPanelView {
    pub fn new(report: WeatherReport) -> Self {
        WeatherPanelView { report }
    }

    /// Render one frame. The lines are identical whether or not the panel is
    /// visible; only the flag changes.
    pub fn frame(&self, open: bool) -> PanelFrame {
        let current = &self.report.current;
        let mut lines = vec![
            "Weather".to_string(),
            format!("{}  {} {}", current.icon, current.temperature, current.summary),
            format!("Feels Like   {}", current.feels_like),
            format!("Humidity     {}", current.humidity),
            format!("Wind Speed   {}", current.wind_speed),
            format!("UV Index     {}", current.uv_index),
            "WEEKLY FORECAST".to_string(),
        ];
        lines.extend(self.forecast_rows());

        PanelFrame {
            visible: open,
            lines,
        }
    }

    /// One row per forecast day
    pub fn forecast_rows(&self) -> Vec<String> {
        self.report
            .weekly
            .iter()
            .map(|entry| format!("{}  {}  {}", entry.day, entry.icon, entry.temp))
            .collect()
    }
}
