//! Weather report model for the slide-up panel
//!
//! All values are literal constants; nothing is fetched or computed. The panel
//! is presentation-only and reads this preset.

use serde::{Deserialize, Serialize};

/// Current conditions shown in the panel header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Large condition glyph
    pub icon: String,

    /// Temperature label, e.g. "24°C"
    pub temperature: String,

    /// Condition summary, e.g. "Sunny"
    pub summary: String,

    /// Perceived temperature label
    pub feels_like: String,

    /// Relative humidity label
    pub humidity: String,

    /// Wind speed label
    pub wind_speed: String,

    /// UV index label
    pub uv_index: String,
}

/// One day of the weekly forecast strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Three-letter day label
    pub day: String,

    /// Condition glyph
    pub icon: String,

    /// Temperature label, e.g. "24°"
    pub temp: String,
}

/// The full report rendered by the weather panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub weekly: Vec<ForecastEntry>,
}

impl WeatherReport {
    /// The hardcoded report the dashboard ships with
    pub fn preset() -> Self {
        let entry = |day: &str, icon: &str, temp: &str| ForecastEntry {
            day: day.to_string(),
            icon: icon.to_string(),
            temp: temp.to_string(),
        };

        WeatherReport {
            current: CurrentConditions {
                icon: "☀️".to_string(),
                temperature: "24°C".to_string(),
                summary: "Sunny".to_string(),
                feels_like: "22°C".to_string(),
                humidity: "65%".to_string(),
                wind_speed: "12 km/h".to_string(),
                uv_index: "5 (Moderate)".to_string(),
            },
            weekly: vec![
                entry("Mon", "☀️", "24°"),
                entry("Tue", "🌤️", "23°"),
                entry("Wed", "⛅", "22°"),
                entry("Thu", "🌧️", "20°"),
                entry("Fri", "🌤️", "21°"),
                entry("Sat", "☀️", "25°"),
                entry("Sun", "☀️", "26°"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_has_seven_forecast_days() {
        let report = WeatherReport::preset();
        assert_eq!(report.weekly.len(), 7);

        let days: Vec<&str> = report.weekly.iter().map(|e| e.day.as_str()).collect();
        assert_eq!(days, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn preset_fields_are_non_empty() {
        let report = WeatherReport::preset();
        for entry in &report.weekly {
            assert!(!entry.day.is_empty());
            assert!(!entry.icon.is_empty());
            assert!(!entry.temp.is_empty());
        }
        assert_eq!(report.current.temperature, "24°C");
        assert_eq!(report.current.summary, "Sunny");
    }
}
