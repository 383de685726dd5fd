//! Footer status bar view

/// Fixed footer content
pub struct StatusBar {
    weather_summary: String,
    now_playing_title: String,
    notification_note: String,
}

impl Default for StatusBar {
    fn default() -> Self {
        StatusBar {
            weather_summary: "24°C, Sunny".to_string(),
            now_playing_title: "Chill Lo-fi Beats".to_string(),
            notification_note: "1 new notification".to_string(),
        }
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the footer line. The now-playing chip gets a note marker while
    /// music is on.
    pub fn render(&self, is_playing: bool) -> String {
        let playing_marker = if is_playing { "♪ " } else { "" };
        format!(
            "{}  |  {}{}  |  {}",
            self.weather_summary, playing_marker, self.now_playing_title, self.notification_note
        )
    }
}
