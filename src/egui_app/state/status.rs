use crate::egui_app::ui::style;
use egui::Color32;

const MAX_LOG_ENTRIES: usize = 50;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    /// Rolling status log entries, newest last.
    pub log: Vec<String>,
}

impl StatusBarState {
    /// Status shown before the first catalog fetch completes.
    pub fn idle() -> Self {
        Self {
            text: "Connecting to the prediction service".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
            log: Vec::new(),
        }
    }

    pub fn set(&mut self, text: String, tone: style::StatusTone) {
        self.badge_label = style::status_badge_label(tone).into();
        self.badge_color = style::status_badge_color(tone);
        self.log.push(text.clone());
        if self.log.len() > MAX_LOG_ENTRIES {
            let excess = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(..excess);
        }
        self.text = text;
    }

    /// Concatenate log entries into a single displayable string.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_bounded() {
        let mut status = StatusBarState::idle();
        for index in 0..60 {
            status.set(format!("entry {index}"), style::StatusTone::Info);
        }
        assert_eq!(status.log.len(), MAX_LOG_ENTRIES);
        assert_eq!(status.log.first().map(String::as_str), Some("entry 10"));
        assert_eq!(status.text, "entry 59");
        assert_eq!(status.badge_label, "Info");
    }
}
