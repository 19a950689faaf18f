//! Health status classification shared by cards, history rows and the scene.
//!
//! Every status maps to exactly one [`StatusStyle`]; nothing else in the crate
//! carries its own status-to-color table.

use std::fmt;

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Health classification reported by the prediction service.
///
/// Labels outside the three known classes are kept verbatim so they can be
/// displayed, and they share the neutral style.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
    Other(String),
}

/// Badge tone plus display color for a health status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusStyle {
    /// Badge category name (`success`, `warning`, `danger`, `secondary`).
    pub badge: &'static str,
    /// Hex display color, `#rrggbb`.
    pub hex: &'static str,
}

impl StatusStyle {
    pub const SUCCESS: Self = Self {
        badge: "success",
        hex: "#28a745",
    };
    pub const WARNING: Self = Self {
        badge: "warning",
        hex: "#ffc107",
    };
    pub const DANGER: Self = Self {
        badge: "danger",
        hex: "#dc3545",
    };
    pub const SECONDARY: Self = Self {
        badge: "secondary",
        hex: "#6c757d",
    };

    /// Display color as an egui color.
    pub fn color(self) -> Color32 {
        parse_hex_color(self.hex).unwrap_or(Color32::GRAY)
    }
}

impl HealthStatus {
    /// Classify a status label. Matching is exact, like the service emits it.
    pub fn parse(label: &str) -> Self {
        match label {
            "Healthy" => Self::Healthy,
            "Warning" => Self::Warning,
            "Critical" => Self::Critical,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Healthy => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::Other(label) => label,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            Self::Healthy => StatusStyle::SUCCESS,
            Self::Warning => StatusStyle::WARNING,
            Self::Critical => StatusStyle::DANGER,
            Self::Other(_) => StatusStyle::SECONDARY,
        }
    }
}

impl From<String> for HealthStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<HealthStatus> for String {
    fn from(value: HealthStatus) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Style for an optional status; a missing status is neutral.
pub fn style_for(status: Option<&HealthStatus>) -> StatusStyle {
    status.map_or(StatusStyle::SECONDARY, HealthStatus::style)
}

/// Badge category for an optional status.
pub fn badge_style(status: Option<&HealthStatus>) -> &'static str {
    style_for(status).badge
}

/// Hex display color for an optional status.
pub fn status_hex(status: Option<&HealthStatus>) -> &'static str {
    style_for(status).hex
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(text: &str) -> Option<Color32> {
    let digits = text.trim().trim_start_matches('#');
    if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match digits.len() {
        6 => Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => {
            let short = |idx: usize| channel(idx..idx + 1).map(|value| value * 17);
            Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_badge_and_color() {
        let cases = [
            ("Healthy", "success", "#28a745"),
            ("Warning", "warning", "#ffc107"),
            ("Critical", "danger", "#dc3545"),
            ("Sharp", "secondary", "#6c757d"),
        ];
        for (label, badge, hex) in cases {
            let status = HealthStatus::parse(label);
            assert_eq!(badge_style(Some(&status)), badge, "{label}");
            assert_eq!(status_hex(Some(&status)), hex, "{label}");
        }
    }

    #[test]
    fn missing_status_is_neutral() {
        assert_eq!(style_for(None), StatusStyle::SECONDARY);
    }

    #[test]
    fn unknown_labels_are_kept_verbatim() {
        let status: HealthStatus = serde_json::from_str("\"Minor Wear\"").unwrap();
        assert_eq!(status, HealthStatus::Other("Minor Wear".into()));
        assert_eq!(status.to_string(), "Minor Wear");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Minor Wear\"");
        assert!(!status.is_critical());
        assert!(HealthStatus::Critical.is_critical());
    }

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(
            parse_hex_color("#dc3545"),
            Some(Color32::from_rgb(0xdc, 0x35, 0x45))
        );
        assert_eq!(parse_hex_color("f80"), Some(Color32::from_rgb(0xff, 0x88, 0x00)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zz0000"), None);
        assert_eq!(StatusStyle::WARNING.color(), Color32::from_rgb(0xff, 0xc1, 0x07));
    }
}
