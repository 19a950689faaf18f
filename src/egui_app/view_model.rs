//! Helpers to convert service responses into egui-facing view structs.

use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::FormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::backend::{MachineDetail, MachineSummary, PredictionHistoryEntry, PredictionResult};
use crate::egui_app::state::{DetailField, HealthSummaryView, HistoryRowView, MachineCardView};
use crate::health::{HealthStatus, parse_hex_color, style_for};

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_STATUS: &str = "Unknown";
const DISPLAY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const NAIVE_FORMATS: [&[FormatItem<'static>]; 4] = [
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
];

/// Convert a catalog row into a card.
pub fn machine_card(summary: &MachineSummary) -> MachineCardView {
    let status = summary.current_status.as_ref();
    MachineCardView {
        machine_id: summary.machine_id.clone(),
        name: summary.name.clone(),
        type_label: summary.machine_type.clone(),
        location: text_or_na(summary.location.as_deref()),
        status_label: status.map_or(UNKNOWN_STATUS, HealthStatus::label).to_string(),
        status_style: style_for(status),
        rul: card_rul(summary.current_rul),
    }
}

/// `"x.y hours"`, or `"N/A"` when there is no positive estimate.
pub fn card_rul(rul_hours: Option<f64>) -> String {
    match rul_hours {
        Some(hours) if hours.is_finite() && hours > 0.0 => format!("{} hours", one_decimal(hours)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `"RUL: x.y hours"`, never negative.
pub fn rul_line(rul_hours: f64) -> String {
    format!("RUL: {} hours", one_decimal(rul_hours))
}

/// One decimal, clamped at zero.
pub fn one_decimal(value: f64) -> String {
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    format!("{value:.1}")
}

/// Confidence in [0, 1] as a percentage with one decimal.
pub fn percent(confidence: f64) -> String {
    let confidence = if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("{:.1}%", confidence * 100.0)
}

/// Machine information grid, in display order.
pub fn detail_fields(detail: &MachineDetail) -> Vec<DetailField> {
    vec![
        DetailField::new("ID", detail.machine_id.clone()),
        DetailField::new("Name", detail.name.clone()),
        DetailField::new("Type", detail.machine_type.clone()),
        DetailField::new("Manufacturer", text_or_na(detail.manufacturer.as_deref())),
        DetailField::new("Model", text_or_na(detail.model.as_deref())),
        DetailField::new("Location", text_or_na(detail.location.as_deref())),
        DetailField::new(
            "Installed",
            text_or_na(detail.installation_date.as_deref()),
        ),
        DetailField::new("Status", text_or_na(detail.status.as_deref())),
    ]
}

/// Type-specific limits with humanized keys; bookkeeping columns are skipped.
pub fn limit_fields(detail: &MachineDetail) -> Vec<DetailField> {
    let Some(details) = &detail.details else {
        return Vec::new();
    };
    details
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "id" | "machine_id"))
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(text) => text.clone(),
                serde_json::Value::Null => NOT_AVAILABLE.to_string(),
                other => other.to_string(),
            };
            DetailField::new(humanize_key(key), value)
        })
        .collect()
}

/// Health block from the latest stored prediction, colored by status.
pub fn health_from_history(entry: &PredictionHistoryEntry) -> HealthSummaryView {
    HealthSummaryView {
        status_label: entry.health_status.label().to_string(),
        rul_line: rul_line(entry.rul_hours),
        color: entry.health_status.style().color(),
        confidence: entry.confidence.map(percent),
        maintenance_required: entry.maintenance_required,
    }
}

/// Health block from a fresh prediction, colored by the server's color code.
pub fn health_from_prediction(result: &PredictionResult) -> HealthSummaryView {
    let color = parse_hex_color(&result.display_hex())
        .unwrap_or_else(|| result.health_status.style().color());
    HealthSummaryView {
        status_label: result.health_status.label().to_string(),
        rul_line: rul_line(result.rul_hours),
        color,
        confidence: Some(percent(result.confidence())),
        maintenance_required: result.maintenance_required,
    }
}

pub fn history_rows(entries: &[PredictionHistoryEntry], offset: UtcOffset) -> Vec<HistoryRowView> {
    entries
        .iter()
        .map(|entry| HistoryRowView {
            timestamp: local_timestamp(&entry.timestamp, offset),
            status_label: entry.health_status.label().to_string(),
            status_style: entry.health_status.style(),
            rul: one_decimal(entry.rul_hours),
            confidence: percent(entry.confidence.unwrap_or(0.0)),
            maintenance_required: entry.maintenance_required,
        })
        .collect()
}

/// Blocking confirmation text for predictions that need maintenance.
pub fn maintenance_message(result: &PredictionResult) -> String {
    format!(
        "MAINTENANCE REQUIRED!\nStatus: {}\n{}\nPlease schedule maintenance immediately.",
        result.health_status.label(),
        rul_line(result.rul_hours)
    )
}

/// Render a service timestamp in `offset`.
///
/// RFC 3339 values keep their own offset; naive values are stored in UTC.
/// Unparsable values are shown verbatim.
pub fn local_timestamp(raw: &str, offset: UtcOffset) -> String {
    let trimmed = raw.trim();
    let parsed = OffsetDateTime::parse(trimmed, &Rfc3339).ok().or_else(|| {
        NAIVE_FORMATS.iter().find_map(|format| {
            PrimitiveDateTime::parse(trimmed, format)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
    });
    parsed
        .and_then(|moment| moment.to_offset(offset).format(DISPLAY_FORMAT).ok())
        .unwrap_or_else(|| trimmed.to_string())
}

fn text_or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(index, word)| {
            if index > 0 {
                return word.to_string();
            }
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::StatusStyle;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn summary(status: Option<&str>, rul: Option<f64>) -> MachineSummary {
        MachineSummary {
            machine_id: "M-1".into(),
            name: "Pump".into(),
            machine_type: "motor".into(),
            location: None,
            current_status: status.map(HealthStatus::parse),
            current_rul: rul,
        }
    }

    fn prediction(status: &str, rul: f64, maintenance: bool) -> PredictionResult {
        PredictionResult {
            health_status: HealthStatus::parse(status),
            rul_hours: rul,
            confidence: None,
            confidence_scores: BTreeMap::from([(status.to_string(), 0.8)]),
            color_code: Some("#ffc107".into()),
            maintenance_required: maintenance,
        }
    }

    #[test]
    fn cards_show_status_and_rul() {
        let card = machine_card(&summary(Some("Critical"), Some(17.26)));
        assert_eq!(card.status_label, "Critical");
        assert_eq!(card.status_style, StatusStyle::DANGER);
        assert_eq!(card.rul, "17.3 hours");
        assert_eq!(card.location, "N/A");
    }

    #[test]
    fn cards_without_estimate_show_na() {
        let card = machine_card(&summary(None, Some(0.0)));
        assert_eq!(card.status_label, "Unknown");
        assert_eq!(card.status_style, StatusStyle::SECONDARY);
        assert_eq!(card.rul, "N/A");
        assert_eq!(card_rul(None), "N/A");
    }

    #[test]
    fn warning_prediction_formats_rul() {
        let health = health_from_prediction(&prediction("Warning", 12.34, false));
        assert_eq!(health.status_label, "Warning");
        assert_eq!(health.rul_line, "RUL: 12.3 hours");
        assert_eq!(health.confidence.as_deref(), Some("80.0%"));
    }

    #[test]
    fn negative_rul_is_shown_as_zero() {
        assert_eq!(rul_line(-4.0), "RUL: 0.0 hours");
    }

    #[test]
    fn maintenance_message_names_status_and_rul() {
        let message = maintenance_message(&prediction("Critical", 5.05, true));
        assert_eq!(
            message,
            "MAINTENANCE REQUIRED!\nStatus: Critical\nRUL: 5.0 hours\nPlease schedule maintenance immediately."
        );
    }

    #[test]
    fn history_rows_format_values() {
        let entries = vec![PredictionHistoryEntry {
            timestamp: "2024-05-01 08:30:00".into(),
            health_status: HealthStatus::Healthy,
            rul_hours: 812.04,
            confidence: Some(0.9351),
            maintenance_required: false,
        }];
        let rows = history_rows(&entries, UtcOffset::UTC);
        assert_eq!(rows[0].timestamp, "2024-05-01 08:30:00");
        assert_eq!(rows[0].rul, "812.0");
        assert_eq!(rows[0].confidence, "93.5%");
        assert_eq!(rows[0].status_style, StatusStyle::SUCCESS);
    }

    #[test]
    fn timestamps_are_shifted_to_local_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        assert_eq!(
            local_timestamp("2024-05-01 22:30:00", offset),
            "2024-05-02 00:30:00"
        );
        assert_eq!(
            local_timestamp("2024-05-01T08:30:00+01:00", offset),
            "2024-05-01 09:30:00"
        );
        assert_eq!(local_timestamp("yesterday", offset), "yesterday");
    }

    #[test]
    fn limits_skip_bookkeeping_and_humanize_keys() {
        let detail: MachineDetail = serde_json::from_value(json!({
            "machine_id": "B-1",
            "name": "Rotor",
            "type": "blade",
            "details": {"machine_id": "B-1", "max_torque": 250.0, "material": "Carbon"}
        }))
        .unwrap();
        let limits = limit_fields(&detail);
        assert_eq!(limits.len(), 2);
        assert!(limits.contains(&DetailField::new("Max torque", "250.0")));
        assert!(limits.contains(&DetailField::new("Material", "Carbon")));
        let fields = detail_fields(&detail);
        assert_eq!(fields[3], DetailField::new("Manufacturer", "N/A"));
    }
}
