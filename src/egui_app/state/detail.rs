use egui::Color32;

use crate::health::StatusStyle;

/// Label/value pair in the machine information grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

impl DetailField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Current health block: status text, RUL line and color swatch.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthSummaryView {
    pub status_label: String,
    /// `"RUL: 12.3 hours"`.
    pub rul_line: String,
    pub color: Color32,
    /// Formatted confidence, when the source carried one.
    pub confidence: Option<String>,
    pub maintenance_required: bool,
}

/// One row of the prediction history table.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRowView {
    pub timestamp: String,
    pub status_label: String,
    pub status_style: StatusStyle,
    pub rul: String,
    pub confidence: String,
    pub maintenance_required: bool,
}

/// Detail window contents for the open machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailState {
    pub open: bool,
    /// Machine currently being fetched, if any.
    pub loading: Option<String>,
    pub machine_id: String,
    pub title: String,
    pub fields: Vec<DetailField>,
    /// Type-specific limits.
    pub limits: Vec<DetailField>,
    pub health: Option<HealthSummaryView>,
    pub history: Vec<HistoryRowView>,
    pub history_loading: bool,
    pub submitting: bool,
    pub reloading_model: bool,
}

impl DetailState {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}
