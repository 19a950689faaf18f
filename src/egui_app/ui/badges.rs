use super::style;
use crate::health::StatusStyle;
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText};

/// Small filled pill in a status color.
pub(super) fn status_badge(ui: &mut egui::Ui, label: &str, status: StatusStyle) -> egui::Response {
    Frame::new()
        .fill(status.color())
        .corner_radius(CornerRadius::same(4))
        .inner_margin(Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(
                RichText::new(label)
                    .small()
                    .strong()
                    .color(style::badge_text_color(status)),
            );
        })
        .response
}

/// Yes/No maintenance flag.
pub(super) fn maintenance_badge(ui: &mut egui::Ui, required: bool) -> egui::Response {
    if required {
        status_badge(ui, "Yes", StatusStyle::DANGER)
    } else {
        status_badge(ui, "No", StatusStyle::SUCCESS)
    }
}
