use super::EguiApp;
use super::badges;
use super::overlay_layers::OverlayLayer;
use super::style;
use crate::egui_app::state::{
    DetailField, DetailState, HealthSummaryView, HistoryRowView, SensorFormState,
};
use eframe::egui::{self, CornerRadius, RichText};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DetailAction {
    None,
    Predict,
    ReloadModel,
    RefreshHistory,
}

impl EguiApp {
    pub(super) fn render_detail_window(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.detail.open {
            return;
        }
        let mut open = true;
        let mut action = DetailAction::None;
        let ui_state = &mut self.controller.ui;
        let detail = &ui_state.detail;
        let form = &mut ui_state.sensor_form;
        egui::Window::new(detail.title.as_str())
            .id(egui::Id::new("machine_detail"))
            .order(OverlayLayer::Overlay.order())
            .collapsible(false)
            .resizable(true)
            .default_width(560.0)
            .default_height(620.0)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("detail_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        action = render_detail_body(ui, detail, form);
                    });
            });
        if !open {
            self.controller.close_detail();
            return;
        }
        match action {
            DetailAction::None => {}
            DetailAction::Predict => self.controller.submit_reading(),
            DetailAction::ReloadModel => self.controller.reload_model(),
            DetailAction::RefreshHistory => self.controller.render_history(),
        }
    }
}

fn render_detail_body(
    ui: &mut egui::Ui,
    detail: &DetailState,
    form: &mut SensorFormState,
) -> DetailAction {
    let mut action = DetailAction::None;
    if let Some(machine_id) = detail.loading.as_deref() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(format!("Loading {machine_id}"));
        });
    }
    section(ui, "Machine information");
    field_grid(ui, "detail_fields", &detail.fields);
    if !detail.limits.is_empty() {
        section(ui, "Limits");
        field_grid(ui, "detail_limits", &detail.limits);
    }

    section(ui, "Current health");
    ui.horizontal(|ui| {
        match &detail.health {
            Some(health) => render_health(ui, health),
            None => {
                ui.label(RichText::new("No predictions yet").color(style::palette().text_muted));
            }
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let button = egui::Button::new("Reload model");
            if ui.add_enabled(!detail.reloading_model, button).clicked() {
                action = DetailAction::ReloadModel;
            }
        });
    });

    section(ui, "Sensor readings");
    egui::Grid::new("sensor_inputs")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for field in &mut form.fields {
                ui.label(field.key.label());
                ui.add(
                    egui::TextEdit::singleline(&mut field.text)
                        .hint_text("0")
                        .desired_width(140.0),
                );
                ui.end_row();
            }
        });
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let predict = egui::Button::new(RichText::new("Predict").strong());
        if ui.add_enabled(!detail.submitting, predict).clicked() {
            action = DetailAction::Predict;
        }
        if detail.submitting {
            ui.spinner();
        }
    });

    ui.horizontal(|ui| {
        section(ui, "Prediction history");
        if detail.history_loading {
            ui.spinner();
        } else if ui.small_button("Refresh").clicked() {
            action = DetailAction::RefreshHistory;
        }
    });
    render_history(ui, &detail.history);
    action
}

fn section(ui: &mut egui::Ui, title: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(title).strong().color(style::palette().text_primary));
    ui.add_space(2.0);
}

fn field_grid(ui: &mut egui::Ui, id: &str, fields: &[DetailField]) {
    let palette = style::palette();
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([16.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for field in fields {
                ui.label(RichText::new(&field.label).color(palette.text_muted));
                ui.label(&field.value);
                ui.end_row();
            }
        });
}

fn render_health(ui: &mut egui::Ui, health: &HealthSummaryView) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, CornerRadius::same(4), health.color);
    ui.vertical(|ui| {
        ui.label(RichText::new(&health.status_label).strong().color(health.color));
        ui.label(&health.rul_line);
        if let Some(confidence) = &health.confidence {
            ui.label(
                RichText::new(format!("Confidence: {confidence}"))
                    .small()
                    .color(style::palette().text_muted),
            );
        }
    });
}

fn render_history(ui: &mut egui::Ui, rows: &[HistoryRowView]) {
    if rows.is_empty() {
        ui.label(RichText::new("No history").color(style::palette().text_muted));
        return;
    }
    egui::Grid::new("prediction_history")
        .num_columns(5)
        .spacing([14.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for heading in ["Timestamp", "Status", "RUL (h)", "Confidence", "Maintenance"] {
                ui.label(RichText::new(heading).strong());
            }
            ui.end_row();
            for row in rows {
                ui.label(&row.timestamp);
                badges::status_badge(ui, &row.status_label, row.status_style);
                ui.label(&row.rul);
                ui.label(&row.confidence);
                badges::maintenance_badge(ui, row.maintenance_required);
                ui.end_row();
            }
        });
}
