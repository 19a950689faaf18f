use super::EguiApp;
use super::overlay_layers::{self, OverlayLayer};
use super::style;
use crate::egui_app::state::AlertKind;
use crate::health::StatusStyle;
use eframe::egui::{self, Align2, RichText};

impl EguiApp {
    /// Show the front alert; it blocks the dashboard until acknowledged.
    pub(super) fn render_alerts(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.controller.ui.alerts.current() else {
            return;
        };
        overlay_layers::modal_backdrop(
            ctx,
            egui::Id::new("alert_backdrop"),
            style::modal_backdrop_color(),
        );
        let accent = match alert.kind {
            AlertKind::Error => StatusStyle::DANGER.color(),
            AlertKind::Maintenance => StatusStyle::WARNING.color(),
        };
        let mut acknowledged = ctx.input(|i| {
            i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)
        });
        egui::Window::new(RichText::new(&alert.title).color(accent))
            .id(egui::Id::new("alert_dialog"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .min_width(320.0)
            .show(ctx, |ui| {
                for line in alert.message.lines() {
                    ui.label(line);
                }
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            });
        if acknowledged {
            self.controller.dismiss_alert();
        }
    }
}
