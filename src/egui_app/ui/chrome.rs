use super::EguiApp;
use super::style;
use eframe::egui::{self, Align, Frame, Layout, Margin, RichText};

impl EguiApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::symmetric(10, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Digital Twin").color(palette.text_primary));
                    ui.separator();
                    ui.label(
                        RichText::new(&self.controller.ui.backend_label)
                            .small()
                            .color(palette.text_muted),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Add machine").clicked() {
                            self.controller.open_add_machine();
                        }
                        let refreshing = self.controller.ui.catalog.loading;
                        if ui
                            .add_enabled(!refreshing, egui::Button::new("Refresh"))
                            .clicked()
                        {
                            self.controller.refresh_catalog();
                        }
                        let mut auto_rotate = self.controller.ui.auto_rotate;
                        if ui.checkbox(&mut auto_rotate, "Rotate").changed() {
                            self.controller.set_auto_rotate(auto_rotate);
                        }
                    });
                });
            });
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary))
                        .on_hover_text(status.log_text());
                });
            });
    }
}
