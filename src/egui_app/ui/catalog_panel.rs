use super::EguiApp;
use super::badges;
use super::style;
use crate::egui_app::state::MachineCardView;
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Sense};

const CARD_WIDTH: f32 = 250.0;

impl EguiApp {
    /// Machine cards; clicking one opens its detail view.
    pub(super) fn render_catalog(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let catalog = &self.controller.ui.catalog;
            ui.horizontal(|ui| {
                ui.heading("Machines");
                if catalog.loading {
                    ui.spinner();
                }
            });
            ui.add_space(6.0);
            if catalog.loaded && catalog.cards.is_empty() {
                ui.label(RichText::new("No machines registered yet.").color(palette.text_muted));
                return;
            }
            let opening = self.controller.ui.detail.loading.as_deref();
            let open_id = self.controller.open_machine_id();
            egui::ScrollArea::vertical()
                .id_salt("catalog_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(10.0, 10.0);
                        for card in &catalog.cards {
                            let selected = open_id == Some(card.machine_id.as_str());
                            let busy = opening == Some(card.machine_id.as_str());
                            if render_card(ui, card, selected, busy).clicked() {
                                clicked = Some(card.machine_id.clone());
                            }
                        }
                    });
                });
        });
        if let Some(machine_id) = clicked {
            self.controller.open_machine(&machine_id);
        }
    }
}

fn render_card(
    ui: &mut egui::Ui,
    card: &MachineCardView,
    selected: bool,
    busy: bool,
) -> egui::Response {
    let palette = style::palette();
    let frame = Frame::new()
        .fill(palette.bg_secondary)
        .stroke(if selected {
            style::card_hover_border()
        } else {
            style::card_border()
        })
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::same(10));
    let response = ui
        .push_id(&card.machine_id, |ui| {
            frame
                .show(ui, |ui| {
                    ui.set_width(CARD_WIDTH);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&card.name).strong().color(palette.text_primary));
                        if busy {
                            ui.spinner();
                        }
                    });
                    ui.label(
                        RichText::new(format!("ID: {}", card.machine_id))
                            .small()
                            .color(palette.text_muted),
                    );
                    ui.label(format!("Type: {}", card.type_label));
                    ui.label(format!("Location: {}", card.location));
                    ui.horizontal(|ui| {
                        ui.label("Status:");
                        badges::status_badge(ui, &card.status_label, card.status_style);
                    });
                    ui.label(format!("RUL: {}", card.rul));
                })
                .response
        })
        .inner;
    let response = response.interact(Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.on_hover_text("Open machine")
}
