use eframe::egui::{self, Color32, Id, LayerId, Order};

/// Stacking tiers for floating UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum OverlayLayer {
    /// Floating windows that leave the dashboard usable.
    Overlay,
    /// Dialogs that block the dashboard until dismissed.
    Modal,
}

impl OverlayLayer {
    pub(super) fn order(self) -> Order {
        match self {
            Self::Overlay => Order::Middle,
            Self::Modal => Order::Tooltip,
        }
    }

    fn layer_id(self, id: Id) -> LayerId {
        LayerId::new(self.order(), id)
    }
}

/// Dim the viewport and swallow pointer input below a modal dialog.
pub(super) fn modal_backdrop(ctx: &egui::Context, id: impl Into<Id>, color: Color32) {
    let id = id.into();
    let rect = ctx.viewport_rect();
    ctx.layer_painter(OverlayLayer::Modal.layer_id(id.with("dim")))
        .rect_filled(rect, 0.0, color);
    egui::Area::new(id.with("blocker"))
        .order(OverlayLayer::Modal.order())
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            ui.allocate_rect(rect, egui::Sense::click_and_drag());
        });
}
