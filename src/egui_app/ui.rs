//! egui renderer for the dashboard.

mod add_machine_dialog;
mod alerts;
mod badges;
mod catalog_panel;
mod chrome;
mod detail_window;
mod overlay_layers;
mod scene_view;
pub mod style;

use crate::config::AppSettings;
use crate::egui_app::controller::EguiController;
use eframe::egui;

/// Smallest window that still fits the catalog and the scene side by side.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(900.0, 600.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    started: bool,
}

impl EguiApp {
    /// Create the app for `settings`; fails when the backend URL is unusable.
    pub fn new(settings: AppSettings) -> Result<Self, String> {
        let controller = EguiController::from_settings(settings)
            .map_err(|err| format!("Failed to configure backend: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
            started: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        if !self.started {
            self.controller.start();
            self.started = true;
        }
        self.controller.poll_jobs();
        let animating = self.controller.tick_scene();

        self.render_top_bar(ctx);
        self.render_status(ctx);
        self.render_scene_panel(ctx);
        self.render_catalog(ctx);
        self.render_detail_window(ctx);
        self.render_add_machine_dialog(ctx);
        self.render_alerts(ctx);

        if animating || self.controller.has_pending_jobs() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.shutdown();
    }
}
