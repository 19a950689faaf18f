use super::EguiApp;
use super::style;
use crate::scene::SceneState;
use eframe::egui::{self, RichText};

impl EguiApp {
    /// 3D view of the open machine.
    pub(super) fn render_scene_panel(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::SidePanel::right("scene_panel")
            .resizable(true)
            .default_width(380.0)
            .min_width(240.0)
            .show(ctx, |ui| {
                let caption = match self.controller.scene().state() {
                    SceneState::Displaying(machine_type) => match self.controller.open_machine_id() {
                        Some(machine_id) => format!("{} {machine_id}", machine_type.label()),
                        None => machine_type.label().to_string(),
                    },
                    SceneState::Idle | SceneState::Uninitialized => {
                        "Select a machine to view its model".to_string()
                    }
                    SceneState::Stopped => "Viewer stopped".to_string(),
                };
                ui.label(RichText::new(caption).color(palette.text_muted));
                ui.add_space(4.0);
                let size = ui.available_size();
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                let painter = ui.painter_at(rect);
                self.controller.scene_mut().paint(&painter, rect);
            });
    }
}
