use super::jobs::{JobMessage, TypeResult};
use super::*;
use crate::egui_app::state::SensorFormState;
use crate::scene::ModelOrigin;

impl EguiController {
    /// Resolve the open machine's type again and reload its model.
    pub fn reload_model(&mut self) {
        let Some(machine_id) = self.open_machine_id().map(str::to_string) else {
            self.set_status("Open a machine first", StatusTone::Warning);
            return;
        };
        let token = self.fences.model.issue();
        self.ui.detail.reloading_model = true;
        let backend = Arc::clone(&self.backend);
        self.jobs.spawn(move || {
            let result = backend.machine_type(&machine_id);
            JobMessage::MachineTypeResolved(TypeResult {
                token,
                machine_id,
                result,
            })
        });
    }

    pub(super) fn apply_resolved_type(&mut self, message: TypeResult) {
        let current = self.fences.model.complete(message.token);
        self.sync_busy_flags();
        if !current || !self.is_open(&message.machine_id) {
            tracing::debug!("Discarding stale model type for {}", message.machine_id);
            return;
        }
        match message.result {
            Ok(info) => {
                let machine_type = MachineType::from_label(&info.machine_type);
                if let Some(current) = self.current.as_mut() {
                    if current.machine_type != machine_type {
                        tracing::info!(
                            "{} is now reported as {}",
                            current.machine_id,
                            machine_type.as_str()
                        );
                    }
                    current.machine_type = machine_type;
                }
                if self.ui.sensor_form.machine_type != Some(machine_type) {
                    self.ui.sensor_form = SensorFormState::for_type(machine_type);
                }
                self.show_model(machine_type);
            }
            Err(err) => {
                tracing::error!("Error resolving type of {}: {err}", message.machine_id);
                self.alert(AlertKind::Error, err.alert_text("loading the machine model"));
            }
        }
    }

    /// Make `machine_type` the resident model, keeping the open machine's
    /// tint.
    pub(super) fn show_model(&mut self, machine_type: MachineType) {
        let outcome = self.scene.load_model(machine_type);
        if let Some(replaced) = outcome.replaced {
            tracing::debug!("Replaced {} model", replaced.as_str());
        }
        let source = match outcome.origin {
            ModelOrigin::Asset => "asset",
            ModelOrigin::Procedural => "placeholder",
        };
        tracing::info!("Showing {} {source} model", machine_type.as_str());
        self.reapply_tint();
    }

    pub(super) fn reapply_tint(&mut self) {
        let Some(tint) = self.current.as_ref().and_then(|machine| machine.tint.clone()) else {
            return;
        };
        self.scene.recolor(&tint.color_hex, &tint.status);
    }
}
