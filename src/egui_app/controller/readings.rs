use super::jobs::{JobMessage, ReadingResult};
use super::*;
use crate::egui_app::view_model;

impl EguiController {
    /// Post the sensor form for the open machine and show the prediction.
    pub fn submit_reading(&mut self) {
        let Some(machine_id) = self.open_machine_id().map(str::to_string) else {
            self.set_status("Open a machine first", StatusTone::Warning);
            return;
        };
        let Some(reading) = self.ui.sensor_form.reading(&machine_id) else {
            self.set_status("Sensor inputs are not ready", StatusTone::Warning);
            return;
        };
        let token = self.fences.reading.issue();
        self.ui.detail.submitting = true;
        self.set_status(format!("Predicting health of {machine_id}"), StatusTone::Busy);
        let backend = Arc::clone(&self.backend);
        self.jobs.spawn(move || {
            let result = backend.predict(&reading);
            JobMessage::ReadingSubmitted(ReadingResult {
                token,
                machine_id,
                result,
            })
        });
    }

    pub(super) fn apply_prediction(&mut self, message: ReadingResult) {
        let current = self.fences.reading.complete(message.token);
        self.sync_busy_flags();
        if !current || !self.is_open(&message.machine_id) {
            tracing::debug!("Discarding stale prediction for {}", message.machine_id);
            return;
        }
        let prediction = match message.result {
            Ok(prediction) => prediction,
            Err(err) => {
                tracing::error!("Error making prediction for {}: {err}", message.machine_id);
                self.alert(AlertKind::Error, err.alert_text("making prediction"));
                return;
            }
        };
        tracing::info!(
            "Prediction for {}: {} ({:.1} h)",
            message.machine_id,
            prediction.health_status,
            prediction.rul_hours
        );
        self.ui.detail.health = Some(view_model::health_from_prediction(&prediction));
        let tint = Tint {
            color_hex: prediction.display_hex(),
            status: prediction.health_status.clone(),
        };
        if let Some(current) = self.current.as_mut() {
            current.tint = Some(tint);
        }
        self.reapply_tint();
        if prediction.maintenance_required {
            self.alert(
                AlertKind::Maintenance,
                view_model::maintenance_message(&prediction),
            );
            self.set_status(
                format!("{} needs maintenance", message.machine_id),
                StatusTone::Warning,
            );
        } else {
            self.set_status(
                format!("{}: {}", message.machine_id, prediction.health_status),
                StatusTone::Info,
            );
        }
        self.render_history();
        self.list_machines();
    }
}
