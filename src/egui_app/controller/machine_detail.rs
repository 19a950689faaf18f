use super::jobs::{HistoryResult, JobMessage, MachineOpenResult, OpenedMachine};
use super::*;
use crate::egui_app::state::{DetailState, SensorFormState};
use crate::egui_app::view_model;
use crate::health::status_hex;

impl EguiController {
    /// Fetch detail then history for `machine_id` and show it.
    ///
    /// Opening another machine before this completes supersedes it. Requests
    /// for the machine already shown keep running until a different machine
    /// replaces it.
    pub fn open_machine(&mut self, machine_id: &str) {
        let machine_id = machine_id.trim().to_string();
        let token = self.fences.detail.issue();
        self.ui.detail.loading = Some(machine_id.clone());
        self.set_status(format!("Loading machine {machine_id}"), StatusTone::Busy);
        let backend = Arc::clone(&self.backend);
        let limit = self.settings.history_limit;
        self.jobs.spawn(move || {
            let result = backend.machine(&machine_id).and_then(|detail| {
                let history = backend.history(&machine_id, limit)?;
                Ok(OpenedMachine { detail, history })
            });
            JobMessage::MachineOpened(MachineOpenResult {
                token,
                machine_id,
                result,
            })
        });
    }

    /// Re-fetch the prediction history of the open machine.
    pub fn render_history(&mut self) {
        let Some(machine_id) = self.open_machine_id().map(str::to_string) else {
            return;
        };
        let token = self.fences.history.issue();
        self.ui.detail.history_loading = true;
        let backend = Arc::clone(&self.backend);
        let limit = self.settings.history_limit;
        self.jobs.spawn(move || {
            let result = backend.history(&machine_id, limit);
            JobMessage::HistoryLoaded(HistoryResult {
                token,
                machine_id,
                result,
            })
        });
    }

    /// Hide the detail window; the machine stays selected for the scene.
    pub fn close_detail(&mut self) {
        self.ui.detail.open = false;
    }

    pub(super) fn apply_opened_machine(&mut self, message: MachineOpenResult) {
        if !self.fences.detail.complete(message.token) {
            tracing::debug!("Discarding stale detail for {}", message.machine_id);
            return;
        }
        self.ui.detail.loading = None;
        let opened = match message.result {
            Ok(opened) => opened,
            Err(err) => {
                tracing::error!("Error loading machine {}: {err}", message.machine_id);
                self.alert(AlertKind::Error, err.alert_text("loading machine details"));
                return;
            }
        };
        let OpenedMachine { detail, history } = opened;
        let same_machine = self.is_open(&detail.machine_id);
        if !same_machine {
            self.fences.invalidate_machine();
        }
        let machine_type = detail.kind();
        let tint = detail.latest_prediction.as_ref().map(|latest| Tint {
            color_hex: status_hex(Some(&latest.health_status)).to_string(),
            status: latest.health_status.clone(),
        });
        self.ui.detail = DetailState {
            open: true,
            loading: None,
            machine_id: detail.machine_id.clone(),
            title: format!("{} ({})", detail.name, detail.machine_id),
            fields: view_model::detail_fields(&detail),
            limits: view_model::limit_fields(&detail),
            health: detail
                .latest_prediction
                .as_ref()
                .map(view_model::health_from_history),
            history: view_model::history_rows(&history, self.local_offset),
            history_loading: false,
            submitting: false,
            reloading_model: false,
        };
        self.sync_busy_flags();
        if self.ui.sensor_form.machine_type != Some(machine_type) || !same_machine {
            self.ui.sensor_form = SensorFormState::for_type(machine_type);
        }
        self.current = Some(OpenMachine {
            machine_id: detail.machine_id.clone(),
            machine_type,
            tint,
        });
        self.show_model(machine_type);
        self.set_status(format!("Loaded {}", detail.name), StatusTone::Info);
    }

    pub(super) fn apply_history(&mut self, message: HistoryResult) {
        let current = self.fences.history.complete(message.token);
        self.sync_busy_flags();
        if !current || !self.is_open(&message.machine_id) {
            tracing::debug!("Discarding stale history for {}", message.machine_id);
            return;
        }
        match message.result {
            Ok(entries) => {
                self.ui.detail.history = view_model::history_rows(&entries, self.local_offset);
            }
            Err(err) => {
                tracing::error!("Error loading history for {}: {err}", message.machine_id);
                self.alert(AlertKind::Error, err.alert_text("loading prediction history"));
            }
        }
    }
}
