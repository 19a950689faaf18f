use super::jobs::{CreateResult, JobMessage};
use super::*;

impl EguiController {
    pub fn open_add_machine(&mut self) {
        self.ui.add_machine.open = true;
    }

    /// Close the dialog, keeping what was typed.
    pub fn cancel_add_machine(&mut self) {
        self.ui.add_machine.open = false;
    }

    /// Post the add-machine form.
    pub fn create_machine(&mut self) {
        if self.ui.add_machine.submitting {
            return;
        }
        let request = self.ui.add_machine.to_request();
        let token = self.fences.create.issue();
        self.ui.add_machine.submitting = true;
        self.set_status(format!("Adding machine {}", request.machine_id), StatusTone::Busy);
        let backend = Arc::clone(&self.backend);
        self.jobs.spawn(move || {
            let result = backend.create_machine(&request);
            JobMessage::MachineCreated(CreateResult {
                token,
                machine_id: request.machine_id,
                result,
            })
        });
    }

    pub(super) fn apply_created_machine(&mut self, message: CreateResult) {
        if !self.fences.create.is_current(message.token) {
            tracing::debug!("Discarding stale create for {}", message.machine_id);
            return;
        }
        self.ui.add_machine.submitting = false;
        match message.result {
            Ok(()) => {
                tracing::info!("Added machine {}", message.machine_id);
                self.ui.add_machine.reset();
                self.set_status("Machine added successfully!", StatusTone::Info);
                self.list_machines();
            }
            Err(err) => {
                tracing::error!("Error adding machine {}: {err}", message.machine_id);
                self.alert(AlertKind::Error, err.alert_text("adding machine"));
            }
        }
    }
}
