use super::jobs::{CatalogResult, JobMessage};
use super::*;
use crate::egui_app::view_model;

impl EguiController {
    /// Fetch the machine list and rebuild the catalog cards quietly.
    pub fn list_machines(&mut self) {
        self.request_catalog(false);
    }

    /// Manual refresh from the top bar; reports progress in the status bar.
    pub fn refresh_catalog(&mut self) {
        self.set_status("Refreshing machines", StatusTone::Busy);
        self.request_catalog(true);
    }

    fn request_catalog(&mut self, announce: bool) {
        let token = self.fences.catalog.issue();
        self.ui.catalog.loading = true;
        let backend = Arc::clone(&self.backend);
        self.jobs.spawn(move || {
            JobMessage::CatalogLoaded(CatalogResult {
                token,
                announce,
                result: backend.list_machines(),
            })
        });
    }

    pub(super) fn apply_catalog(&mut self, message: CatalogResult) {
        if !self.fences.catalog.is_current(message.token) {
            tracing::debug!("Discarding stale machine list");
            return;
        }
        self.ui.catalog.loading = false;
        match message.result {
            Ok(machines) => {
                self.ui.catalog.cards = machines.iter().map(view_model::machine_card).collect();
                self.ui.catalog.loaded = true;
                if message.announce {
                    self.set_status(format!("{} machines", machines.len()), StatusTone::Info);
                }
            }
            Err(err) => {
                tracing::error!("Error loading machines: {err}");
                self.set_status(format!("Error loading machines: {err}"), StatusTone::Warning);
            }
        }
    }
}
