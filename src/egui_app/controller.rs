//! Owns all dashboard state and bridges the prediction service and the scene
//! to the egui UI.

mod catalog;
mod jobs;
mod machine_detail;
mod machines;
mod model;
mod readings;
mod request_fence;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use time::UtcOffset;

use crate::backend::{BackendError, HttpBackend, MachineType, TwinBackend};
use crate::config::AppSettings;
use crate::egui_app::state::{AlertKind, UiState};
pub use crate::egui_app::ui::style::StatusTone;
use crate::health::HealthStatus;
use crate::scene::Scene;
use jobs::{ControllerJobs, JobMessage};
use request_fence::RequestFences;

/// Surface size used until the first paint reports the real one.
const INITIAL_SCENE_SIZE: (f32, f32) = (400.0, 300.0);

/// Color most recently applied to the open machine's model.
#[derive(Clone, Debug, PartialEq)]
struct Tint {
    color_hex: String,
    status: HealthStatus,
}

/// The machine shown in the detail view.
#[derive(Clone, Debug, PartialEq)]
struct OpenMachine {
    machine_id: String,
    machine_type: MachineType,
    tint: Option<Tint>,
}

/// Maintains app state and bridges core logic to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    settings: AppSettings,
    backend: Arc<dyn TwinBackend>,
    scene: Scene,
    jobs: ControllerJobs,
    fences: RequestFences,
    current: Option<OpenMachine>,
    local_offset: UtcOffset,
}

impl EguiController {
    pub fn new(settings: AppSettings, backend: Arc<dyn TwinBackend>) -> Self {
        let scene = Scene::new(settings.models_dir.clone(), settings.scene.auto_rotate);
        let mut ui = UiState::default();
        ui.backend_label = settings.backend_url.clone();
        ui.auto_rotate = settings.scene.auto_rotate;
        Self {
            ui,
            settings,
            backend,
            scene,
            jobs: ControllerJobs::new(),
            fences: RequestFences::default(),
            current: None,
            local_offset: UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        }
    }

    /// Controller talking to the configured service over HTTP.
    pub fn from_settings(settings: AppSettings) -> Result<Self, BackendError> {
        let backend = HttpBackend::new(&settings.backend_url)?;
        Ok(Self::new(settings, Arc::new(backend)))
    }

    /// Start the scene and request the catalog.
    pub fn start(&mut self) {
        let (width, height) = INITIAL_SCENE_SIZE;
        self.scene.start(width, height);
        self.refresh_catalog();
    }

    /// Stop rendering; outstanding requests are ignored from here on.
    pub fn shutdown(&mut self) {
        self.scene.stop();
        self.fences.catalog.invalidate();
        self.fences.detail.invalidate();
        self.fences.create.invalidate();
        self.fences.invalidate_machine();
        self.sync_busy_flags();
        tracing::info!("Controller shut down");
    }

    /// Apply every finished background job.
    pub fn poll_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::CatalogLoaded(message) => self.apply_catalog(message),
                JobMessage::MachineOpened(message) => self.apply_opened_machine(message),
                JobMessage::HistoryLoaded(message) => self.apply_history(message),
                JobMessage::ReadingSubmitted(message) => self.apply_prediction(message),
                JobMessage::MachineCreated(message) => self.apply_created_machine(message),
                JobMessage::MachineTypeResolved(message) => self.apply_resolved_type(message),
            }
        }
    }

    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.in_flight() > 0
    }

    /// Advance the scene one frame; true while it keeps animating.
    pub fn tick_scene(&mut self) -> bool {
        self.scene.tick()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Identifier of the machine shown in the detail view.
    pub fn open_machine_id(&self) -> Option<&str> {
        self.current.as_ref().map(|machine| machine.machine_id.as_str())
    }

    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.ui.auto_rotate = auto_rotate;
        self.scene.set_auto_rotate(auto_rotate);
    }

    /// Acknowledge the front alert.
    pub fn dismiss_alert(&mut self) {
        self.ui.alerts.dismiss();
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text.into(), tone);
    }

    fn alert(&mut self, kind: AlertKind, message: String) {
        if kind == AlertKind::Error {
            self.set_status(message.replace('\n', " "), StatusTone::Error);
        }
        self.ui.alerts.push(kind, message);
    }

    /// Mirror the open machine's outstanding requests into the detail view.
    fn sync_busy_flags(&mut self) {
        self.ui.detail.history_loading = self.fences.history.is_pending();
        self.ui.detail.submitting = self.fences.reading.is_pending();
        self.ui.detail.reloading_model = self.fences.model.is_pending();
    }

    fn is_open(&self, machine_id: &str) -> bool {
        self.open_machine_id() == Some(machine_id)
    }
}
