use super::*;
use crate::backend::{
    MachineDetail, MachineSummary, MachineTypeInfo, NewMachine, PredictionHistoryEntry,
    PredictionResult, SensorReading,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-memory service with per-machine response delays.
#[derive(Default)]
pub(super) struct FakeBackend {
    pub(super) machines: Mutex<Vec<MachineSummary>>,
    pub(super) list_error: Mutex<Option<BackendError>>,
    pub(super) details: Mutex<HashMap<String, MachineDetail>>,
    pub(super) history: Mutex<HashMap<String, Vec<PredictionHistoryEntry>>>,
    pub(super) prediction: Mutex<Option<PredictionResult>>,
    pub(super) predict_error: Mutex<Option<BackendError>>,
    pub(super) create_error: Mutex<Option<BackendError>>,
    pub(super) delays: Mutex<HashMap<String, Duration>>,
    pub(super) prediction_delay: Mutex<Option<Duration>>,
    pub(super) created: Mutex<Vec<NewMachine>>,
    pub(super) readings: Mutex<Vec<SensorReading>>,
}

impl FakeBackend {
    pub(super) fn add_machine(&self, detail: MachineDetail) {
        let summary = MachineSummary {
            machine_id: detail.machine_id.clone(),
            name: detail.name.clone(),
            machine_type: detail.machine_type.clone(),
            location: detail.location.clone(),
            current_status: detail
                .latest_prediction
                .as_ref()
                .map(|latest| latest.health_status.clone()),
            current_rul: detail.latest_prediction.as_ref().map(|latest| latest.rul_hours),
        };
        self.machines.lock().unwrap().push(summary);
        self.details
            .lock()
            .unwrap()
            .insert(detail.machine_id.clone(), detail);
    }

    pub(super) fn delay(&self, machine_id: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(machine_id.to_string(), delay);
    }

    /// Hold every prediction back by `delay`.
    pub(super) fn delay_predictions(&self, delay: Duration) {
        *self.prediction_delay.lock().unwrap() = Some(delay);
    }

    pub(super) fn respond_with(&self, prediction: PredictionResult) {
        *self.prediction.lock().unwrap() = Some(prediction);
    }

    fn wait(&self, machine_id: &str) {
        let delay = self.delays.lock().unwrap().get(machine_id).copied();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
    }

    fn not_found(machine_id: &str) -> BackendError {
        BackendError::Status {
            code: 404,
            detail: format!("Machine {machine_id} not found"),
        }
    }
}

impl TwinBackend for FakeBackend {
    fn list_machines(&self) -> Result<Vec<MachineSummary>, BackendError> {
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.machines.lock().unwrap().clone())
    }

    fn machine(&self, machine_id: &str) -> Result<MachineDetail, BackendError> {
        self.wait(machine_id);
        self.details
            .lock()
            .unwrap()
            .get(machine_id)
            .cloned()
            .ok_or_else(|| Self::not_found(machine_id))
    }

    fn machine_type(&self, machine_id: &str) -> Result<MachineTypeInfo, BackendError> {
        let detail = self.machine(machine_id)?;
        Ok(MachineTypeInfo {
            machine_id: Some(detail.machine_id),
            machine_type: detail.machine_type,
        })
    }

    fn history(
        &self,
        machine_id: &str,
        limit: u32,
    ) -> Result<Vec<PredictionHistoryEntry>, BackendError> {
        self.wait(machine_id);
        let history = self.history.lock().unwrap();
        let entries = history.get(machine_id).cloned().unwrap_or_default();
        Ok(entries.into_iter().take(limit as usize).collect())
    }

    fn create_machine(&self, machine: &NewMachine) -> Result<(), BackendError> {
        if let Some(err) = self.create_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.created.lock().unwrap().push(machine.clone());
        self.add_machine(machine_detail(
            &machine.machine_id,
            &machine.name,
            machine.machine_type.as_str(),
            None,
        ));
        Ok(())
    }

    fn predict(&self, reading: &SensorReading) -> Result<PredictionResult, BackendError> {
        if let Some(err) = self.predict_error.lock().unwrap().clone() {
            return Err(err);
        }
        let delay = *self.prediction_delay.lock().unwrap();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        self.readings.lock().unwrap().push(reading.clone());
        let prediction = self
            .prediction
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| prediction("Healthy", 500.0, false));
        let entry = PredictionHistoryEntry {
            timestamp: "2024-06-01 12:00:00".into(),
            health_status: prediction.health_status.clone(),
            rul_hours: prediction.rul_hours,
            confidence: Some(prediction.confidence()),
            maintenance_required: prediction.maintenance_required,
        };
        self.history
            .lock()
            .unwrap()
            .entry(reading.machine_id().to_string())
            .or_default()
            .insert(0, entry);
        if let Some(summary) = self
            .machines
            .lock()
            .unwrap()
            .iter_mut()
            .find(|summary| summary.machine_id == reading.machine_id())
        {
            summary.current_status = Some(prediction.health_status.clone());
            summary.current_rul = Some(prediction.rul_hours);
        }
        Ok(prediction)
    }
}

pub(super) fn machine_detail(
    machine_id: &str,
    name: &str,
    machine_type: &str,
    latest: Option<PredictionHistoryEntry>,
) -> MachineDetail {
    MachineDetail {
        machine_id: machine_id.into(),
        name: name.into(),
        machine_type: machine_type.into(),
        manufacturer: Some("Acme".into()),
        model: None,
        location: Some("Hall 2".into()),
        installation_date: Some("2023-01-15".into()),
        status: Some("active".into()),
        details: None,
        latest_prediction: latest,
    }
}

pub(super) fn history_entry(status: &str, rul_hours: f64) -> PredictionHistoryEntry {
    PredictionHistoryEntry {
        timestamp: "2024-05-01 08:00:00".into(),
        health_status: HealthStatus::parse(status),
        rul_hours,
        confidence: Some(0.9),
        maintenance_required: false,
    }
}

pub(super) fn prediction(status: &str, rul_hours: f64, maintenance: bool) -> PredictionResult {
    PredictionResult {
        health_status: HealthStatus::parse(status),
        rul_hours,
        confidence: Some(0.91),
        confidence_scores: BTreeMap::new(),
        color_code: None,
        maintenance_required: maintenance,
    }
}

/// Controller over `backend` with an empty models directory.
pub(super) fn controller_with(backend: Arc<FakeBackend>) -> EguiController {
    let models = tempfile::tempdir().unwrap();
    let settings = AppSettings {
        models_dir: models.path().to_path_buf(),
        ..AppSettings::default()
    };
    std::mem::forget(models);
    let backend: Arc<dyn TwinBackend> = backend;
    let mut controller = EguiController::new(settings, backend);
    controller.local_offset = UtcOffset::UTC;
    controller
}

/// Poll until every spawned job has reported, including follow-ups.
pub(super) fn settle(controller: &mut EguiController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller.poll_jobs();
        if !controller.has_pending_jobs() {
            return;
        }
        assert!(Instant::now() < deadline, "background jobs did not finish");
        std::thread::sleep(Duration::from_millis(2));
    }
}
