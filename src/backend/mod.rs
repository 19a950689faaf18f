//! Client for the predictive-maintenance service.
//!
//! [`TwinBackend`] is the seam the controller talks through; [`HttpBackend`]
//! is the real implementation over the shared HTTP agent.

mod api;
mod error;
mod types;

pub use api::HttpBackend;
pub use error::BackendError;
pub use types::*;

/// Operations the dashboard needs from the service.
///
/// Calls block; the controller runs them on worker threads.
pub trait TwinBackend: Send + Sync {
    /// `GET /machines/`
    fn list_machines(&self) -> Result<Vec<MachineSummary>, BackendError>;
    /// `GET /machines/{id}`
    fn machine(&self, machine_id: &str) -> Result<MachineDetail, BackendError>;
    /// `GET /machines/{id}/type`
    fn machine_type(&self, machine_id: &str) -> Result<MachineTypeInfo, BackendError>;
    /// `GET /machines/{id}/history?limit=N`, newest first.
    fn history(
        &self,
        machine_id: &str,
        limit: u32,
    ) -> Result<Vec<PredictionHistoryEntry>, BackendError>;
    /// `POST /machines/`
    fn create_machine(&self, machine: &NewMachine) -> Result<(), BackendError>;
    /// `POST /predict/`
    fn predict(&self, reading: &SensorReading) -> Result<PredictionResult, BackendError>;
}
