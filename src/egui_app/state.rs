//! Shared state types for the egui UI.

mod add_machine;
mod alerts;
mod catalog;
mod detail;
mod numeric;
mod sensor_form;
mod status;

pub use add_machine::*;
pub use alerts::*;
pub use catalog::*;
pub use detail::*;
pub use numeric::*;
pub use sensor_form::*;
pub use status::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub catalog: CatalogState,
    pub detail: DetailState,
    pub sensor_form: SensorFormState,
    pub add_machine: AddMachineState,
    /// Blocking dialogs, shown one at a time in arrival order.
    pub alerts: AlertQueue,
    /// Backend base URL shown in the top bar.
    pub backend_label: String,
    pub auto_rotate: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            catalog: CatalogState::default(),
            detail: DetailState::default(),
            sensor_form: SensorFormState::default(),
            add_machine: AddMachineState::default(),
            alerts: AlertQueue::default(),
            backend_label: String::new(),
            auto_rotate: true,
        }
    }
}
