use crate::health::StatusStyle;

/// One machine card in the catalog grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MachineCardView {
    pub machine_id: String,
    pub name: String,
    pub type_label: String,
    pub location: String,
    pub status_label: String,
    pub status_style: StatusStyle,
    /// `"123.4 hours"` or `"N/A"`.
    pub rul: String,
}

/// Catalog grid state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    pub cards: Vec<MachineCardView>,
    pub loading: bool,
    /// Whether at least one fetch has succeeded.
    pub loaded: bool,
}

impl CatalogState {
    pub fn card(&self, machine_id: &str) -> Option<&MachineCardView> {
        self.cards.iter().find(|card| card.machine_id == machine_id)
    }
}
