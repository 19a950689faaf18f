//! egui front end: controller, UI state, view models and renderer.

/// Controller owning dashboard state and background requests.
pub mod controller;
/// UI state shared between the controller and the renderer.
pub mod state;
/// egui renderer.
pub mod ui;
/// Conversions from service responses to view structs.
pub mod view_model;
