//! Library exports for the dashboard binary and integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Prediction service client.
pub mod backend;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Health status table shared by badges and the 3D view.
pub mod health;
pub(crate) mod http_client;
/// Tracing setup.
pub mod logging;
/// 3D machine view.
pub mod scene;
