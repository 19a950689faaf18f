//! 3D stand-in for the selected machine.
//!
//! The scene owns one camera, one viewport and at most one resident model.
//! Models come from `<models_dir>/<type>.glb` when present and are otherwise
//! synthesized. Status colors are applied through [`Scene::recolor`].

pub mod asset;
pub mod mesh;
pub mod procedural;
pub mod render;

use std::path::PathBuf;

use glam::Vec3;

use crate::backend::MachineType;
use crate::health::{HealthStatus, StatusStyle, parse_hex_color};
pub use mesh::{Material, Model, ModelOrigin};
pub use render::{Camera, Viewport};

/// Per-frame body rotation in radians (x, y, z).
const BODY_STEP: Vec3 = Vec3::new(0.01, 0.01, 0.0);
/// Glow strength applied to critical machines.
pub const CRITICAL_EMISSIVE_INTENSITY: f32 = 0.3;

/// Render loop lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Running,
    Stopped,
}

/// The single model slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResidentModel {
    #[default]
    None,
    Motor(Model),
    Blade(Model),
}

impl ResidentModel {
    fn new(machine_type: MachineType, model: Model) -> Self {
        match machine_type {
            MachineType::Motor => Self::Motor(model),
            MachineType::Blade => Self::Blade(model),
        }
    }

    pub fn machine_type(&self) -> Option<MachineType> {
        match self {
            Self::None => None,
            Self::Motor(_) => Some(MachineType::Motor),
            Self::Blade(_) => Some(MachineType::Blade),
        }
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::None => None,
            Self::Motor(model) | Self::Blade(model) => Some(model),
        }
    }

    fn model_mut(&mut self) -> Option<&mut Model> {
        match self {
            Self::None => None,
            Self::Motor(model) | Self::Blade(model) => Some(model),
        }
    }
}

/// Observable scene state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneState {
    Uninitialized,
    Idle,
    Displaying(MachineType),
    Stopped,
}

/// What [`Scene::load_model`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOutcome {
    pub machine_type: MachineType,
    pub origin: ModelOrigin,
    /// Type of the model that was removed to make room, if any.
    pub replaced: Option<MachineType>,
}

pub struct Scene {
    lifecycle: Lifecycle,
    camera: Camera,
    viewport: Viewport,
    resident: ResidentModel,
    models_dir: PathBuf,
    auto_rotate: bool,
}

impl Scene {
    pub fn new(models_dir: impl Into<PathBuf>, auto_rotate: bool) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            camera: Camera::default(),
            viewport: Viewport::default(),
            resident: ResidentModel::None,
            models_dir: models_dir.into(),
            auto_rotate,
        }
    }

    /// Set up camera and viewport and begin animating. Repeated calls are
    /// ignored.
    pub fn start(&mut self, width: f32, height: f32) {
        if self.lifecycle == Lifecycle::Running {
            return;
        }
        self.camera = Camera::default();
        self.viewport = Viewport { width, height };
        self.lifecycle = Lifecycle::Running;
        tracing::debug!("Scene started at {width}x{height}");
    }

    /// End the render loop and release the resident model.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;
        self.resident = ResidentModel::None;
        tracing::debug!("Scene stopped");
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn state(&self) -> SceneState {
        match (self.lifecycle, self.resident.machine_type()) {
            (Lifecycle::Uninitialized, _) => SceneState::Uninitialized,
            (Lifecycle::Stopped, _) => SceneState::Stopped,
            (Lifecycle::Running, None) => SceneState::Idle,
            (Lifecycle::Running, Some(machine_type)) => SceneState::Displaying(machine_type),
        }
    }

    /// Replace the resident model with one for `machine_type`.
    ///
    /// The previous model is removed first. A missing or unusable asset falls
    /// back to procedural geometry and is only logged.
    pub fn load_model(&mut self, machine_type: MachineType) -> LoadOutcome {
        let replaced = std::mem::take(&mut self.resident).machine_type();
        let material = default_material();
        let model = match asset::load_model_asset(&self.models_dir, machine_type, material) {
            Ok(model) => {
                tracing::info!(
                    "Loaded {} model asset ({} triangles)",
                    machine_type.as_str(),
                    model.triangle_count()
                );
                model
            }
            Err(asset::AssetError::Missing(path)) => {
                tracing::debug!("No asset at {}; using placeholder", path.display());
                procedural::build(machine_type, material)
            }
            Err(err) => {
                tracing::warn!("Falling back to placeholder model: {err}");
                procedural::build(machine_type, material)
            }
        };
        let origin = model.origin;
        self.resident = ResidentModel::new(machine_type, model);
        LoadOutcome {
            machine_type,
            origin,
            replaced,
        }
    }

    /// Tint the resident model. Critical machines also glow in the same
    /// color. Returns `false` when there is nothing to tint.
    pub fn recolor(&mut self, color_hex: &str, status: &HealthStatus) -> bool {
        let Some(model) = self.resident.model_mut() else {
            return false;
        };
        let color = parse_hex_color(color_hex).unwrap_or_else(|| status.style().color());
        let rgb = Vec3::new(color.r() as f32, color.g() as f32, color.b() as f32) / 255.0;
        let material = if status.is_critical() {
            Material {
                color: rgb,
                emissive: rgb,
                emissive_intensity: CRITICAL_EMISSIVE_INTENSITY,
            }
        } else {
            Material::new(rgb)
        };
        model.set_material(material);
        true
    }

    /// Advance one frame. Returns whether the caller should keep repainting.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if !self.auto_rotate {
            return true;
        }
        if let Some(model) = self.resident.model_mut() {
            model.advance(BODY_STEP);
        }
        true
    }

    /// Track a new drawing surface size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn resident(&self) -> &ResidentModel {
        &self.resident
    }

    pub fn model(&self) -> Option<&Model> {
        self.resident.model()
    }

    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.auto_rotate = auto_rotate;
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Paint into `rect`, following its size.
    pub fn paint(&mut self, painter: &egui::Painter, rect: egui::Rect) {
        if rect.width() != self.viewport.width || rect.height() != self.viewport.height {
            self.resize(rect.width(), rect.height());
        }
        render::paint(self.resident.model(), &self.camera, painter, rect);
    }
}

/// Untinted look before any prediction is known.
fn default_material() -> Material {
    let color = StatusStyle::SECONDARY.color();
    Material::new(Vec3::new(color.r() as f32, color.g() as f32, color.b() as f32) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::asset::test_assets::triangle_glb;
    use tempfile::tempdir;

    fn running_scene(models_dir: PathBuf) -> Scene {
        let mut scene = Scene::new(models_dir, true);
        scene.start(640.0, 480.0);
        scene
    }

    fn materials(scene: &Scene) -> Vec<Material> {
        scene
            .model()
            .unwrap()
            .parts
            .iter()
            .map(|part| part.material)
            .collect()
    }

    #[test]
    fn lifecycle_moves_through_states() {
        let dir = tempdir().unwrap();
        let mut scene = Scene::new(dir.path(), true);
        assert_eq!(scene.state(), SceneState::Uninitialized);
        assert!(!scene.tick());
        scene.start(320.0, 200.0);
        assert_eq!(scene.state(), SceneState::Idle);
        assert!(scene.tick());
        scene.load_model(MachineType::Blade);
        assert_eq!(scene.state(), SceneState::Displaying(MachineType::Blade));
        scene.stop();
        assert_eq!(scene.state(), SceneState::Stopped);
        assert!(scene.model().is_none());
        assert!(!scene.tick());
    }

    #[test]
    fn missing_asset_falls_back_to_placeholder() {
        let dir = tempdir().unwrap();
        let mut scene = running_scene(dir.path().to_path_buf());
        let outcome = scene.load_model(MachineType::Motor);
        assert_eq!(outcome.origin, ModelOrigin::Procedural);
        assert_eq!(outcome.replaced, None);
        assert!(matches!(scene.resident(), ResidentModel::Motor(_)));
    }

    #[test]
    fn invalid_asset_falls_back_to_placeholder() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("blade.glb"), b"\0\0\0\0garbage").unwrap();
        let mut scene = running_scene(dir.path().to_path_buf());
        let outcome = scene.load_model(MachineType::Blade);
        assert_eq!(outcome.origin, ModelOrigin::Procedural);
        assert_eq!(scene.model().unwrap().parts.len(), 6);
    }

    #[test]
    fn asset_load_replaces_previous_model() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("motor.glb"), triangle_glb("body")).unwrap();
        let mut scene = running_scene(dir.path().to_path_buf());
        scene.load_model(MachineType::Blade);
        let outcome = scene.load_model(MachineType::Motor);
        assert_eq!(outcome.origin, ModelOrigin::Asset);
        assert_eq!(outcome.replaced, Some(MachineType::Blade));
        assert_eq!(scene.resident().machine_type(), Some(MachineType::Motor));
        assert_eq!(scene.model().unwrap().triangle_count(), 1);
    }

    #[test]
    fn critical_recolor_glows_and_others_clear_it() {
        let dir = tempdir().unwrap();
        let mut scene = running_scene(dir.path().to_path_buf());
        scene.load_model(MachineType::Motor);

        assert!(scene.recolor("#dc3545", &HealthStatus::Critical));
        for material in materials(&scene) {
            assert!(material.glows());
            assert_eq!(material.emissive, material.color);
            assert_eq!(material.emissive_intensity, CRITICAL_EMISSIVE_INTENSITY);
        }

        assert!(scene.recolor("#ffc107", &HealthStatus::Warning));
        for material in materials(&scene) {
            assert!(!material.glows());
            assert_eq!(material.emissive_intensity, 0.0);
            assert!((material.color.x - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn recolor_without_model_is_noop() {
        let dir = tempdir().unwrap();
        let mut scene = running_scene(dir.path().to_path_buf());
        assert!(!scene.recolor("#28a745", &HealthStatus::Healthy));
    }

    #[test]
    fn tick_rotates_only_when_enabled() {
        let dir = tempdir().unwrap();
        let mut scene = running_scene(dir.path().to_path_buf());
        scene.load_model(MachineType::Motor);
        scene.tick();
        assert!((scene.model().unwrap().rotation.x - 0.01).abs() < 1e-6);
        scene.set_auto_rotate(false);
        assert!(scene.tick());
        assert!((scene.model().unwrap().rotation.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn resize_updates_aspect() {
        let dir = tempdir().unwrap();
        let mut scene = running_scene(dir.path().to_path_buf());
        scene.resize(1000.0, 500.0);
        assert_eq!(scene.viewport().aspect(), 2.0);
    }
}
