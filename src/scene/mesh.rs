use glam::{EulerRot, Mat4, Vec3};

/// Indexed triangle list in part-local coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    /// Counter-clockwise when seen from outside.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.triangles.is_empty()
    }

    /// Append another mesh, rebasing its indices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.triangles
            .extend(other.triangles.iter().map(|[a, b, c]| [a + base, b + base, c + base]));
    }
}

/// Axis-aligned bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self { min: first, max: first }, |bounds, point| Self {
            min: bounds.min.min(point),
            max: bounds.max.max(point),
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Phong-style surface parameters; colors are RGB in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

impl Material {
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            emissive: Vec3::ZERO,
            emissive_intensity: 0.0,
        }
    }

    pub fn glows(&self) -> bool {
        self.emissive_intensity > 0.0 && self.emissive != Vec3::ZERO
    }
}

/// Continuous rotation of a part about a model-space axis through `pivot`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub axis: Vec3,
    pub pivot: Vec3,
    /// Radians added per frame.
    pub step: f32,
    pub angle: f32,
}

impl Spin {
    pub fn new(axis: Vec3, pivot: Vec3, step: f32) -> Self {
        Self {
            axis: axis.normalize_or(Vec3::X),
            pivot,
            step,
            angle: 0.0,
        }
    }

    fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pivot)
            * Mat4::from_axis_angle(self.axis, self.angle)
            * Mat4::from_translation(-self.pivot)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelPart {
    pub name: String,
    pub mesh: Mesh,
    /// Part-local to model space.
    pub placement: Mat4,
    pub material: Material,
    pub spin: Option<Spin>,
}

impl ModelPart {
    pub fn new(name: impl Into<String>, mesh: Mesh, placement: Mat4, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            placement,
            material,
            spin: None,
        }
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = Some(spin);
        self
    }

    /// Part-local to model space, including the current spin.
    pub fn transform(&self) -> Mat4 {
        match &self.spin {
            Some(spin) => spin.matrix() * self.placement,
            None => self.placement,
        }
    }
}

/// Where a resident model came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelOrigin {
    Asset,
    Procedural,
}

/// A renderable model: parts plus the body orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub origin: ModelOrigin,
    pub parts: Vec<ModelPart>,
    /// Euler angles (radians) of the whole body.
    pub rotation: Vec3,
}

impl Model {
    pub fn new(origin: ModelOrigin, parts: Vec<ModelPart>) -> Self {
        Self {
            origin,
            parts,
            rotation: Vec3::ZERO,
        }
    }

    /// Model to world space.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Advance the body rotation and every part spin by one frame.
    pub fn advance(&mut self, body_step: Vec3) {
        self.rotation += body_step;
        for spin in self.parts.iter_mut().filter_map(|part| part.spin.as_mut()) {
            spin.angle = (spin.angle + spin.step) % std::f32::consts::TAU;
        }
    }

    pub fn set_material(&mut self, material: Material) {
        for part in &mut self.parts {
            part.material = material;
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|part| part.mesh.triangles.len()).sum()
    }

    /// Bounds of all parts in model space, ignoring spins.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.parts.iter().flat_map(|part| {
            part.mesh
                .positions
                .iter()
                .map(move |point| part.placement.transform_point3(*point))
        }))
    }
}
