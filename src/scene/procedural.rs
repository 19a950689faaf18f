//! Placeholder geometry used when no asset is available for a machine type.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec3};

use super::mesh::{Material, Mesh, Model, ModelOrigin, ModelPart, Spin};
use crate::backend::MachineType;

const CYLINDER_SEGMENTS: u32 = 24;
const MOTOR_SHAFT_STEP: f32 = 0.1;
const BLADE_ROTOR_STEP: f32 = 0.05;
const BLADE_PANEL_COUNT: u32 = 5;

/// Build the stand-in model for a machine type.
pub fn build(machine_type: MachineType, material: Material) -> Model {
    match machine_type {
        MachineType::Motor => motor(material),
        MachineType::Blade => blade(material),
    }
}

/// Cylindrical housing with a shaft running through it along X.
fn motor(material: Material) -> Model {
    let along_x = Mat4::from_rotation_z(-FRAC_PI_2);
    let housing = ModelPart::new(
        "housing",
        cylinder(0.8, 2.0, CYLINDER_SEGMENTS),
        along_x,
        material,
    );
    let shaft = ModelPart::new("shaft", cylinder(0.15, 3.0, 12), along_x, material)
        .with_spin(Spin::new(Vec3::X, Vec3::ZERO, MOTOR_SHAFT_STEP));
    Model::new(ModelOrigin::Procedural, vec![housing, shaft])
}

/// Hub facing +Z with evenly spaced radial panels; the whole rotor spins.
fn blade(material: Material) -> Model {
    let rotor_spin = Spin::new(Vec3::Z, Vec3::ZERO, BLADE_ROTOR_STEP);
    let mut parts = vec![
        ModelPart::new(
            "hub",
            cylinder(0.3, 0.4, CYLINDER_SEGMENTS),
            Mat4::from_rotation_x(FRAC_PI_2),
            material,
        )
        .with_spin(rotor_spin),
    ];
    let panel = cuboid(Vec3::new(0.35, 1.6, 0.06));
    for index in 0..BLADE_PANEL_COUNT {
        let angle = index as f32 * TAU / BLADE_PANEL_COUNT as f32;
        let placement =
            Mat4::from_rotation_z(angle) * Mat4::from_translation(Vec3::new(0.0, 1.1, 0.0));
        parts.push(
            ModelPart::new(format!("panel-{index}"), panel.clone(), placement, material)
                .with_spin(rotor_spin),
        );
    }
    Model::new(ModelOrigin::Procedural, parts)
}

/// Closed cylinder centered on the origin with its axis along Y.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut positions = Vec::with_capacity(segments as usize * 2 + 2);
    for index in 0..segments {
        let theta = index as f32 * TAU / segments as f32;
        let (sin, cos) = theta.sin_cos();
        positions.push(Vec3::new(radius * cos, -half, radius * sin));
        positions.push(Vec3::new(radius * cos, half, radius * sin));
    }
    let bottom_center = positions.len() as u32;
    positions.push(Vec3::new(0.0, -half, 0.0));
    let top_center = bottom_center + 1;
    positions.push(Vec3::new(0.0, half, 0.0));

    let mut triangles = Vec::with_capacity(segments as usize * 4);
    for index in 0..segments {
        let next = (index + 1) % segments;
        let (b0, t0) = (index * 2, index * 2 + 1);
        let (b1, t1) = (next * 2, next * 2 + 1);
        triangles.push([b0, t0, b1]);
        triangles.push([b1, t0, t1]);
        triangles.push([top_center, t1, t0]);
        triangles.push([bottom_center, b0, b1]);
    }
    Mesh {
        positions,
        triangles,
    }
}

/// Box centered on the origin.
pub fn cuboid(size: Vec3) -> Mesh {
    let half = size * 0.5;
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let mut mesh = Mesh::default();
    for (normal, u, v) in faces {
        let center = normal * half;
        let (u, v) = (u * half, v * half);
        let base = mesh.positions.len() as u32;
        mesh.positions.extend([
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ]);
        mesh.triangles
            .extend([[base, base + 1, base + 2], [base, base + 2, base + 3]]);
    }
    mesh
}
