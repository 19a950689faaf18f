//! `.glb` model assets looked up by machine type.

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use thiserror::Error;

use super::mesh::{Material, Mesh, Model, ModelOrigin, ModelPart, Spin};
use crate::backend::MachineType;

/// Largest dimension of a loaded asset after normalization.
const TARGET_EXTENT: f32 = 2.5;
const SHAFT_SPIN_STEP: f32 = 0.1;
const ROTOR_SPIN_STEP: f32 = 0.05;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("No model asset at {0}")]
    Missing(PathBuf),
    #[error("Failed to read model asset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid glTF in {path}: {source}")]
    Parse { path: PathBuf, source: gltf::Error },
    #[error("Model asset {0} has no triangle geometry")]
    Empty(PathBuf),
}

/// `<models_dir>/<type>.glb`
pub fn asset_path(models_dir: &Path, machine_type: MachineType) -> PathBuf {
    models_dir.join(format!("{}.glb", machine_type.as_str()))
}

/// Load and normalize the asset for `machine_type`.
pub fn load_model_asset(
    models_dir: &Path,
    machine_type: MachineType,
    material: Material,
) -> Result<Model, AssetError> {
    let path = asset_path(models_dir, machine_type);
    if !path.is_file() {
        return Err(AssetError::Missing(path));
    }
    let bytes = std::fs::read(&path).map_err(|source| AssetError::Read {
        path: path.clone(),
        source,
    })?;
    model_from_glb(&bytes, machine_type, material, &path)
}

fn model_from_glb(
    bytes: &[u8],
    machine_type: MachineType,
    material: Material,
    path: &Path,
) -> Result<Model, AssetError> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|source| AssetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let Some(scene) = document
        .default_scene()
        .or_else(|| document.scenes().next())
    else {
        return Err(AssetError::Empty(path.to_path_buf()));
    };

    let mut parts = Vec::new();
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, &buffers, material, &mut parts);
    }
    let mut model = Model::new(ModelOrigin::Asset, parts);
    let Some(bounds) = model.bounds() else {
        return Err(AssetError::Empty(path.to_path_buf()));
    };
    let largest = bounds.extent().max_element();
    let scale = if largest > f32::EPSILON {
        TARGET_EXTENT / largest
    } else {
        1.0
    };
    let normalize = Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-bounds.center());
    for part in &mut model.parts {
        part.placement = normalize * part.placement;
    }
    attach_spins(&mut model, machine_type);
    Ok(model)
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    material: Material,
    parts: &mut Vec<ModelPart>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let name = node
            .name()
            .or_else(|| mesh.name())
            .map(str::to_string)
            .unwrap_or_else(|| format!("node-{}", node.index()));
        let mut geometry = Mesh::default();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            geometry.append(&read_primitive(&primitive, buffers));
        }
        if !geometry.is_empty() {
            parts.push(ModelPart::new(name, geometry, world, material));
        }
    }
    for child in node.children() {
        collect_node(&child, world, buffers, material, parts);
    }
}

fn read_primitive(primitive: &gltf::Primitive<'_>, buffers: &[gltf::buffer::Data]) -> Mesh {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
    let Some(positions) = reader.read_positions() else {
        return Mesh::default();
    };
    let positions: Vec<Vec3> = positions.map(Vec3::from_array).collect();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let count = positions.len() as u32;
    let triangles = indices
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]])
        .filter(|tri| tri.iter().all(|index| *index < count))
        .collect();
    Mesh {
        positions,
        triangles,
    }
}

/// Motor parts named like a shaft spin about X through their own center;
/// blade parts named like a rotor spin about Z through the model origin.
fn attach_spins(model: &mut Model, machine_type: MachineType) {
    for part in &mut model.parts {
        let name = part.name.to_ascii_lowercase();
        let spin = match machine_type {
            MachineType::Motor if name.contains("shaft") => {
                let pivot = super::mesh::Bounds::from_points(
                    part.mesh
                        .positions
                        .iter()
                        .map(|point| part.placement.transform_point3(*point)),
                )
                .map_or(Vec3::ZERO, |bounds| bounds.center());
                Some(Spin::new(Vec3::X, pivot, SHAFT_SPIN_STEP))
            }
            MachineType::Blade if name.contains("rotor") => {
                Some(Spin::new(Vec3::Z, Vec3::ZERO, ROTOR_SPIN_STEP))
            }
            _ => None,
        };
        part.spin = spin;
    }
}

#[cfg(test)]
pub(crate) mod test_assets {
    /// Minimal binary glTF holding one named triangle.
    pub(crate) fn triangle_glb(node_name: &str) -> Vec<u8> {
        let mut bin = Vec::new();
        for value in [0.0f32, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
            bin.extend_from_slice(&value.to_le_bytes());
        }
        let json = format!(
            concat!(
                r#"{{"asset":{{"version":"2.0"}},"scene":0,"scenes":[{{"nodes":[0]}}],"#,
                r#""nodes":[{{"mesh":0,"name":"{name}"}}],"#,
                r#""meshes":[{{"primitives":[{{"attributes":{{"POSITION":0}}}}]}}],"#,
                r#""accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","#,
                r#""min":[0.0,0.0,0.0],"max":[2.0,1.0,0.0]}}],"#,
                r#""bufferViews":[{{"buffer":0,"byteLength":36}}],"#,
                r#""buffers":[{{"byteLength":36}}]}}"#
            ),
            name = node_name
        );
        let mut json = json.into_bytes();
        while json.len() % 4 != 0 {
            json.push(b' ');
        }
        let total = 12 + 8 + json.len() + 8 + bin.len();
        let mut glb = Vec::with_capacity(total);
        glb.extend_from_slice(b"glTF");
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total as u32).to_le_bytes());
        glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
        glb.extend_from_slice(b"JSON");
        glb.extend_from_slice(&json);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(b"BIN\0");
        glb.extend_from_slice(&bin);
        glb
    }
}

#[cfg(test)]
mod tests {
    use super::test_assets::triangle_glb;
    use super::*;
    use tempfile::tempdir;

    fn material() -> Material {
        Material::new(Vec3::ONE)
    }

    #[test]
    fn asset_path_uses_type_stem() {
        assert_eq!(
            asset_path(Path::new("models"), MachineType::Blade),
            PathBuf::from("models").join("blade.glb")
        );
    }

    #[test]
    fn missing_asset_is_reported() {
        let dir = tempdir().unwrap();
        let err = load_model_asset(dir.path(), MachineType::Motor, material()).unwrap_err();
        assert!(matches!(err, AssetError::Missing(_)));
    }

    #[test]
    fn corrupt_asset_is_a_parse_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("motor.glb"), b"definitely not gltf").unwrap();
        let err = load_model_asset(dir.path(), MachineType::Motor, material()).unwrap_err();
        assert!(matches!(err, AssetError::Parse { .. }));
    }

    #[test]
    fn loads_and_normalizes_triangle_asset() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("motor.glb"), triangle_glb("drive shaft")).unwrap();
        let model = load_model_asset(dir.path(), MachineType::Motor, material()).unwrap();
        assert_eq!(model.origin, ModelOrigin::Asset);
        assert_eq!(model.triangle_count(), 1);
        let bounds = model.bounds().unwrap();
        assert!((bounds.extent().max_element() - TARGET_EXTENT).abs() < 1e-4);
        assert!(bounds.center().length() < 1e-4);
        assert!(model.parts[0].spin.is_some());
    }

    #[test]
    fn blade_asset_without_rotor_does_not_spin() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("blade.glb"), triangle_glb("panel")).unwrap();
        let model = load_model_asset(dir.path(), MachineType::Blade, material()).unwrap();
        assert!(model.parts.iter().all(|part| part.spin.is_none()));
    }
}
