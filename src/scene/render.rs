//! Software projection of the resident model onto an egui painter.

use egui::{Color32, Pos2, Rect};
use glam::{Mat4, Vec2, Vec3, Vec4};

use super::mesh::Model;

pub const BACKGROUND: Color32 = Color32::from_rgb(0xf0, 0xf0, 0xf0);
const AMBIENT: f32 = 0x40 as f32 / 255.0;
const SUN_INTENSITY: f32 = 0.5;

/// Fixed perspective camera looking at the origin down -Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let projection =
            Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far);
        projection * Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y)
    }
}

/// Drawing surface size in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
        }
    }
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// A lit, camera-facing triangle in normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedTriangle {
    pub ndc: [Vec2; 3],
    pub depth: f32,
    pub color: Color32,
}

/// Light, cull and depth-sort every triangle of `model`, far to near.
pub fn shade(model: &Model, camera: &Camera, viewport: &Viewport) -> Vec<ShadedTriangle> {
    let view_projection = camera.view_projection(viewport.aspect());
    let body = model.matrix();
    let sun = Vec3::ONE.normalize();
    let mut shaded = Vec::with_capacity(model.triangle_count());
    for part in &model.parts {
        let to_world = body * part.transform();
        let world: Vec<Vec3> = part
            .mesh
            .positions
            .iter()
            .map(|point| to_world.transform_point3(*point))
            .collect();
        let material = part.material;
        for [a, b, c] in &part.mesh.triangles {
            let (Some(a), Some(b), Some(c)) = (
                world.get(*a as usize),
                world.get(*b as usize),
                world.get(*c as usize),
            ) else {
                continue;
            };
            let normal = (*b - *a).cross(*c - *a);
            if normal.dot(camera.eye - *a) <= 0.0 {
                continue;
            }
            let (Some(pa), Some(pb), Some(pc)) = (
                project(view_projection, *a),
                project(view_projection, *b),
                project(view_projection, *c),
            ) else {
                continue;
            };
            let diffuse = normal.normalize_or_zero().dot(sun).max(0.0) * SUN_INTENSITY;
            let lit = material.color * (AMBIENT + diffuse)
                + material.emissive * material.emissive_intensity;
            shaded.push(ShadedTriangle {
                ndc: [pa.truncate(), pb.truncate(), pc.truncate()],
                depth: (pa.z + pb.z + pc.z) / 3.0,
                color: to_color(lit),
            });
        }
    }
    shaded.sort_by(|left, right| right.depth.total_cmp(&left.depth));
    shaded
}

/// Paint the background and the model into `rect`.
pub fn paint(model: Option<&Model>, camera: &Camera, painter: &egui::Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
    let Some(model) = model else {
        return;
    };
    let viewport = Viewport {
        width: rect.width(),
        height: rect.height(),
    };
    let mut mesh = egui::Mesh::default();
    for triangle in shade(model, camera, &viewport) {
        let base = mesh.vertices.len() as u32;
        for point in triangle.ndc {
            mesh.colored_vertex(to_screen(point, rect), triangle.color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    if !mesh.is_empty() {
        painter.add(egui::Shape::mesh(mesh));
    }
}

/// Clip-space projection; `None` outside the near/far range.
fn project(view_projection: Mat4, point: Vec3) -> Option<Vec3> {
    let clip: Vec4 = view_projection * point.extend(1.0);
    if clip.w <= f32::EPSILON || clip.z < -clip.w || clip.z > clip.w {
        return None;
    }
    Some(clip.truncate() / clip.w)
}

fn to_screen(ndc: Vec2, rect: Rect) -> Pos2 {
    let half = rect.size() * 0.5;
    rect.center() + egui::vec2(ndc.x * half.x, -ndc.y * half.y)
}

fn to_color(rgb: Vec3) -> Color32 {
    let rgb = rgb.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    Color32::from_rgb(rgb.x.round() as u8, rgb.y.round() as u8, rgb.z.round() as u8)
}
