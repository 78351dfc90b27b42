//! Scene graph types for glint.
//!
//! This module defines the loaded scene: shared materials, placed geometry,
//! the camera and the render settings. All of it is immutable once loading
//! finishes.

use std::path::PathBuf;
use std::sync::Arc;

use glint_math::{build_transformation_matrix, Mat4, UVec2, Vec2, Vec3};

use crate::material::Material;

/// Shape of a scene object.
#[derive(Clone, Debug, PartialEq)]
pub enum GeomKind {
    /// Unit sphere in object space
    Sphere,
    /// Unit cube in object space
    Cube,
    /// Triangle mesh asset; triangles are built by the asset loader
    Mesh { path: PathBuf },
}

/// A placed scene object.
#[derive(Clone, Debug)]
pub struct Geom {
    pub kind: GeomKind,

    /// Index into [`Scene::materials`]
    pub material_id: usize,

    pub translation: Vec3,

    /// Euler rotation in degrees
    pub rotation: Vec3,

    pub scale: Vec3,

    /// Object-to-world matrix
    pub transform: Mat4,
    pub inverse_transform: Mat4,
    /// Inverse transpose, for transforming normals
    pub inv_transpose: Mat4,
}

impl Geom {
    /// Create a geom and derive its matrices from the SRT components.
    pub fn new(
        kind: GeomKind,
        material_id: usize,
        translation: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Self {
        let transform = build_transformation_matrix(translation, rotation, scale);
        let inverse_transform = transform.inverse();
        Self {
            kind,
            material_id,
            translation,
            rotation,
            scale,
            transform,
            inverse_transform,
            inv_transpose: inverse_transform.transpose(),
        }
    }

    /// Transform an object-space normal to world space.
    pub fn world_normal(&self, object_normal: Vec3) -> Vec3 {
        self.inv_transpose
            .transform_vector3(object_normal)
            .normalize_or_zero()
    }
}

/// Pinhole camera derived from the scene file.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub resolution: UVec2,
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub view: Vec3,
    pub right: Vec3,
    /// Horizontal and vertical field of view in degrees
    pub fov: Vec2,
    /// World-space size of one pixel on the image plane at unit distance
    pub pixel_length: Vec2,
}

impl Camera {
    /// Build a camera from its scene-file parameters.
    ///
    /// `fovy` is in degrees; the horizontal fov follows from the aspect ratio.
    pub fn new(resolution: UVec2, fovy: f32, position: Vec3, look_at: Vec3, up: Vec3) -> Self {
        let width = resolution.x.max(1) as f32;
        let height = resolution.y.max(1) as f32;

        let yscaled = fovy.to_radians().tan();
        let xscaled = yscaled * width / height;
        let fovx = xscaled.atan().to_degrees();

        let view = (look_at - position).normalize_or_zero();
        let right = view.cross(up).normalize_or_zero();

        Self {
            resolution,
            position,
            look_at,
            up,
            view,
            right,
            fov: Vec2::new(fovx, fovy),
            pixel_length: Vec2::new(2.0 * xscaled / width, 2.0 * yscaled / height),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.resolution.x as usize * self.resolution.y as usize
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(UVec2::new(800, 800), 45.0, Vec3::new(0.0, 5.0, 10.5), Vec3::new(0.0, 5.0, 0.0), Vec3::Y)
    }
}

/// Render settings carried by the scene file.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    /// Number of progressive iterations
    pub iterations: u32,
    /// Maximum bounces per path
    pub trace_depth: u32,
    /// Output image base name
    pub image_name: String,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            iterations: 5000,
            trace_depth: 8,
            image_name: "render".to_string(),
        }
    }
}

/// A complete loaded scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Materials, indexed by material id
    pub materials: Vec<Arc<Material>>,

    pub geoms: Vec<Geom>,

    pub camera: Camera,

    pub state: RenderState,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        self.materials.push(Arc::new(material));
        id
    }

    /// Get a material by ID.
    pub fn get_material(&self, id: usize) -> Option<&Arc<Material>> {
        self.materials.get(id)
    }

    /// Find a material ID by name.
    pub fn material_id(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn add_geom(&mut self, geom: Geom) {
        self.geoms.push(geom);
    }

    pub fn geom_count(&self) -> usize {
        self.geoms.len()
    }

    /// Material of a geom.
    pub fn geom_material(&self, geom: &Geom) -> Option<&Arc<Material>> {
        self.get_material(geom.material_id)
    }
}
