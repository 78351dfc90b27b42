//! JSON scene loading.
//!
//! A scene file has three top-level blocks:
//!
//! - `Materials`: name → `{ TYPE, RGB, EMITTANCE?, ROUGHNESS? }`
//! - `Objects`: list of `{ TYPE, MATERIAL, TRANS, ROTAT, SCALE, FILEPATH? }`
//! - `Camera`: `{ RES, FOVY, ITERATIONS, DEPTH, FILE, EYE, LOOKAT, UP }`
//!
//! Material ids are assigned in sorted name order. Every problem found here
//! is a configuration error and is reported as a [`LoadError`]; callers are
//! expected to abort before rendering.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use glint_math::{UVec2, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::material::{Color, Material, MaterialKind};
use crate::scene::{Camera, Geom, GeomKind, RenderState, Scene};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported scene format: {0} (expected .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Material '{material}' has unknown type '{type_name}'")]
    UnknownMaterialType { material: String, type_name: String },

    #[error("Material '{material}' is missing required field {field}")]
    MissingField {
        material: String,
        field: &'static str,
    },

    #[error("Object {index} references undefined material '{material}'")]
    UndefinedMaterial { index: usize, material: String },

    #[error("Object {index} has unknown type '{type_name}'")]
    UnknownObjectType { index: usize, type_name: String },

    #[error("Mesh object {0} has no FILEPATH")]
    MissingMeshPath(usize),

    #[error("Mesh file not readable: {0}")]
    MeshNotFound(PathBuf),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize)]
struct SceneFile {
    #[serde(rename = "Materials")]
    materials: BTreeMap<String, MaterialRecord>,
    #[serde(rename = "Objects", default)]
    objects: Vec<ObjectRecord>,
    #[serde(rename = "Camera")]
    camera: CameraRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct MaterialRecord {
    #[serde(rename = "TYPE")]
    kind: String,
    rgb: Option<[f32; 3]>,
    emittance: Option<f32>,
    roughness: Option<f32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct ObjectRecord {
    #[serde(rename = "TYPE")]
    kind: String,
    material: String,
    trans: [f32; 3],
    rotat: [f32; 3],
    scale: [f32; 3],
    filepath: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct CameraRecord {
    res: [u32; 2],
    fovy: f32,
    iterations: u32,
    depth: u32,
    file: String,
    eye: [f32; 3],
    lookat: [f32; 3],
    up: [f32; 3],
}

/// Load a scene file from disk.
///
/// Relative mesh paths are resolved against the scene file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Reading scene from {}", path.display());

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(LoadError::UnsupportedFormat(path.to_path_buf()));
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let contents = std::fs::read_to_string(path)?;
    parse_scene(&contents, name, path.parent())
}

/// Load a scene from a JSON string.
///
/// Relative mesh paths are resolved against the working directory.
pub fn load_scene_from_str(json: &str, name: &str) -> LoadResult<Scene> {
    parse_scene(json, name, None)
}

fn parse_scene(json: &str, name: &str, base_dir: Option<&Path>) -> LoadResult<Scene> {
    let file: SceneFile = serde_json::from_str(json)?;
    let mut scene = Scene::new(name);

    let mut ids: HashMap<String, usize> = HashMap::with_capacity(file.materials.len());
    for (mat_name, record) in file.materials {
        let material = build_material(mat_name.clone(), record)?;
        log::debug!("Material {} -> {} ({})", scene.material_count(), mat_name, material.kind);
        ids.insert(mat_name, scene.add_material(material));
    }

    for (index, record) in file.objects.into_iter().enumerate() {
        let material_id = *ids
            .get(&record.material)
            .ok_or_else(|| LoadError::UndefinedMaterial {
                index,
                material: record.material.clone(),
            })?;

        let kind = match record.kind.as_str() {
            "sphere" => GeomKind::Sphere,
            "cube" => GeomKind::Cube,
            "mesh" => {
                let path = record.filepath.ok_or(LoadError::MissingMeshPath(index))?;
                let path = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path,
                };
                if !path.is_file() {
                    return Err(LoadError::MeshNotFound(path));
                }
                GeomKind::Mesh { path }
            }
            other => {
                return Err(LoadError::UnknownObjectType {
                    index,
                    type_name: other.to_string(),
                })
            }
        };

        scene.add_geom(Geom::new(
            kind,
            material_id,
            Vec3::from_array(record.trans),
            Vec3::from_array(record.rotat),
            Vec3::from_array(record.scale),
        ));
    }

    let cam = file.camera;
    scene.camera = Camera::new(
        UVec2::from_array(cam.res),
        cam.fovy,
        Vec3::from_array(cam.eye),
        Vec3::from_array(cam.lookat),
        Vec3::from_array(cam.up),
    );
    scene.state = RenderState {
        iterations: cam.iterations,
        trace_depth: cam.depth,
        image_name: cam.file,
    };

    log::info!(
        "Loaded scene '{}': {} materials, {} objects, {}x{} @ {} iterations",
        scene.name,
        scene.material_count(),
        scene.geom_count(),
        scene.camera.resolution.x,
        scene.camera.resolution.y,
        scene.state.iterations
    );

    Ok(scene)
}

fn build_material(name: String, record: MaterialRecord) -> LoadResult<Material> {
    let kind: MaterialKind = record.kind.parse().map_err(|_| LoadError::UnknownMaterialType {
        material: name.clone(),
        type_name: record.kind.clone(),
    })?;

    let rgb = record.rgb.ok_or_else(|| LoadError::MissingField {
        material: name.clone(),
        field: "RGB",
    })?;

    let mut material = Material::new(name, kind, Color::from_array(rgb));

    if kind == MaterialKind::Light {
        material.emittance = record.emittance.ok_or_else(|| LoadError::MissingField {
            material: material.name.clone(),
            field: "EMITTANCE",
        })?;
        if material.emittance <= 0.0 {
            log::warn!("Light '{}' has non-positive emittance", material.name);
        }
    }

    if kind.requires_roughness() {
        material.roughness = record.roughness.ok_or_else(|| LoadError::MissingField {
            material: material.name.clone(),
            field: "ROUGHNESS",
        })?;
    }

    Ok(material)
}
