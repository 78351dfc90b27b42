//! Glint Core - scene description and material records.
//!
//! This crate provides:
//!
//! - **Material records**: `Material`, `MaterialKind`, and the packed `GpuMaterial`
//! - **Scene types**: `Scene`, `Geom`, `Camera`, `RenderState`
//! - **Scene loading**: JSON scene files via `load_scene`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/cornell.json")?;
//! println!("Loaded {} materials, {} objects",
//!     scene.material_count(),
//!     scene.geom_count());
//! ```

pub mod loader;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use material::{Color, GpuMaterial, Material, MaterialKind, UnknownMaterialKind};
pub use scene::{Camera, Geom, GeomKind, RenderState, Scene};
