//! Glint Renderer - shading and sampling core.
//!
//! Given a surface hit and the direction a path arrived from, produces the
//! next direction, its pdf and the BSDF value that weights the estimate:
//!
//! - Per-path seeded random streams
//! - Concentric-disk, cosine- and uniform-hemisphere sampling
//! - Dielectric Fresnel reflectance (air/glass)
//! - Diffuse, mirror, refractive and stochastic glass BSDFs
//! - Material dispatch around a local shading frame
//! - Data-parallel shading of path batches with rayon

mod bsdf;
mod fresnel;
mod interactions;
mod path;
mod rng;
mod sampling;
mod shade;

pub use bsdf::{
    sample_diffuse, sample_glass, sample_specular_reflect, sample_specular_transmit, Bsdf,
    BsdfSample, LOCAL_NORMAL,
};
pub use fresnel::{fresnel_dielectric, fresnel_dielectric_pair, ETA_AIR, ETA_GLASS};
pub use interactions::{scatter_ray, ShadingMaterial, SurfaceInteraction, RAY_EPSILON};
pub use path::PathSegment;
pub use rng::{gen_2d, gen_f32, hash_u32, path_seed, seeded_rng};
pub use sampling::{
    concentric_sample_disk, cosine_hemisphere_pdf, cosine_sample_hemisphere,
    uniform_hemisphere_pdf, uniform_sample_hemisphere,
};
pub use shade::{shade_batch, shade_path};

/// Re-export common types from the lower crates
pub use glint_core::{Color, GpuMaterial, Material, MaterialKind};
pub use glint_math::{Ray, ShadingFrame, Vec2, Vec3};
