//! Dispatch layer: picks a BSDF strategy for a material and runs it in the
//! local shading frame around the hit normal.

use glint_core::{Color, GpuMaterial, Material, MaterialKind};
use glint_math::{Ray, ShadingFrame, Vec3};
use rand::RngCore;

use crate::bsdf::{Bsdf, BsdfSample};
use crate::path::PathSegment;

/// Offset applied along the new direction when respawning a ray.
pub const RAY_EPSILON: f32 = 1e-4;

impl Bsdf {
    /// Strategy for a material type.
    ///
    /// Types without a dedicated strategy (lights, diamond, ceramic) scatter
    /// as diffuse.
    pub fn for_kind(kind: MaterialKind, roughness: f32) -> Self {
        match kind {
            MaterialKind::DiffuseReflect => Bsdf::Diffuse,
            MaterialKind::SpecularReflect => Bsdf::SpecularReflect,
            MaterialKind::SpecularTransmit => Bsdf::SpecularTransmit,
            MaterialKind::SpecularGlass => Bsdf::Glass,
            MaterialKind::MicrofacetReflect => Bsdf::Microfacet { roughness },
            MaterialKind::GlossyReflect => Bsdf::Glossy { roughness },
            _ => Bsdf::Diffuse,
        }
    }

    /// Strategy for a raw type tag; unknown tags scatter as diffuse.
    pub fn from_tag(tag: u32, roughness: f32) -> Self {
        MaterialKind::from_tag(tag)
            .map(|kind| Bsdf::for_kind(kind, roughness))
            .unwrap_or(Bsdf::Diffuse)
    }
}

/// Material data the dispatch layer needs.
pub trait ShadingMaterial {
    fn bsdf(&self) -> Bsdf;

    fn base_color(&self) -> Color;
}

impl ShadingMaterial for Material {
    fn bsdf(&self) -> Bsdf {
        Bsdf::for_kind(self.kind, self.roughness)
    }

    fn base_color(&self) -> Color {
        self.color
    }
}

impl ShadingMaterial for GpuMaterial {
    fn bsdf(&self) -> Bsdf {
        Bsdf::from_tag(self.tag, self.roughness)
    }

    fn base_color(&self) -> Color {
        self.color()
    }
}

/// Per-hit shading inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInteraction {
    /// World-space hit point
    pub point: Vec3,
    /// World-space unit surface normal
    pub normal: Vec3,
    /// Index into the material table
    pub material_id: usize,
    /// Texture color replacing the material's base color
    pub texture_color: Option<Color>,
}

impl SurfaceInteraction {
    pub fn new(point: Vec3, normal: Vec3, material_id: usize) -> Self {
        Self {
            point,
            normal,
            material_id,
            texture_color: None,
        }
    }

    /// Builder method to set a texture color override.
    pub fn with_texture_color(mut self, color: Color) -> Self {
        self.texture_color = Some(color);
        self
    }

    /// Local frame around the normalized hit normal.
    ///
    /// Both sampling and path attenuation measure cosines against
    /// `shading_frame().normal`, never against the raw `normal`.
    #[inline]
    pub fn shading_frame(&self) -> ShadingFrame {
        ShadingFrame::new(self.normal)
    }
}

/// Scatter a path off a surface.
///
/// Transforms the view direction into the local frame, samples the
/// material's strategy, and rewrites the path's ray with the world-space
/// result. The returned sample's `wi` is in world space.
pub fn scatter_ray<M: ShadingMaterial + ?Sized>(
    path: &mut PathSegment,
    interaction: &SurfaceInteraction,
    material: &M,
    rng: &mut dyn RngCore,
) -> BsdfSample {
    let frame = interaction.shading_frame();
    let wo = frame.to_local(-path.ray.direction);

    let color = interaction
        .texture_color
        .unwrap_or_else(|| material.base_color());

    let mut sample = material.bsdf().sample_f(wo, color, rng);
    sample.wi = frame.to_world(sample.wi).normalize_or_zero();

    path.ray = Ray::spawn(interaction.point, sample.wi, RAY_EPSILON);

    sample
}
