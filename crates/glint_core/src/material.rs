//! Material records.
//!
//! Materials are created once at scene load and shared read-only by every
//! shading invocation that references them by id.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use glint_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Material type tag.
///
/// The discriminants are the raw tags stored in [`GpuMaterial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MaterialKind {
    Light = 0,
    DiffuseReflect = 1,
    SpecularReflect = 2,
    SpecularTransmit = 3,
    SpecularGlass = 4,
    MicrofacetReflect = 5,
    GlossyReflect = 6,
    Diamond = 7,
    Ceramic = 8,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 9] = [
        MaterialKind::Light,
        MaterialKind::DiffuseReflect,
        MaterialKind::SpecularReflect,
        MaterialKind::SpecularTransmit,
        MaterialKind::SpecularGlass,
        MaterialKind::MicrofacetReflect,
        MaterialKind::GlossyReflect,
        MaterialKind::Diamond,
        MaterialKind::Ceramic,
    ];

    /// Decode a raw tag. Returns `None` for tags outside the known set.
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    #[inline]
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Name used for this type in scene files.
    pub fn scene_name(self) -> &'static str {
        match self {
            MaterialKind::Light => "LIGHT",
            MaterialKind::DiffuseReflect => "DIFFUSE_REFL",
            MaterialKind::SpecularReflect => "SPEC_REFL",
            MaterialKind::SpecularTransmit => "SPEC_TRANS",
            MaterialKind::SpecularGlass => "SPEC_GLASS",
            MaterialKind::MicrofacetReflect => "MICROFACET_REFL",
            MaterialKind::GlossyReflect => "GLOSSY_REFL",
            MaterialKind::Diamond => "DIAMOND",
            MaterialKind::Ceramic => "CERAMIC",
        }
    }

    /// True for types whose scene record must carry `ROUGHNESS`.
    pub fn requires_roughness(self) -> bool {
        !matches!(self, MaterialKind::Light | MaterialKind::DiffuseReflect)
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.scene_name())
    }
}

/// Error returned when a scene-file type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMaterialKind(pub String);

impl fmt::Display for UnknownMaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown material type '{}'", self.0)
    }
}

impl std::error::Error for UnknownMaterialKind {}

impl FromStr for MaterialKind {
    type Err = UnknownMaterialKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.scene_name() == s)
            .ok_or_else(|| UnknownMaterialKind(s.to_string()))
    }
}

/// A material definition as loaded from the scene file.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (key in the scene file)
    pub name: String,

    pub kind: MaterialKind,

    /// Base color (RGB, 0-1)
    pub color: Color,

    /// Roughness, only meaningful for non-ideal types
    pub roughness: f32,

    /// Emitted radiance scale, only meaningful for lights
    pub emittance: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            kind: MaterialKind::DiffuseReflect,
            color: Color::new(0.8, 0.8, 0.8),
            roughness: 0.0,
            emittance: 0.0,
        }
    }
}

impl Material {
    /// Create a material of the given kind and color.
    pub fn new(name: impl Into<String>, kind: MaterialKind, color: Color) -> Self {
        Self {
            name: name.into(),
            kind,
            color,
            ..Default::default()
        }
    }

    /// Create a simple diffuse material.
    pub fn diffuse(name: impl Into<String>, color: Color) -> Self {
        Self::new(name, MaterialKind::DiffuseReflect, color)
    }

    /// Create an emitter.
    pub fn light(name: impl Into<String>, color: Color, emittance: f32) -> Self {
        Self {
            emittance,
            ..Self::new(name, MaterialKind::Light, color)
        }
    }

    /// Builder method to set roughness.
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Check if this material is emissive.
    pub fn is_emissive(&self) -> bool {
        self.kind == MaterialKind::Light && self.emittance > 0.0
    }

    /// Emitted radiance (zero for non-lights).
    pub fn emitted(&self) -> Color {
        if self.kind == MaterialKind::Light {
            self.color * self.emittance
        } else {
            Color::ZERO
        }
    }
}

/// Packed material record for device upload.
///
/// Carries the raw type tag, so a record may hold a tag that no
/// [`MaterialKind`] corresponds to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuMaterial {
    pub tag: u32,
    pub color: [f32; 3],
    pub roughness: f32,
    pub emittance: f32,
    pub _pad: [f32; 2],
}

impl GpuMaterial {
    /// Decoded type tag, if known.
    pub fn kind(&self) -> Option<MaterialKind> {
        MaterialKind::from_tag(self.tag)
    }

    pub fn color(&self) -> Color {
        Color::from_array(self.color)
    }
}

impl From<&Material> for GpuMaterial {
    fn from(mat: &Material) -> Self {
        Self {
            tag: mat.kind.tag(),
            color: mat.color.to_array(),
            roughness: mat.roughness,
            emittance: mat.emittance,
            _pad: [0.0; 2],
        }
    }
}
