//! Per-material BSDF strategies.
//!
//! Everything here works in the local shading frame, where the surface
//! normal is +Z and `wo` points away from the surface towards the viewer.
//! Specular lobes are Dirac deltas: they report `pdf = 1` and fold a
//! `1 / |cos θi|` into `f` so that `f · |cos θi| / pdf` is the lobe's
//! reflectance.

use std::f32::consts::FRAC_1_PI;

use glint_core::Color;
use glint_math::{abs_cos_theta, cos_theta, faceforward, reflect, refract, same_hemisphere, Vec3};
use rand::RngCore;

use crate::fresnel::{fresnel_dielectric, ETA_AIR, ETA_GLASS};
use crate::rng::{gen_2d, gen_f32};
use crate::sampling::{cosine_hemisphere_pdf, cosine_sample_hemisphere};

/// Surface normal in the local shading frame.
pub const LOCAL_NORMAL: Vec3 = Vec3::Z;

/// Result of sampling a BSDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BsdfSample {
    /// Sampled incident direction (local or world, depending on the caller)
    pub wi: Vec3,
    /// BSDF value for the pair (wo, wi)
    pub f: Color,
    /// Density of `wi`; 1 for delta lobes
    pub pdf: f32,
    /// True if `wi` came from a delta distribution
    pub delta: bool,
}

impl BsdfSample {
    /// True if the sample carries no energy.
    pub fn is_black(&self) -> bool {
        self.f == Color::ZERO || self.pdf <= 0.0
    }

    /// Estimator weight `f · |cos θi| / pdf`, measured against `normal`.
    pub fn weight(&self, normal: Vec3) -> Color {
        if self.pdf <= 0.0 {
            return Color::ZERO;
        }
        self.f * self.wi.dot(normal).abs() / self.pdf
    }
}

/// Closed set of scattering strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bsdf {
    /// Lambertian reflection
    Diffuse,
    /// Perfect mirror
    SpecularReflect,
    /// Perfect refraction through an air/glass boundary
    SpecularTransmit,
    /// Stochastic choice between mirror reflection and refraction
    Glass,
    /// Rough conductor; samples as [`Bsdf::Diffuse`] for now
    Microfacet { roughness: f32 },
    /// Glossy reflection; samples as [`Bsdf::Diffuse`] for now
    Glossy { roughness: f32 },
}

impl Bsdf {
    /// True for strategies that only produce delta samples.
    pub fn is_delta(self) -> bool {
        matches!(self, Bsdf::SpecularReflect | Bsdf::SpecularTransmit | Bsdf::Glass)
    }

    /// Sample an incident direction for outgoing direction `wo`.
    pub fn sample_f(self, wo: Vec3, color: Color, rng: &mut dyn RngCore) -> BsdfSample {
        match self {
            Bsdf::Diffuse => sample_diffuse(wo, color, rng),
            Bsdf::SpecularReflect => sample_specular_reflect(wo, color),
            Bsdf::SpecularTransmit => sample_specular_transmit(wo, color),
            Bsdf::Glass => sample_glass(wo, color, rng),
            Bsdf::Microfacet { .. } | Bsdf::Glossy { .. } => sample_diffuse(wo, color, rng),
        }
    }

    /// Evaluate the BSDF for a given direction pair.
    ///
    /// Delta lobes evaluate to zero: the chance that an arbitrary `wi`
    /// hits the delta direction is zero.
    pub fn f(self, wo: Vec3, wi: Vec3, color: Color) -> Color {
        if self.is_delta() || !same_hemisphere(wo, wi) {
            return Color::ZERO;
        }
        color * FRAC_1_PI
    }

    /// Density with which [`Bsdf::sample_f`] would produce `wi`.
    pub fn pdf(self, wo: Vec3, wi: Vec3) -> f32 {
        if self.is_delta() || !same_hemisphere(wo, wi) {
            return 0.0;
        }
        cosine_hemisphere_pdf(abs_cos_theta(wi))
    }
}

/// Lambertian: cosine-weighted hemisphere on the side of `wo`.
pub fn sample_diffuse(wo: Vec3, color: Color, rng: &mut dyn RngCore) -> BsdfSample {
    let mut wi = cosine_sample_hemisphere(gen_2d(rng));
    if cos_theta(wo) < 0.0 {
        wi.z = -wi.z;
    }

    BsdfSample {
        wi,
        f: color * FRAC_1_PI,
        pdf: cosine_hemisphere_pdf(abs_cos_theta(wi)),
        delta: false,
    }
}

/// Mirror reflection about the local normal.
pub fn sample_specular_reflect(wo: Vec3, color: Color) -> BsdfSample {
    let wi = reflect(wo, LOCAL_NORMAL);
    BsdfSample {
        wi,
        f: delta_value(color, wi),
        pdf: 1.0,
        delta: true,
    }
}

/// Refraction through the air/glass boundary.
///
/// On total internal reflection the sample is black and `wi` is the mirror
/// direction, so the ray stays well formed.
pub fn sample_specular_transmit(wo: Vec3, color: Color) -> BsdfSample {
    let entering = cos_theta(wo) > 0.0;
    let (eta_i, eta_t) = if entering {
        (ETA_AIR, ETA_GLASS)
    } else {
        (ETA_GLASS, ETA_AIR)
    };

    match refract(wo, faceforward(LOCAL_NORMAL, wo), eta_i / eta_t) {
        Some(wi) => BsdfSample {
            wi,
            f: delta_value(color, wi),
            pdf: 1.0,
            delta: true,
        },
        None => BsdfSample {
            wi: reflect(wo, LOCAL_NORMAL),
            f: Color::ZERO,
            pdf: 1.0,
            delta: true,
        },
    }
}

/// Pick reflection or transmission with probability 1/2 each.
///
/// Each branch is scaled by 2 to undo the selection probability; the
/// transmit branch also carries `1 - F`.
pub fn sample_glass(wo: Vec3, color: Color, rng: &mut dyn RngCore) -> BsdfSample {
    if gen_f32(rng) < 0.5 {
        let mut sample = sample_specular_reflect(wo, color);
        sample.f *= reflect_branch_weight(wo);
        sample
    } else {
        let mut sample = sample_specular_transmit(wo, color);
        sample.f *= 2.0 * (1.0 - fresnel_dielectric(cos_theta(wo)));
        sample
    }
}

// NOTE: the flat factor over-weights reflection wherever F is small. Build
// with `fresnel-glass` for the energy-conserving 2·F weight.
#[cfg(not(feature = "fresnel-glass"))]
#[inline]
fn reflect_branch_weight(_wo: Vec3) -> f32 {
    2.0
}

#[cfg(feature = "fresnel-glass")]
#[inline]
fn reflect_branch_weight(wo: Vec3) -> f32 {
    2.0 * fresnel_dielectric(cos_theta(wo))
}

/// `color / |cos θi|`, or black when `wi` lies in the surface plane.
#[inline]
fn delta_value(color: Color, wi: Vec3) -> Color {
    let cos = abs_cos_theta(wi);
    if cos > 0.0 {
        color / cos
    } else {
        Color::ZERO
    }
}
