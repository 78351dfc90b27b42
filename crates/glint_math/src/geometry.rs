//! Scattering geometry: mirror reflection, Snell refraction and the
//! local-frame cosine helpers.

use glam::Vec3;

/// Cosine of the angle to the local normal (+Z).
#[inline]
pub fn cos_theta(w: Vec3) -> f32 {
    w.z
}

#[inline]
pub fn abs_cos_theta(w: Vec3) -> f32 {
    w.z.abs()
}

/// True if both local directions lie on the same side of the surface.
#[inline]
pub fn same_hemisphere(w: Vec3, wp: Vec3) -> bool {
    w.z * wp.z > 0.0
}

/// Flip `n` so it lies in the same hemisphere as `v`.
#[inline]
pub fn faceforward(n: Vec3, v: Vec3) -> Vec3 {
    if n.dot(v) < 0.0 {
        -n
    } else {
        n
    }
}

/// Mirror `wo` about `n`.
///
/// Both vectors point away from the surface; the result stays on the same
/// side of the surface as `wo` regardless of which way `n` faces.
#[inline]
pub fn reflect(wo: Vec3, n: Vec3) -> Vec3 {
    -wo + 2.0 * wo.dot(n) * n
}

/// Refract `wi` through a surface with normal `n` (same hemisphere as `wi`)
/// and relative index `eta = eta_i / eta_t`.
///
/// Returns `None` on total internal reflection.
pub fn refract(wi: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    // Compute cos(theta_t) using Snell's law
    let cos_theta_i = n.dot(wi);
    let sin2_theta_i = (1.0 - cos_theta_i * cos_theta_i).max(0.0);
    let sin2_theta_t = eta * eta * sin2_theta_i;

    if sin2_theta_t >= 1.0 {
        return None;
    }

    let cos_theta_t = (1.0 - sin2_theta_t).sqrt();
    Some(eta * -wi + (eta * cos_theta_i - cos_theta_t) * n)
}
