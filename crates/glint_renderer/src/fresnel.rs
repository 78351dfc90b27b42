//! Dielectric Fresnel reflectance.

/// Index of refraction outside the surface.
pub const ETA_AIR: f32 = 1.0;

/// Index of refraction inside every dielectric surface.
pub const ETA_GLASS: f32 = 1.55;

/// Fresnel reflectance for unpolarized light at an air/glass boundary.
///
/// `cos_theta_i` is measured against the outward normal; a negative value
/// means the ray arrives from inside the glass.
#[inline]
pub fn fresnel_dielectric(cos_theta_i: f32) -> f32 {
    fresnel_dielectric_pair(cos_theta_i, ETA_AIR, ETA_GLASS)
}

/// Fresnel reflectance for unpolarized light between two dielectrics.
///
/// Returns 1 on total internal reflection.
pub fn fresnel_dielectric_pair(cos_theta_i: f32, eta_i: f32, eta_t: f32) -> f32 {
    let mut cos_theta_i = cos_theta_i.clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (eta_i, eta_t);

    // Exiting the denser medium: swap indices
    if cos_theta_i <= 0.0 {
        std::mem::swap(&mut eta_i, &mut eta_t);
        cos_theta_i = cos_theta_i.abs();
    }

    // Compute cos_theta_t using Snell's law
    let sin_theta_i = (1.0 - cos_theta_i * cos_theta_i).max(0.0).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;

    if sin_theta_t >= 1.0 {
        return 1.0;
    }

    let cos_theta_t = (1.0 - sin_theta_t * sin_theta_t).max(0.0).sqrt();
    let r_parl = ((eta_t * cos_theta_i) - (eta_i * cos_theta_t))
        / ((eta_t * cos_theta_i) + (eta_i * cos_theta_t));
    let r_perp = ((eta_i * cos_theta_i) - (eta_t * cos_theta_t))
        / ((eta_i * cos_theta_i) + (eta_t * cos_theta_t));
    (r_parl * r_parl + r_perp * r_perp) / 2.0
}
