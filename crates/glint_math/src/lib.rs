//! Glint math types.
//!
//! Thin layer over glam with the ray type, local shading frame and the
//! reflection/refraction geometry used by the shading core.

// Re-export glam for convenience
pub use glam::*;

mod frame;
mod geometry;
mod ray;
mod transform;

pub use frame::{coordinate_system, local_to_world, world_to_local, ShadingFrame};
pub use geometry::{abs_cos_theta, cos_theta, faceforward, reflect, refract, same_hemisphere};
pub use ray::Ray;
pub use transform::build_transformation_matrix;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_reexported_geometry() {
        let n = Vec3::Z;
        let wo = Vec3::new(0.6, 0.0, 0.8);
        assert!(same_hemisphere(wo, reflect(wo, n)));
        assert_eq!(cos_theta(wo), 0.8);
    }
}
