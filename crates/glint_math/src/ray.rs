use crate::Vec3;

/// Half-line `origin + t · direction`, `t >= 0`.
///
/// Path segments carry one of these between bounces; the shading core
/// replaces it after sampling a new direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray leaving a surface point, nudged `offset` along `direction` so the
    /// next intersection test does not hit the surface it starts on.
    #[inline]
    pub fn spawn(point: Vec3, direction: Vec3, offset: f32) -> Self {
        Self {
            origin: point + direction * offset,
            direction,
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_along_ray() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
        assert_eq!(ray.at(0.0), ray.origin);
        assert_eq!(ray.at(2.5), Vec3::new(1.0, 4.5, 3.0));
    }

    #[test]
    fn test_spawn_offsets_along_direction() {
        let dir = Vec3::new(0.0, 0.6, 0.8);
        let ray = Ray::spawn(Vec3::ONE, dir, 1e-3);
        assert_eq!(ray.direction, dir);
        assert!((ray.origin - Vec3::ONE).abs_diff_eq(dir * 1e-3, 1e-7));
        // Zero offset starts on the surface
        assert_eq!(Ray::spawn(Vec3::ONE, dir, 0.0).origin, Vec3::ONE);
    }

    #[test]
    fn test_default_points_along_z() {
        let ray = Ray::default();
        assert_eq!(ray.origin, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::Z);
    }
}
