//! Importance sampling primitives.
//!
//! All generators take uniform variates in [0,1)² and warp them to the
//! target distribution.

use std::f32::consts::{FRAC_1_PI, FRAC_PI_2, FRAC_PI_4, PI};

use glint_math::{Vec2, Vec3};
use rand::RngCore;

use crate::rng::gen_f32;

const SQRT_OF_ONE_THIRD: f32 = 0.577_350_26;

/// Map the unit square to the unit disk, preserving relative area.
///
/// Concentric squares map to concentric circles, which avoids the clumping
/// near the center that the polar mapping produces.
pub fn concentric_sample_disk(u: Vec2) -> Vec2 {
    // Map uniform random numbers to [-1,1]^2
    let offset = 2.0 * u - Vec2::ONE;

    // Handle degeneracy at the origin
    if offset.x == 0.0 && offset.y == 0.0 {
        return Vec2::ZERO;
    }

    let (r, theta) = if offset.x.abs() > offset.y.abs() {
        (offset.x, FRAC_PI_4 * (offset.y / offset.x))
    } else {
        (offset.y, FRAC_PI_2 - FRAC_PI_4 * (offset.x / offset.y))
    };

    r * Vec2::new(theta.cos(), theta.sin())
}

/// Cosine-weighted direction on the +Z hemisphere.
#[inline]
pub fn cosine_sample_hemisphere(u: Vec2) -> Vec3 {
    let d = concentric_sample_disk(u);
    let z = (1.0 - d.x * d.x - d.y * d.y).max(0.0).sqrt();
    Vec3::new(d.x, d.y, z)
}

/// Density of [`cosine_sample_hemisphere`] with respect to solid angle.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: f32) -> f32 {
    cos_theta * FRAC_1_PI
}

/// Uniform world-space direction on the hemisphere around `normal`.
///
/// The basis is built from whichever axis is least aligned with the normal,
/// so it never degenerates.
pub fn uniform_sample_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let up = gen_f32(rng); // cos(theta)
    let over = (1.0 - up * up).max(0.0).sqrt(); // sin(theta)
    let around = gen_f32(rng) * 2.0 * PI;

    let helper = if normal.x.abs() < SQRT_OF_ONE_THIRD {
        Vec3::X
    } else if normal.y.abs() < SQRT_OF_ONE_THIRD {
        Vec3::Y
    } else {
        Vec3::Z
    };

    let perpendicular1 = normal.cross(helper).normalize();
    let perpendicular2 = normal.cross(perpendicular1).normalize();

    up * normal + around.cos() * over * perpendicular1 + around.sin() * over * perpendicular2
}

#[inline]
pub fn uniform_hemisphere_pdf() -> f32 {
    0.5 * FRAC_1_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::rng::gen_2d;

    #[test]
    fn test_disk_origin_degeneracy() {
        assert_eq!(concentric_sample_disk(Vec2::splat(0.5)), Vec2::ZERO);
        assert_eq!(cosine_sample_hemisphere(Vec2::splat(0.5)), Vec3::Z);
    }

    #[test]
    fn test_disk_corners_and_edges() {
        // Square corners land on the unit circle
        for u in [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::ONE] {
            let d = concentric_sample_disk(u);
            assert!((d.length() - 1.0).abs() < 1e-5, "{u} -> {d}");
        }

        // Right edge midpoint maps to +X
        let d = concentric_sample_disk(Vec2::new(1.0, 0.5));
        assert!(d.abs_diff_eq(Vec2::X, 1e-6));
        // Top edge midpoint maps to +Y
        let d = concentric_sample_disk(Vec2::new(0.5, 1.0));
        assert!(d.abs_diff_eq(Vec2::Y, 1e-6));
    }

    #[test]
    fn test_disk_samples_inside_unit_disk() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let d = concentric_sample_disk(gen_2d(&mut rng));
            assert!(d.length_squared() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_disk_is_area_preserving() {
        // r² is uniform for an area-preserving map: half the samples fall
        // inside radius 1/sqrt(2)
        let mut rng = StdRng::seed_from_u64(7);
        let n = 100_000;
        let inner = (0..n)
            .filter(|_| concentric_sample_disk(gen_2d(&mut rng)).length_squared() < 0.5)
            .count();
        let fraction = inner as f32 / n as f32;
        assert!((fraction - 0.5).abs() < 0.01, "fraction = {fraction}");
    }

    #[test]
    fn test_cosine_hemisphere_unit_and_upper() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10_000 {
            let w = cosine_sample_hemisphere(gen_2d(&mut rng));
            assert!(w.z >= 0.0);
            assert!((w.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cosine_hemisphere_matches_cos_over_pi() {
        // With density cosθ/π the CDF of z = cosθ is z², so bin [a, b)
        // should receive b² - a² of the samples.
        const BINS: usize = 10;
        let n = 200_000;
        let mut rng = StdRng::seed_from_u64(1234);
        let mut counts = [0usize; BINS];
        for _ in 0..n {
            let w = cosine_sample_hemisphere(gen_2d(&mut rng));
            let bin = ((w.z * BINS as f32) as usize).min(BINS - 1);
            counts[bin] += 1;
        }

        let mut chi2 = 0.0;
        for (i, &count) in counts.iter().enumerate() {
            let a = i as f32 / BINS as f32;
            let b = (i + 1) as f32 / BINS as f32;
            let expected = (b * b - a * a) * n as f32;
            let diff = count as f32 - expected;
            chi2 += diff * diff / expected;
        }
        // 9 degrees of freedom; 27.9 is the 0.999 quantile
        assert!(chi2 < 27.9, "chi2 = {chi2}, counts = {counts:?}");
    }

    #[test]
    fn test_cosine_hemisphere_azimuth_is_uniform() {
        let n = 80_000;
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0usize; 8];
        for _ in 0..n {
            let w = cosine_sample_hemisphere(gen_2d(&mut rng));
            let phi = w.y.atan2(w.x) + PI;
            let bin = ((phi / (2.0 * PI) * 8.0) as usize).min(7);
            counts[bin] += 1;
        }
        for count in counts {
            let fraction = count as f32 / n as f32;
            assert!((fraction - 0.125).abs() < 0.01, "counts = {counts:?}");
        }
    }

    #[test]
    fn test_cosine_pdf() {
        assert!((cosine_hemisphere_pdf(1.0) - FRAC_1_PI).abs() < 1e-7);
        assert_eq!(cosine_hemisphere_pdf(0.0), 0.0);
    }

    #[test]
    fn test_uniform_hemisphere_around_normal() {
        let normals = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::Z,
            Vec3::ONE.normalize(),
            Vec3::new(0.2, -0.9, 0.1).normalize(),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        for n in normals {
            for _ in 0..2_000 {
                let w = uniform_sample_hemisphere(n, &mut rng);
                assert!(w.dot(n) >= -1e-6, "{w} below {n}");
                assert!((w.length() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_uniform_hemisphere_cos_is_uniform() {
        let n = 100_000;
        let normal = Vec3::new(0.3, 0.4, -0.866).normalize();
        let mut rng = StdRng::seed_from_u64(77);
        let mut counts = [0usize; 10];
        for _ in 0..n {
            let cos = uniform_sample_hemisphere(normal, &mut rng).dot(normal);
            counts[((cos * 10.0) as usize).min(9)] += 1;
        }
        for count in counts {
            let fraction = count as f32 / n as f32;
            assert!((fraction - 0.1).abs() < 0.01, "counts = {counts:?}");
        }
        assert!((uniform_hemisphere_pdf() * 2.0 * PI - 1.0).abs() < 1e-6);
    }
}
