//! Probe paths fired at a flat +Z surface.

use glint_math::{Ray, Vec3};
use glint_renderer::{shade_batch, PathSegment, ShadingMaterial, SurfaceInteraction};

/// Distance from the surface the probe rays start at.
const PROBE_DISTANCE: f32 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    pub samples: usize,
    pub iteration: u32,
    pub depth: u32,
    pub incidence_degrees: f32,
}

/// Aggregate over one probe batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProbeStats {
    /// Average over paths of the mean channel of `f·|cosθ|/pdf`
    pub mean_weight: f32,
    /// Average pdf over non-black samples
    pub mean_pdf: f32,
    /// Share of non-black samples leaving on the normal's side
    pub reflected_fraction: f32,
    /// Share of samples that terminated the path
    pub black_fraction: f32,
}

/// Shade `settings.samples` paths that hit the origin of a +Z surface made
/// of `materials[material_id]`.
pub fn probe_material<M>(materials: &[M], material_id: usize, settings: &ProbeSettings) -> ProbeStats
where
    M: ShadingMaterial + Sync,
{
    let theta = settings.incidence_degrees.to_radians();
    let direction = Vec3::new(theta.sin(), 0.0, -theta.cos());
    let origin = -direction * PROBE_DISTANCE;

    let mut paths: Vec<PathSegment> = (0..settings.samples)
        .map(|i| PathSegment::new(Ray::new(origin, direction), i, 1))
        .collect();
    let hit = SurfaceInteraction::new(Vec3::ZERO, Vec3::Z, material_id);
    let interactions = vec![hit; paths.len()];

    let samples = shade_batch(
        &mut paths,
        &interactions,
        materials,
        settings.iteration,
        settings.depth,
    );

    let mut stats = ProbeStats::default();
    let mut shaded = 0usize;
    let mut live = 0usize;

    for sample in samples.iter().flatten() {
        shaded += 1;
        if sample.is_black() {
            stats.black_fraction += 1.0;
            continue;
        }
        live += 1;
        let weight = sample.weight(Vec3::Z);
        stats.mean_weight += (weight.x + weight.y + weight.z) / 3.0;
        stats.mean_pdf += sample.pdf;
        if sample.wi.z > 0.0 {
            stats.reflected_fraction += 1.0;
        }
    }

    if shaded > 0 {
        stats.mean_weight /= shaded as f32;
        stats.black_fraction /= shaded as f32;
    }
    if live > 0 {
        stats.mean_pdf /= live as f32;
        stats.reflected_fraction /= live as f32;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Color, GpuMaterial, Material, MaterialKind};

    fn settings(samples: usize) -> ProbeSettings {
        ProbeSettings {
            samples,
            iteration: 0,
            depth: 0,
            incidence_degrees: 30.0,
        }
    }

    #[test]
    fn test_white_diffuse_conserves_energy() {
        let table = [GpuMaterial::from(&Material::diffuse("white", Color::ONE))];
        let stats = probe_material(&table, 0, &settings(2048));

        assert!((stats.mean_weight - 1.0).abs() < 1e-3, "{stats:?}");
        assert_eq!(stats.reflected_fraction, 1.0);
        assert_eq!(stats.black_fraction, 0.0);
    }

    #[test]
    fn test_mirror_reflects_every_path() {
        let table = [Material::new("mirror", MaterialKind::SpecularReflect, Color::splat(0.5))];
        let stats = probe_material(&table, 0, &settings(64));

        assert!((stats.mean_weight - 0.5).abs() < 1e-4, "{stats:?}");
        assert_eq!(stats.mean_pdf, 1.0);
        assert_eq!(stats.reflected_fraction, 1.0);
    }

    #[test]
    fn test_glass_splits_between_sides() {
        let table = [Material::new("glass", MaterialKind::SpecularGlass, Color::ONE)];
        let stats = probe_material(&table, 0, &settings(4096));

        assert!(stats.reflected_fraction > 0.4 && stats.reflected_fraction < 0.6, "{stats:?}");
    }

    #[test]
    fn test_unknown_material_id_shades_nothing() {
        let table = [Material::diffuse("white", Color::ONE)];
        let stats = probe_material(&table, 5, &settings(16));
        assert_eq!(stats, ProbeStats::default());
    }
}
