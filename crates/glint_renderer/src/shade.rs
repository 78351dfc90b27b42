//! Data-parallel shading of a batch of path segments.
//!
//! One rayon task per path. Each task owns its path and its generator and
//! only reads the shared material table.

use rayon::prelude::*;

use crate::bsdf::BsdfSample;
use crate::interactions::{scatter_ray, ShadingMaterial, SurfaceInteraction};
use crate::path::PathSegment;
use crate::rng::seeded_rng;

/// Scatter every live path off its surface interaction.
///
/// `interactions[i]` belongs to `paths[i]`. Generators are seeded from the
/// path's pixel index, so the result for a path does not depend on where it
/// sits in the batch. Dead paths and paths whose material id is out of
/// range yield `None`; the latter are terminated.
///
/// Panics if `paths` and `interactions` differ in length.
pub fn shade_batch<M>(
    paths: &mut [PathSegment],
    interactions: &[SurfaceInteraction],
    materials: &[M],
    iteration: u32,
    depth: u32,
) -> Vec<Option<BsdfSample>>
where
    M: ShadingMaterial + Sync,
{
    assert_eq!(
        paths.len(),
        interactions.len(),
        "every path needs exactly one surface interaction"
    );

    let samples: Vec<Option<BsdfSample>> = paths
        .par_iter_mut()
        .zip(interactions.par_iter())
        .map(|(path, interaction)| shade_path(path, interaction, materials, iteration, depth))
        .collect();

    log::trace!(
        "Shaded {} of {} paths (iteration {}, depth {})",
        samples.iter().filter(|s| s.is_some()).count(),
        samples.len(),
        iteration,
        depth
    );

    samples
}

/// Shade a single path; the per-task body of [`shade_batch`].
pub fn shade_path<M: ShadingMaterial>(
    path: &mut PathSegment,
    interaction: &SurfaceInteraction,
    materials: &[M],
    iteration: u32,
    depth: u32,
) -> Option<BsdfSample> {
    if !path.is_alive() {
        return None;
    }

    let Some(material) = materials.get(interaction.material_id) else {
        path.terminate();
        return None;
    };

    let mut rng = seeded_rng(iteration, path.pixel_index as u64, depth);
    let sample = scatter_ray(path, interaction, material, &mut rng);
    path.attenuate(&sample, interaction.shading_frame().normal);
    Some(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Color, Material, MaterialKind};
    use glint_math::{Ray, Vec3};

    fn materials() -> Vec<Material> {
        vec![
            Material::diffuse("white", Color::splat(0.8)),
            Material::new("mirror", MaterialKind::SpecularReflect, Color::ONE),
            Material::new("glass", MaterialKind::SpecularGlass, Color::ONE),
            Material::new("lens", MaterialKind::SpecularTransmit, Color::ONE),
        ]
    }

    fn batch(n: usize) -> (Vec<PathSegment>, Vec<SurfaceInteraction>) {
        let mut paths = Vec::with_capacity(n);
        let mut hits = Vec::with_capacity(n);
        for i in 0..n {
            let t = i as f32 * 0.37;
            let direction = Vec3::new(t.sin() * 0.5, t.cos() * 0.5, -1.0).normalize();
            paths.push(PathSegment::new(Ray::new(Vec3::new(0.0, 0.0, 4.0), direction), i, 8));

            let normal = Vec3::new((t * 0.3).cos() * 0.2, 0.1, 1.0).normalize();
            hits.push(SurfaceInteraction::new(Vec3::new(t, 0.0, 0.0), normal, i % 4));
        }
        (paths, hits)
    }

    #[test]
    fn test_batch_is_reproducible() {
        let mats = materials();
        let (mut a, hits) = batch(512);
        let mut b = a.clone();

        let sa = shade_batch(&mut a, &hits, &mats, 3, 1);
        let sb = shade_batch(&mut b, &hits, &mats, 3, 1);
        assert_eq!(sa, sb);
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_matches_sequential_shading() {
        let mats = materials();
        let (mut parallel, hits) = batch(256);
        let mut sequential = parallel.clone();

        let results = shade_batch(&mut parallel, &hits, &mats, 0, 0);
        for (i, path) in sequential.iter_mut().enumerate() {
            let expected = shade_path(path, &hits[i], &mats, 0, 0);
            assert_eq!(results[i], expected);
        }
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_batch_invariant_under_reordering() {
        let mats = materials();
        let (mut forward, hits) = batch(300);
        let mut reversed: Vec<PathSegment> = forward.iter().rev().copied().collect();
        let reversed_hits: Vec<SurfaceInteraction> = hits.iter().rev().copied().collect();

        let forward_results = shade_batch(&mut forward, &hits, &mats, 7, 2);
        let reversed_results = shade_batch(&mut reversed, &reversed_hits, &mats, 7, 2);

        let n = forward.len();
        for i in 0..n {
            assert_eq!(forward[i], reversed[n - 1 - i]);
            assert_eq!(forward_results[i], reversed_results[n - 1 - i]);
        }
    }

    #[test]
    fn test_different_iterations_decorrelate() {
        let mats = vec![Material::diffuse("white", Color::ONE)];
        let (mut a, mut hits) = batch(64);
        for hit in &mut hits {
            hit.material_id = 0;
        }
        let mut b = a.clone();

        shade_batch(&mut a, &hits, &mats, 0, 0);
        shade_batch(&mut b, &hits, &mats, 1, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_dead_and_unresolved_paths() {
        let mats = materials();
        let (mut paths, mut hits) = batch(3);
        paths[0].terminate();
        hits[1].material_id = 99;

        let before = paths[0];
        let results = shade_batch(&mut paths, &hits, &mats, 0, 0);

        assert_eq!(results[0], None);
        assert_eq!(paths[0], before);
        assert_eq!(results[1], None);
        assert!(!paths[1].is_alive());
        assert!(results[2].is_some());
    }

    #[test]
    fn test_unnormalized_normal_does_not_add_energy() {
        let mats = vec![Material::diffuse("white", Color::ONE)];
        let incoming = Vec3::new(0.3, 0.0, -1.0).normalize();

        for normal in [Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.05, 0.2), Vec3::ZERO] {
            let mut paths: Vec<PathSegment> = (0..64)
                .map(|i| PathSegment::new(Ray::new(Vec3::new(0.0, 0.0, 4.0), incoming), i, 8))
                .collect();
            let hits = vec![SurfaceInteraction::new(Vec3::ZERO, normal, 0); paths.len()];

            let results = shade_batch(&mut paths, &hits, &mats, 0, 0);
            for (path, sample) in paths.iter().zip(results.iter().copied()) {
                let sample = sample.expect("material resolves");
                if sample.is_black() {
                    assert!(!path.is_alive());
                    continue;
                }
                // White Lambertian under cosine sampling: unit weight
                assert!(path.throughput.abs_diff_eq(Color::ONE, 1e-4), "{normal}: {}", path.throughput);
                assert!(path.is_alive());
                assert_eq!(path.remaining_bounces, 7);
            }
        }
    }

    #[test]
    #[should_panic(expected = "exactly one surface interaction")]
    fn test_mismatched_batch_lengths_panic() {
        let mats = materials();
        let (mut paths, hits) = batch(4);
        shade_batch(&mut paths, &hits[..3], &mats, 0, 0);
    }

    #[test]
    fn test_materials_are_not_mutated() {
        let mats = materials();
        let snapshot = mats.clone();
        let (mut paths, hits) = batch(128);
        shade_batch(&mut paths, &hits, &mats, 0, 0);
        assert_eq!(mats, snapshot);
    }
}
