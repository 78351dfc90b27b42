use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use glint_core::{load_scene, GpuMaterial};

mod probe;

use probe::{probe_material, ProbeSettings};

/// Shade probe paths against every material of a scene and report the
/// estimator statistics.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Options {
    /// Scene file (.json)
    #[clap(value_name = "SCENE")]
    scene: PathBuf,

    /// Probe paths shaded per material
    #[clap(long, short = 'n', value_name = "NUM", default_value_t = 4096)]
    samples: usize,

    /// Iteration index fed to the sample seeds
    #[clap(long, short = 'i', value_name = "NUM", default_value_t = 0)]
    iteration: u32,

    /// Bounce depth fed to the sample seeds
    #[clap(long, short = 'd', value_name = "NUM", default_value_t = 0)]
    depth: u32,

    /// Angle between the incoming ray and the surface normal, in degrees
    #[clap(long, value_name = "DEGREES", default_value_t = 30.0)]
    incidence: f32,
}

fn main() -> Result<()> {
    env_logger::init();

    let options = Options::parse();
    ensure!(options.samples > 0, "--samples must be positive");
    ensure!(
        (0.0..90.0).contains(&options.incidence),
        "--incidence must be in [0, 90) degrees, got {}",
        options.incidence
    );

    let scene = load_scene(&options.scene)
        .with_context(|| format!("Failed to load scene {}", options.scene.display()))?;

    log::info!(
        "Probing {} materials of '{}' ({} samples, {}° incidence)",
        scene.material_count(),
        scene.name,
        options.samples,
        options.incidence
    );

    // Shade against the packed records the device path would see
    let table: Vec<GpuMaterial> = scene
        .materials
        .iter()
        .map(|m| GpuMaterial::from(m.as_ref()))
        .collect();

    let settings = ProbeSettings {
        samples: options.samples,
        iteration: options.iteration,
        depth: options.depth,
        incidence_degrees: options.incidence,
    };

    for (id, material) in scene.materials.iter().enumerate() {
        let stats = probe_material(&table, id, &settings);
        log::info!(
            "{:<24} {:<16} mean weight {:.4} | mean pdf {:.4} | reflected {:.1}% | black {:.1}%",
            material.name,
            material.kind,
            stats.mean_weight,
            stats.mean_pdf,
            stats.reflected_fraction * 100.0,
            stats.black_fraction * 100.0
        );
    }

    Ok(())
}
