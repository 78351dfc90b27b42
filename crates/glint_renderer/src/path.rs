//! Per-path state carried between bounces.

use glint_core::Color;
use glint_math::{Ray, Vec3};

use crate::bsdf::BsdfSample;

/// One in-flight light path.
///
/// Owned by exactly one worker per bounce; only [`crate::scatter_ray`]
/// rewrites its ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub ray: Ray,
    /// Product of estimator weights along the path so far
    pub throughput: Color,
    /// Pixel this path contributes to
    pub pixel_index: usize,
    pub remaining_bounces: u32,
}

impl PathSegment {
    pub fn new(ray: Ray, pixel_index: usize, remaining_bounces: u32) -> Self {
        Self {
            ray,
            throughput: Color::ONE,
            pixel_index,
            remaining_bounces,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.remaining_bounces > 0
    }

    pub fn terminate(&mut self) {
        self.remaining_bounces = 0;
    }

    /// Fold a scattering sample into the throughput and spend a bounce.
    ///
    /// Black samples terminate the path.
    pub fn attenuate(&mut self, sample: &BsdfSample, normal: Vec3) {
        if sample.is_black() {
            self.throughput = Color::ZERO;
            self.terminate();
            return;
        }

        self.throughput *= sample.weight(normal);
        self.remaining_bounces = self.remaining_bounces.saturating_sub(1);
    }
}
