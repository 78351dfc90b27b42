//! Per-path random sample streams.
//!
//! Every path gets its own generator seeded from (iteration, path index,
//! depth), so a render is reproducible and no generator is ever shared
//! between workers.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Integer hash used to decorrelate neighbouring seeds.
#[inline]
pub fn hash_u32(mut a: u32) -> u32 {
    a = a.wrapping_add(0x7ed5_5d16).wrapping_add(a << 12);
    a = (a ^ 0xc761_c23c) ^ (a >> 19);
    a = a.wrapping_add(0x1656_67b1).wrapping_add(a << 5);
    a = a.wrapping_add(0xd3a2_646c) ^ (a << 9);
    a = a.wrapping_add(0xfd70_46c5).wrapping_add(a << 3);
    a = (a ^ 0xb55a_4f09) ^ (a >> 16);
    a
}

/// Seed for one path at one bounce.
///
/// The low 32 bits hash the iteration, depth and the low half of the path
/// index; the high half of the index fills the upper 32 bits, so indices
/// past `u32::MAX` never share a stream with smaller ones.
pub fn path_seed(iteration: u32, path_index: u64, depth: u32) -> u64 {
    let low = path_index as u32;
    let high = (path_index >> 32) as u32;
    let h = hash_u32((1 << 31) | (depth << 22) | iteration) ^ hash_u32(low);
    u64::from(h) | (u64::from(high) << 32)
}

/// Generator for one path at one bounce.
pub fn seeded_rng(iteration: u32, path_index: u64, depth: u32) -> StdRng {
    StdRng::seed_from_u64(path_seed(iteration, path_index, depth))
}

/// Uniform variate in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Pair of uniform variates in [0, 1)².
#[inline]
pub fn gen_2d(rng: &mut dyn RngCore) -> glint_math::Vec2 {
    let u = gen_f32(rng);
    let v = gen_f32(rng);
    glint_math::Vec2::new(u, v)
}
