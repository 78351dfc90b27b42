//! Local shading frame.
//!
//! In the local frame the surface normal is the +Z axis, so the cosine of
//! the angle between a direction and the normal is just its z component.

use glam::{Mat3, Vec3};

/// Build two unit vectors orthogonal to `n` (assumed normalized).
///
/// Picks the helper from the larger of |n.x| and |n.y| so the cross
/// product never degenerates for near-axis normals.
pub fn coordinate_system(n: Vec3) -> (Vec3, Vec3) {
    let tangent = if n.x.abs() > n.y.abs() {
        Vec3::new(-n.z, 0.0, n.x) / (n.x * n.x + n.z * n.z).sqrt()
    } else {
        Vec3::new(0.0, n.z, -n.y) / (n.y * n.y + n.z * n.z).sqrt()
    };
    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}

/// Orthonormal basis around a surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingFrame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
}

impl ShadingFrame {
    /// Build a frame from a world-space normal.
    ///
    /// The normal is renormalized; a zero-length or non-finite normal falls
    /// back to +Z so the frame stays orthonormal.
    pub fn new(normal: Vec3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vec3::Z);
        let (tangent, bitangent) = coordinate_system(normal);
        Self {
            tangent,
            bitangent,
            normal,
        }
    }

    /// Matrix taking local directions to world space (columns t, b, n).
    #[inline]
    pub fn local_to_world(&self) -> Mat3 {
        Mat3::from_cols(self.tangent, self.bitangent, self.normal)
    }

    /// Matrix taking world directions to local space.
    ///
    /// Always the transpose of [`Self::local_to_world`].
    #[inline]
    pub fn world_to_local(&self) -> Mat3 {
        self.local_to_world().transpose()
    }

    #[inline]
    pub fn to_local(&self, v: Vec3) -> Vec3 {
        self.world_to_local() * v
    }

    #[inline]
    pub fn to_world(&self, v: Vec3) -> Vec3 {
        self.local_to_world() * v
    }
}

/// World→local basis change for `normal`.
pub fn world_to_local(normal: Vec3) -> Mat3 {
    ShadingFrame::new(normal).world_to_local()
}

/// Local→world basis change for `normal`.
pub fn local_to_world(normal: Vec3) -> Mat3 {
    ShadingFrame::new(normal).local_to_world()
}
