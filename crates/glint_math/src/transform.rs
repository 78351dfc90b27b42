// Transform utilities for Mat4
//
// Scene objects are placed with a translation, per-axis Euler rotation in
// degrees and a non-uniform scale.

use glam::{Mat4, Vec3};

/// Compose an object-to-world matrix.
///
/// Order: Scale -> RotateZ -> RotateY -> RotateX -> Translate, i.e. the
/// matrix is `T * Rx * Ry * Rz * S`.
pub fn build_transformation_matrix(translation: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Mat4 {
    let translate = Mat4::from_translation(translation);
    let rotate = Mat4::from_rotation_x(rotation_degrees.x.to_radians())
        * Mat4::from_rotation_y(rotation_degrees.y.to_radians())
        * Mat4::from_rotation_z(rotation_degrees.z.to_radians());
    let scale = Mat4::from_scale(scale);
    translate * rotate * scale
}
