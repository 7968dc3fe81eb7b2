//! Small vector helpers shared by the curve and frame code.

use crate::{DVec3, Vector3};

/// Normalize `v`, or return `fallback` when its length is at most `epsilon`.
pub fn normalize_or(v: Vector3, fallback: Vector3, epsilon: f64) -> Vector3 {
    let len = v.length();
    if len > epsilon && len.is_finite() {
        v / len
    } else {
        fallback
    }
}

/// Reflect `v` across the plane through the origin whose normal is `normal`.
///
/// `normal` does not need to be unit length. A zero normal leaves `v` unchanged.
pub fn reflect(v: Vector3, normal: Vector3) -> Vector3 {
    let c = normal.length_squared();
    if c <= f64::MIN_POSITIVE {
        return v;
    }
    v - normal * (2.0 * v.dot(normal) / c)
}

/// A unit vector perpendicular to `v`.
pub fn any_orthogonal(v: Vector3) -> Vector3 {
    // Pick a reference axis that is not close to parallel with v
    let reference = if v.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    normalize_or(v.cross(reference), DVec3::Z, 0.0)
}
