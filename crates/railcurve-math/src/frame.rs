//! Oriented frame: a position plus an orthonormal forward/right/up basis.

use serde::{Deserialize, Serialize};

use crate::transform::Transform;
use crate::vector::{any_orthogonal, normalize_or};
use crate::{DVec3, Point3, Vector3};

/// Position and orientation of a sample along a curve.
///
/// The basis is right-handed with `up = right × forward`, so with +Z up and
/// forward along +X the right vector is -Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub position: Point3,
    pub forward: Vector3,
    pub right: Vector3,
    pub up: Vector3,
}

impl Frame {
    pub fn new(position: Point3, forward: Vector3, right: Vector3, up: Vector3) -> Self {
        Self {
            position,
            forward,
            right,
            up,
        }
    }

    /// Build a frame from a forward direction and an approximate right vector.
    ///
    /// Forward is kept (normalized), right is made orthogonal to it, and up is
    /// derived. If right is parallel to forward an arbitrary perpendicular is used.
    pub fn from_forward_right(position: Point3, forward: Vector3, right: Vector3) -> Self {
        let forward = normalize_or(forward, DVec3::X, 0.0);
        let right = right - forward * forward.dot(right);
        let right = normalize_or(right, any_orthogonal(forward), 1e-12);
        let up = right.cross(forward);
        Self::new(position, forward, right, up)
    }

    /// Build a frame from a forward direction and an approximate up vector.
    pub fn from_forward_up(position: Point3, forward: Vector3, up: Vector3) -> Self {
        let forward = normalize_or(forward, DVec3::X, 0.0);
        Self::from_forward_right(position, forward, forward.cross(up))
    }

    /// Re-orthonormalize, keeping the forward direction exact.
    pub fn reorthonormalize(self) -> Self {
        Self::from_forward_right(self.position, self.forward, self.right)
    }

    /// Check that all axes are unit length and pairwise orthogonal within `eps`.
    pub fn is_orthonormal(&self, eps: f64) -> bool {
        (self.forward.length() - 1.0).abs() < eps
            && (self.right.length() - 1.0).abs() < eps
            && (self.up.length() - 1.0).abs() < eps
            && self.forward.dot(self.right).abs() < eps
            && self.forward.dot(self.up).abs() < eps
            && self.right.dot(self.up).abs() < eps
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.forward.is_finite()
            && self.right.is_finite()
            && self.up.is_finite()
    }

    /// Position + orientation as a 4x4 transform (columns forward, right, up, position).
    pub fn to_transform(&self) -> Transform {
        Transform::from_frame(self)
    }
}
