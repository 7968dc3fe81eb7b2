use crate::frame::Frame;
use crate::{DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid body transform (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    /// Local +X maps to forward, +Y to right, +Z to up, origin to position.
    pub fn from_frame(frame: &Frame) -> Self {
        Self::from_mat4(DMat4::from_cols(
            frame.forward.extend(0.0),
            frame.right.extend(0.0),
            frame.up.extend(0.0),
            frame.position.extend(1.0),
        ))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }
}

impl From<Frame> for Transform {
    fn from(frame: Frame) -> Self {
        Self::from_frame(&frame)
    }
}
