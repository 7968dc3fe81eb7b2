//! Railcurve math primitives built on glam's double-precision types.

pub mod aabb;
pub mod frame;
pub mod transform;
pub mod vector;

pub use glam::{dvec3, DMat3, DMat4, DVec3, DVec4};
pub use aabb::Aabb3;
pub use frame::Frame;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
