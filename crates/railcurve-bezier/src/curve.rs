//! The query surface shared by single curves and paths.

use railcurve_math::{Frame, Point3, Vector3};

/// A parametric curve in 3D space with arc-length and orientation queries.
///
/// Parameters outside [`Curve::domain`] are clamped to the nearest end.
pub trait Curve: Send + Sync {
    /// Evaluate the position at parameter `t`.
    fn position(&self, t: f64) -> Point3;

    /// First derivative with respect to the parameter.
    fn velocity(&self, t: f64) -> Vector3;

    /// Second derivative with respect to the parameter.
    fn acceleration(&self, t: f64) -> Vector3;

    /// Unit direction of travel at `t`. Never zero or NaN.
    fn tangent(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Total arc length.
    fn length(&self) -> f64;

    /// Arc length travelled from the start to parameter `t`.
    fn distance_at_parameter(&self, t: f64) -> f64;

    /// Parameter reached after travelling `distance` from the start.
    fn parameter_at_distance(&self, distance: f64) -> f64;

    /// Rotation-minimizing frame at `t`.
    fn frame_at(&self, t: f64) -> Frame;

    /// Curvature-derived frame at `t`; locally exact but may flip at inflections.
    fn frenet_frame(&self, t: f64) -> Frame;

    /// Curvature `|v × a| / |v|³`, zero where the velocity vanishes.
    fn curvature(&self, t: f64) -> f64 {
        let v = self.velocity(t);
        let speed = v.length();
        if speed <= f64::EPSILON {
            return 0.0;
        }
        v.cross(self.acceleration(t)).length() / (speed * speed * speed)
    }
}
