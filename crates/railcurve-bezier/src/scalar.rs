//! One-dimensional cubic Bezier curve.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::control_points::{lerp, ControlPoints};

/// A cubic Bezier over four scalar control points.
///
/// Evaluation is not clamped: `t` outside `[0, 1]` extrapolates the cubic.
/// Callers wanting boundary values clamp first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarCurve {
    points: ControlPoints<f64>,
}

impl ScalarCurve {
    pub const fn new(points: [f64; 4]) -> Self {
        Self {
            points: ControlPoints::new(points),
        }
    }

    /// Start a new curve where `previous` ends, with a matching derivative.
    pub fn continuation(previous: &ScalarCurve, c: f64, d: f64) -> Self {
        Self {
            points: previous.points.continuation(c, d),
        }
    }

    pub fn control_points(&self) -> ControlPoints<f64> {
        self.points
    }

    /// De Casteljau evaluation: exact at the ends and for constant curves.
    pub fn value(&self, t: f64) -> f64 {
        let [p0, p1, p2, p3] = self.points.0;
        let (a, b, c) = (lerp(p0, p1, t), lerp(p1, p2, t), lerp(p2, p3, t));
        lerp(lerp(a, b, t), lerp(b, c, t), t)
    }

    pub fn derivative(&self, t: f64) -> f64 {
        let [p0, p1, p2, p3] = self.points.0;
        let mt = 1.0 - t;
        3.0 * mt * mt * (p1 - p0) + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
    }

    pub fn second_derivative(&self, t: f64) -> f64 {
        let [p0, p1, p2, p3] = self.points.0;
        6.0 * (1.0 - t) * (p2 - 2.0 * p1 + p0) + 6.0 * t * (p3 - 2.0 * p2 + p1)
    }

    /// Subdivide at `t` into the curves covering `[0, t]` and `[t, 1]`.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let (left, right) = self.points.split(t);
        (Self { points: left }, Self { points: right })
    }
}

impl From<ControlPoints<f64>> for ScalarCurve {
    fn from(points: ControlPoints<f64>) -> Self {
        Self { points }
    }
}

impl fmt::Display for ScalarCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.points.0;
        write!(f, "[{a:.3}, {b:.3}, {c:.3}, {d:.3}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_endpoints() {
        let c = ScalarCurve::new([2.0, -7.0, 11.0, 5.0]);
        assert_eq!(c.value(0.0), 2.0);
        assert_eq!(c.value(1.0), 5.0);
    }

    #[test]
    fn test_constant_curve_is_exact() {
        let c = ScalarCurve::new([0.1; 4]);
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            assert_eq!(c.value(t), 0.1);
            assert_eq!(c.derivative(t), 0.0);
        }
    }

    #[test]
    fn test_linear_control_points_give_linear_value() {
        let c = ScalarCurve::new([0.0, 1.0, 2.0, 3.0]);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_abs_diff_eq!(c.value(t), 3.0 * t, epsilon = 1e-12);
            assert_abs_diff_eq!(c.derivative(t), 3.0, epsilon = 1e-12);
            assert_abs_diff_eq!(c.second_derivative(t), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let c = ScalarCurve::new([0.0, 10.0, -5.0, 7.0]);
        let h = 1e-6;
        for &t in &[0.1, 0.35, 0.5, 0.8] {
            let fd = (c.value(t + h) - c.value(t - h)) / (2.0 * h);
            assert_abs_diff_eq!(c.derivative(t), fd, epsilon = 1e-5);
            let fd2 = (c.derivative(t + h) - c.derivative(t - h)) / (2.0 * h);
            assert_abs_diff_eq!(c.second_derivative(t), fd2, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_extrapolates_outside_unit_interval() {
        let c = ScalarCurve::new([0.0, 1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(c.value(2.0), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.value(-1.0), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_split_reproduces_both_halves() {
        let c = ScalarCurve::new([1.0, 4.0, -2.0, 3.0]);
        let t = 0.3;
        let (left, right) = c.split(t);
        for i in 0..=10 {
            let s = i as f64 / 10.0;
            assert_abs_diff_eq!(left.value(s), c.value(s * t), epsilon = 1e-12);
            assert_abs_diff_eq!(right.value(s), c.value(t + s * (1.0 - t)), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_continuation_is_c1() {
        let a = ScalarCurve::new([0.0, 2.0, 1.0, 4.0]);
        let b = ScalarCurve::continuation(&a, 9.0, 3.0);
        assert_eq!(b.value(0.0), a.value(1.0));
        assert_abs_diff_eq!(b.derivative(0.0), a.derivative(1.0), epsilon = 1e-12);
        assert_eq!(b.value(1.0), 3.0);
    }

    #[test]
    fn test_display() {
        let c = ScalarCurve::new([0.0, 0.42, 1.0, 1.0]);
        assert_eq!(c.to_string(), "[0.000, 0.420, 1.000, 1.000]");
    }
}
