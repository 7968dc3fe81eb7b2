//! Discretize curves into points and frames.

use railcurve_math::{Frame, Point3};
use rayon::prelude::*;

use crate::curve::Curve;

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Upper bound on the steps of a distance-based sampling.
pub const MAX_STEPS: usize = 1 << 20;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// Parameter intervals are split while the curve's midpoint deviates from
/// the chord midpoint by more than `tolerance`.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.position(t_min)];
    subdivide(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

fn subdivide(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    let p1 = curve.position(t1);
    if depth >= MAX_DEPTH {
        points.push(p1);
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let chord_mid = (curve.position(t0) + p1) * 0.5;
    let deviation = curve.position(t_mid).distance(chord_mid);

    // Always split once per unit of domain so S-shaped spans are not missed
    if deviation > tolerance || depth == 0 {
        subdivide(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}

/// Positions at even arc-length spacing, including both ends.
///
/// The spacing is shrunk slightly so the curve divides into whole steps, and
/// widened when it would take more than [`MAX_STEPS`] steps.
pub fn sample_by_distance(curve: &dyn Curve, spacing: f64) -> Vec<Point3> {
    let length = curve.length();
    let steps = step_count(length, spacing);
    let step = length / steps as f64;
    (0..=steps)
        .map(|i| curve.position(curve.parameter_at_distance(i as f64 * step)))
        .collect()
}

/// `count + 1` frames at even arc-length spacing, evaluated in parallel.
pub fn sample_frames_by_distance(curve: &dyn Curve, count: usize) -> Vec<Frame> {
    let count = count.max(1);
    let step = curve.length() / count as f64;
    (0..=count)
        .into_par_iter()
        .map(|i| curve.frame_at(curve.parameter_at_distance(i as f64 * step)))
        .collect()
}

fn step_count(length: f64, spacing: f64) -> usize {
    if spacing.is_nan() || spacing <= 0.0 || !length.is_finite() {
        return 1;
    }
    // Absorb rounding in the table total so exact multiples do not gain a step
    ((length / spacing - 1e-9).ceil().min(MAX_STEPS as f64) as usize).max(1)
}
