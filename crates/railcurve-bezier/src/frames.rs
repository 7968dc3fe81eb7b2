//! Rotation-minimizing frame table built by double reflection, plus the
//! curvature-based (Frenet) alternative.

use log::debug;
use railcurve_math::vector::reflect;
use railcurve_math::{Frame, Point3, Vector3};

/// Sine of the angle between velocity and acceleration below which the
/// binormal is considered undefined.
const PARALLEL_THRESHOLD: f64 = 1e-9;

/// Unit binormal `v × a`, or `None` on straight sections and inflections.
pub(crate) fn binormal(velocity: Vector3, acceleration: Vector3, epsilon: f64) -> Option<Vector3> {
    let scale = velocity.length() * acceleration.length();
    if scale <= epsilon {
        return None;
    }
    let b = velocity.cross(acceleration);
    let len = b.length();
    if len <= scale * PARALLEL_THRESHOLD {
        return None;
    }
    Some(b / len)
}

/// Curvature-derived frame: up along the binormal, right away from the
/// centre of curvature. Falls back to `world_up` where the binormal vanishes.
pub(crate) fn frenet_frame(
    position: Point3,
    forward: Vector3,
    velocity: Vector3,
    acceleration: Vector3,
    world_up: Vector3,
    epsilon: f64,
) -> Frame {
    let up = binormal(velocity, acceleration, epsilon).unwrap_or(world_up);
    Frame::from_forward_up(position, forward, up)
}

/// Initial frame for transport: the binormal oriented toward `world_up`, or
/// `world_up` itself where the binormal is undefined.
pub(crate) fn seed_frame(
    position: Point3,
    forward: Vector3,
    velocity: Vector3,
    acceleration: Vector3,
    world_up: Vector3,
    epsilon: f64,
) -> Frame {
    match binormal(velocity, acceleration, epsilon) {
        Some(b) => {
            let up = if b.dot(world_up) < 0.0 { -b } else { b };
            Frame::from_forward_up(position, forward, up)
        }
        None => {
            debug!("frame seed has no curvature direction, using world up {world_up}");
            Frame::from_forward_up(position, forward, world_up)
        }
    }
}

/// Orientation frames at uniform parameter steps `i / N`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl FrameTable {
    /// Transport `seed` along the sampled curve using the double reflection
    /// method. `positions` and `tangents` must have equal length and
    /// `tangents` must be unit vectors.
    pub fn transport(seed: Frame, positions: &[Point3], tangents: &[Vector3]) -> Self {
        debug_assert_eq!(positions.len(), tangents.len());
        let mut frames = Vec::with_capacity(positions.len());
        frames.push(seed);

        for i in 1..positions.len() {
            let prev = frames[i - 1];

            // First reflection: across the plane bisecting the chord
            let v1 = positions[i] - positions[i - 1];
            let right_l = reflect(prev.right, v1);
            let forward_l = reflect(prev.forward, v1);

            // Second reflection: maps the reflected tangent onto the new one
            let v2 = tangents[i] - forward_l;
            let right = reflect(right_l, v2);

            frames.push(Frame::from_forward_right(positions[i], tangents[i], right));
        }

        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn first(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn last(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    /// Frame at parameter `t` with the given exact position and forward.
    ///
    /// The right vector is blended between the bracketing table entries and
    /// re-orthogonalized against `forward`.
    pub fn frame_at(&self, t: f64, position: Point3, forward: Vector3) -> Frame {
        let n = self.frames.len() - 1;
        if n == 0 {
            return Frame::from_forward_right(position, forward, self.frames[0].right);
        }
        let x = t.clamp(0.0, 1.0) * n as f64;
        let i = (x.floor() as usize).min(n - 1);
        let frac = x - i as f64;
        let right = self.frames[i].right.lerp(self.frames[i + 1].right, frac);
        Frame::from_forward_right(position, forward, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railcurve_math::{dvec3, DVec3};
    use std::f64::consts::TAU;

    fn helix(samples: usize) -> (Vec<Point3>, Vec<Vector3>) {
        (0..=samples)
            .map(|i| {
                let a = TAU * i as f64 / samples as f64;
                let p = dvec3(a.cos(), a.sin(), 0.3 * a);
                let v = dvec3(-a.sin(), a.cos(), 0.3).normalize();
                (p, v)
            })
            .unzip()
    }

    #[test]
    fn test_straight_line_keeps_seed() {
        let positions: Vec<_> = (0..=10).map(|i| dvec3(i as f64, 0.0, 0.0)).collect();
        let tangents = vec![DVec3::X; 11];
        let seed = Frame::from_forward_up(positions[0], DVec3::X, DVec3::Z);
        let table = FrameTable::transport(seed, &positions, &tangents);

        for f in table.frames() {
            assert!((f.right - seed.right).length() < 1e-12);
            assert!((f.up - DVec3::Z).length() < 1e-12);
        }
    }

    #[test]
    fn test_helix_frames_orthonormal_and_smooth() {
        let (positions, tangents) = helix(200);
        let seed = Frame::from_forward_up(positions[0], tangents[0], DVec3::Z);
        let table = FrameTable::transport(seed, &positions, &tangents);

        assert_eq!(table.frames().len(), 201);
        for f in table.frames() {
            assert!(f.is_orthonormal(1e-9));
        }
        for pair in table.frames().windows(2) {
            assert!(pair[0].right.dot(pair[1].right) > 0.99);
        }
    }

    #[test]
    fn test_binormal_degenerate_cases() {
        assert!(binormal(DVec3::X, DVec3::ZERO, 1e-9).is_none());
        assert!(binormal(DVec3::X, dvec3(5.0, 0.0, 0.0), 1e-9).is_none());
        let b = binormal(DVec3::X, DVec3::Y, 1e-9).unwrap();
        assert!((b - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_seed_prefers_world_up_side() {
        // Right-hand turn in the XY plane has binormal -Z
        let f = seed_frame(DVec3::ZERO, DVec3::X, DVec3::X, -DVec3::Y, DVec3::Z, 1e-9);
        assert!((f.up - DVec3::Z).length() < 1e-12);

        let f = frenet_frame(DVec3::ZERO, DVec3::X, DVec3::X, -DVec3::Y, DVec3::Z, 1e-9);
        assert!((f.up + DVec3::Z).length() < 1e-12);
    }
}
