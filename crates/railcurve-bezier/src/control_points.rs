//! The four control points of a cubic Bezier segment.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Values that can be linearly interpolated: scalars and vectors.
pub trait ControlValue:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
}

impl<T> ControlValue for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>
{
}

/// Exact at both ends and for `a == b`.
pub(crate) fn lerp<T: ControlValue>(a: T, b: T, t: f64) -> T {
    if t <= 0.5 {
        a + (b - a) * t
    } else {
        b - (b - a) * (1.0 - t)
    }
}

/// Exactly four control points `p0..p3` of one cubic segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoints<T>(pub [T; 4]);

impl<T: Copy> ControlPoints<T> {
    pub const fn new(points: [T; 4]) -> Self {
        Self(points)
    }

    pub fn p0(&self) -> T {
        self.0[0]
    }

    pub fn p1(&self) -> T {
        self.0[1]
    }

    pub fn p2(&self) -> T {
        self.0[2]
    }

    pub fn p3(&self) -> T {
        self.0[3]
    }

    pub fn to_array(self) -> [T; 4] {
        self.0
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ControlPoints<U> {
        ControlPoints(self.0.map(f))
    }
}

impl<T: ControlValue> ControlPoints<T> {
    /// De Casteljau subdivision at `t`.
    ///
    /// The first half reproduces this curve on `[0, t]`, the second on `[t, 1]`.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let [p0, p1, p2, p3] = self.0;
        let a = lerp(p0, p1, t);
        let b = lerp(p1, p2, t);
        let c = lerp(p2, p3, t);
        let d = lerp(a, b, t);
        let e = lerp(b, c, t);
        let f = lerp(d, e, t);
        (Self([p0, a, d, f]), Self([f, e, c, p3]))
    }

    /// Control points continuing this segment with C1 continuity.
    ///
    /// The new segment starts at `p3` with first handle `2·p3 − p2`; only its
    /// last two points are free.
    pub fn continuation(&self, c: T, d: T) -> Self {
        let p3 = self.p3();
        Self([p3, p3 * 2.0 - self.p2(), c, d])
    }
}

impl<T> From<[T; 4]> for ControlPoints<T> {
    fn from(points: [T; 4]) -> Self {
        Self(points)
    }
}
