//! Parameter remapping: easing curves and small combinators over `f64 -> f64`.

use std::f64::consts::TAU;

use crate::scalar::ScalarCurve;

pub const EASE_IN: ScalarCurve = ScalarCurve::new([0.0, 0.42, 1.0, 1.0]);
pub const EASE_OUT: ScalarCurve = ScalarCurve::new([0.0, 0.0, 0.58, 1.0]);
pub const EASE_IN_OUT: ScalarCurve = ScalarCurve::new([0.0, 0.42, 0.58, 1.0]);

/// A boxed remapping stage for [`pipe`].
pub type Remap = Box<dyn Fn(f64) -> f64 + Send + Sync>;

pub fn ease_in(t: f64) -> f64 {
    EASE_IN.value(t)
}

pub fn ease_out(t: f64) -> f64 {
    EASE_OUT.value(t)
}

pub fn ease_in_out(t: f64) -> f64 {
    EASE_IN_OUT.value(t)
}

pub fn clamp(min: f64, max: f64) -> impl Fn(f64) -> f64 + Send + Sync {
    move |t| t.clamp(min, max)
}

/// Wrap into `[min, max)`, repeating. Negative inputs wrap too.
pub fn wrap(min: f64, max: f64) -> impl Fn(f64) -> f64 + Send + Sync {
    let period = max - min;
    move |t| (t - min).rem_euclid(period) + min
}

pub fn affine(scale: f64, shift: f64) -> impl Fn(f64) -> f64 + Send + Sync {
    move |t| t * scale + shift
}

/// Triangle wave: 0 at even integers, 1 at odd integers.
pub fn saw(t: f64) -> f64 {
    let m = t.rem_euclid(2.0);
    m.min(2.0 - m)
}

/// Smooth wave with period 1: 0 at integers, 1 at half-integers.
pub fn sine(t: f64) -> f64 {
    0.5 - (t * TAU).cos() * 0.5
}

/// Apply `stages` in order, then hand the result to `output`.
///
/// `output` is typically a curve query, e.g. `|t| curve.position(t)`; pass
/// `|t| t` to keep the remapped parameter.
pub fn pipe<T, F>(stages: Vec<Remap>, output: F) -> impl Fn(f64) -> T + Send + Sync
where
    F: Fn(f64) -> T + Send + Sync,
{
    move |t| output(stages.iter().fold(t, |acc, stage| stage(acc)))
}
