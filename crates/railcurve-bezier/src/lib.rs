//! Railcurve curve engine: cubic Bezier evaluation, arc-length
//! reparameterization, and rotation-minimizing frames.
//!
//! [`ScalarCurve`] evaluates one axis, [`SpaceCurve`] combines three axes and
//! precomputes its arc-length and frame tables, and [`CurvePath`] chains
//! segments under a single global parameter. Everything is immutable after
//! construction and can be shared freely between threads.

pub mod arc_length;
pub mod control_points;
pub mod curve;
pub mod frames;
pub mod path;
pub mod sampling;
pub mod scalar;
pub mod settings;
pub mod space;
pub mod timing;

pub use arc_length::ArcLengthTable;
pub use control_points::{ControlPoints, ControlValue};
pub use curve::Curve;
pub use frames::FrameTable;
pub use path::CurvePath;
pub use scalar::ScalarCurve;
pub use settings::CurveSettings;
pub use space::SpaceCurve;
