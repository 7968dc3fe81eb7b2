//! Railcurve track layout: straights and quarter-circle turns chained into a
//! [`CurvePath`](railcurve_bezier::CurvePath) with continuous orientation.

pub mod section;
pub mod track;

pub use section::{Section, Turn, CIRCLE_HANDLE};
pub use track::{Track, TrackBuilder, TrackLayout};
