//! Track sections and the cubic control points that approximate them.

use railcurve_core::{CurveError, Result, Validate};
use railcurve_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Handle length, as a fraction of the radius, for a cubic quarter circle.
///
/// See <https://spencermortensen.com/articles/bezier-circle/>.
pub const CIRCLE_HANDLE: f64 = 0.5519150244935;

/// Turn direction as seen from above (looking down the up axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

/// One piece of a track layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Section {
    /// Straight run along the current heading.
    Straight { length: f64 },
    /// Quarter-circle turn; `rise` is the height gained over the turn.
    Turn { radius: f64, turn: Turn, rise: f64 },
}

/// Where the next section starts: a position and a horizontal unit heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub position: Point3,
    pub heading: Vector3,
}

impl Section {
    /// Control points for this section starting at `cursor`, and the cursor
    /// where it ends. `up` must be a unit vector perpendicular to the heading.
    pub fn control_points(&self, cursor: Cursor, up: Vector3) -> ([Point3; 4], Cursor) {
        let Cursor { position: p, heading: d } = cursor;
        match *self {
            Section::Straight { length } => {
                let end = p + d * length;
                let points = [p, p + d * (length / 3.0), p + d * (2.0 * length / 3.0), end];
                (points, Cursor { position: end, heading: d })
            }
            Section::Turn { radius, turn, rise } => {
                let side = match turn {
                    Turn::Left => up.cross(d),
                    Turn::Right => d.cross(up),
                };
                let handle = radius * CIRCLE_HANDLE;
                let end = p + d * radius + side * radius + up * rise;
                let points = [p, p + d * handle, end - side * handle, end];
                (points, Cursor { position: end, heading: side })
            }
        }
    }
}

impl Validate for Section {
    fn validate(&self) -> Result<()> {
        match *self {
            Section::Straight { length } => {
                if !(length.is_finite() && length > 0.0) {
                    return Err(CurveError::Geometry(format!(
                        "straight length must be positive, got {length}"
                    )));
                }
            }
            Section::Turn { radius, rise, .. } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(CurveError::Geometry(format!(
                        "turn radius must be positive, got {radius}"
                    )));
                }
                if !rise.is_finite() {
                    return Err(CurveError::Geometry(format!("turn rise is not finite: {rise}")));
                }
            }
        }
        Ok(())
    }
}
