//! Three-dimensional cubic Bezier curve with eager arc-length and frame tables.

use log::trace;
use railcurve_core::{BoundingBox, CurveError, Result, Validate};
use railcurve_math::vector::normalize_or;
use railcurve_math::{Aabb3, DVec3, Frame, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::arc_length::ArcLengthTable;
use crate::control_points::ControlPoints;
use crate::curve::Curve;
use crate::frames::{self, FrameTable};
use crate::scalar::ScalarCurve;
use crate::settings::CurveSettings;

/// A cubic Bezier curve in 3D, composed of one [`ScalarCurve`] per axis.
///
/// Both lookup tables are computed once in the constructor and never change;
/// a different shape means a different `SpaceCurve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SpaceCurveDef", into = "SpaceCurveDef")]
pub struct SpaceCurve {
    control_points: ControlPoints<Point3>,
    axes: Axes,
    settings: CurveSettings,
    seed_right: Option<Vector3>,
    arc_lengths: ArcLengthTable,
    frames: FrameTable,
}

/// Serialized form: the inputs only. Tables are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct SpaceCurveDef {
    control_points: ControlPoints<Point3>,
    #[serde(default)]
    settings: CurveSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed_right: Option<Vector3>,
}

impl SpaceCurve {
    /// Build a curve with [`CurveSettings::default`].
    pub fn new(points: [Point3; 4]) -> Self {
        Self::build(ControlPoints::new(points), CurveSettings::default(), None)
    }

    pub fn with_settings(points: [Point3; 4], settings: CurveSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(ControlPoints::new(points), settings, None))
    }

    /// Build a curve whose first frame uses `right` (orthogonalized against
    /// the start tangent) instead of a curvature-derived seed.
    pub fn with_initial_right(
        points: [Point3; 4],
        settings: CurveSettings,
        right: Vector3,
    ) -> Result<Self> {
        settings.validate()?;
        if !right.is_finite() {
            return Err(CurveError::Geometry(format!(
                "initial right vector is not finite: {right}"
            )));
        }
        Ok(Self::build(ControlPoints::new(points), settings, Some(right)))
    }

    /// Curve from endpoint positions and velocities (Hermite form).
    pub fn from_motion(
        initial_position: Point3,
        initial_velocity: Vector3,
        final_position: Point3,
        final_velocity: Vector3,
    ) -> Self {
        Self::new([
            initial_position,
            initial_position + initial_velocity / 3.0,
            final_position - final_velocity / 3.0,
            final_position,
        ])
    }

    /// Start a new curve at the end of `previous` with matching velocity.
    ///
    /// Only `c` and `d` are free. The new curve inherits `previous`'s settings
    /// and continues its frame transport from the final frame.
    pub fn continuation(previous: &SpaceCurve, c: Point3, d: Point3) -> Self {
        Self::build(
            previous.control_points.continuation(c, d),
            previous.settings,
            Some(previous.frames.last().right),
        )
    }

    pub(crate) fn build(
        control_points: ControlPoints<Point3>,
        settings: CurveSettings,
        seed_right: Option<Vector3>,
    ) -> Self {
        let axes = Axes {
            x: ScalarCurve::from(control_points.map(|p| p.x)),
            y: ScalarCurve::from(control_points.map(|p| p.y)),
            z: ScalarCurve::from(control_points.map(|p| p.z)),
        };
        let chord = control_points.p3() - control_points.p0();

        let n = settings.samples;
        let params: Vec<f64> = (0..=n).map(|i| i as f64 / n as f64).collect();
        let positions: Vec<Point3> = params.iter().map(|&t| axes.position(t)).collect();
        let tangents: Vec<Vector3> = params
            .iter()
            .map(|&t| axes.tangent(t, chord, settings.epsilon))
            .collect();

        let arc_lengths = ArcLengthTable::from_positions(&positions);

        let seed = match seed_right {
            Some(right) => Frame::from_forward_right(positions[0], tangents[0], right),
            None => frames::seed_frame(
                positions[0],
                tangents[0],
                axes.velocity(0.0),
                axes.acceleration(0.0),
                settings.world_up,
                settings.epsilon,
            ),
        };
        let frames = FrameTable::transport(seed, &positions, &tangents);

        trace!(
            "built curve tables: {} samples, length {:.6}",
            n + 1,
            arc_lengths.total_length()
        );

        Self {
            control_points,
            axes,
            settings,
            seed_right,
            arc_lengths,
            frames,
        }
    }

    pub fn control_points(&self) -> ControlPoints<Point3> {
        self.control_points
    }

    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    /// Per-axis curves `(x, y, z)`.
    pub fn axes(&self) -> (&ScalarCurve, &ScalarCurve, &ScalarCurve) {
        (&self.axes.x, &self.axes.y, &self.axes.z)
    }

    pub fn arc_length_table(&self) -> &ArcLengthTable {
        &self.arc_lengths
    }

    pub fn frame_table(&self) -> &FrameTable {
        &self.frames
    }

    pub fn start(&self) -> Point3 {
        self.control_points.p0()
    }

    pub fn end(&self) -> Point3 {
        self.control_points.p3()
    }

    /// Subdivide at `t` into two curves covering `[0, t]` and `[t, 1]`.
    ///
    /// The second half continues the frame transport of this curve.
    pub fn split(&self, t: f64) -> (SpaceCurve, SpaceCurve) {
        let t = t.clamp(0.0, 1.0);
        let (left, right) = self.control_points.split(t);
        let seam_right = self.frame_at(t).right;
        (
            Self::build(left, self.settings, self.seed_right),
            Self::build(right, self.settings, Some(seam_right)),
        )
    }

    fn eval_position(&self, t: f64) -> Point3 {
        self.axes.position(t)
    }

    fn eval_velocity(&self, t: f64) -> Vector3 {
        self.axes.velocity(t)
    }

    fn eval_acceleration(&self, t: f64) -> Vector3 {
        self.axes.acceleration(t)
    }

    fn eval_tangent(&self, t: f64) -> Vector3 {
        let chord = self.control_points.p3() - self.control_points.p0();
        self.axes.tangent(t, chord, self.settings.epsilon)
    }
}

#[derive(Debug, Clone)]
struct Axes {
    x: ScalarCurve,
    y: ScalarCurve,
    z: ScalarCurve,
}

impl Axes {
    fn position(&self, t: f64) -> Point3 {
        DVec3::new(self.x.value(t), self.y.value(t), self.z.value(t))
    }

    fn velocity(&self, t: f64) -> Vector3 {
        DVec3::new(
            self.x.derivative(t),
            self.y.derivative(t),
            self.z.derivative(t),
        )
    }

    fn acceleration(&self, t: f64) -> Vector3 {
        DVec3::new(
            self.x.second_derivative(t),
            self.y.second_derivative(t),
            self.z.second_derivative(t),
        )
    }

    /// Unit velocity. Where the velocity vanishes (coincident handles) the
    /// acceleration gives the limiting direction; then the chord; then +X.
    fn tangent(&self, t: f64, chord: Vector3, eps: f64) -> Vector3 {
        let fallback = normalize_or(
            self.acceleration(t),
            normalize_or(chord, DVec3::X, eps),
            eps,
        );
        normalize_or(self.velocity(t), fallback, eps)
    }
}

impl Curve for SpaceCurve {
    fn position(&self, t: f64) -> Point3 {
        self.eval_position(t.clamp(0.0, 1.0))
    }

    fn velocity(&self, t: f64) -> Vector3 {
        self.eval_velocity(t.clamp(0.0, 1.0))
    }

    fn acceleration(&self, t: f64) -> Vector3 {
        self.eval_acceleration(t.clamp(0.0, 1.0))
    }

    fn tangent(&self, t: f64) -> Vector3 {
        self.eval_tangent(t.clamp(0.0, 1.0))
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn length(&self) -> f64 {
        self.arc_lengths.total_length()
    }

    fn distance_at_parameter(&self, t: f64) -> f64 {
        self.arc_lengths.distance_at(t)
    }

    fn parameter_at_distance(&self, distance: f64) -> f64 {
        self.arc_lengths.parameter_at(
            distance,
            self.settings.epsilon,
            self.settings.search_iterations,
        )
    }

    fn frame_at(&self, t: f64) -> Frame {
        let t = t.clamp(0.0, 1.0);
        self.frames
            .frame_at(t, self.eval_position(t), self.eval_tangent(t))
    }

    fn frenet_frame(&self, t: f64) -> Frame {
        let t = t.clamp(0.0, 1.0);
        frames::frenet_frame(
            self.eval_position(t),
            self.eval_tangent(t),
            self.eval_velocity(t),
            self.eval_acceleration(t),
            self.settings.world_up,
            self.settings.epsilon,
        )
    }
}

impl BoundingBox for SpaceCurve {
    type Point = Point3;

    /// Bounds of the control polygon, which contains the curve.
    fn bounding_box(&self) -> (Point3, Point3) {
        let aabb = Aabb3::from_points(self.control_points.to_array())
            .unwrap_or_else(|| Aabb3::new(self.start(), self.start()));
        (aabb.min, aabb.max)
    }
}

impl TryFrom<SpaceCurveDef> for SpaceCurve {
    type Error = CurveError;

    fn try_from(def: SpaceCurveDef) -> Result<Self> {
        def.settings.validate()?;
        Ok(Self::build(def.control_points, def.settings, def.seed_right))
    }
}

impl From<SpaceCurve> for SpaceCurveDef {
    fn from(curve: SpaceCurve) -> Self {
        Self {
            control_points: curve.control_points,
            settings: curve.settings,
            seed_right: curve.seed_right,
        }
    }
}
