//! A chain of [`SpaceCurve`] segments addressed by one global parameter.

use log::debug;
use railcurve_core::{BoundingBox, CurveError, Result, Validate};
use railcurve_math::{Aabb3, Frame, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::settings::CurveSettings;
use crate::space::SpaceCurve;

/// Consecutive cubic segments parameterized by `T ∈ [0, segment_count]`.
///
/// `floor(T)` selects the segment and the fractional part is the local
/// parameter; `T == segment_count` is the end of the last segment.
///
/// Segments passed to [`CurvePath::from_segments`] are assumed to join end to
/// start. That precondition is not checked. [`CurvePath::add_segment`] and
/// [`CurvePath::from_control_points`] produce C1 joins and continuous frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<SpaceCurve>", into = "Vec<SpaceCurve>")]
pub struct CurvePath {
    segments: Vec<SpaceCurve>,
    /// `offsets[i]` is the arc length before segment `i`; the last entry is the total.
    offsets: Vec<f64>,
}

impl CurvePath {
    pub fn new(initial: SpaceCurve) -> Self {
        Self::assemble(vec![initial])
    }

    pub fn from_segments(segments: Vec<SpaceCurve>) -> Result<Self> {
        if segments.is_empty() {
            return Err(CurveError::EmptyPath);
        }
        Ok(Self::assemble(segments))
    }

    /// Build a path from explicit control points, carrying the frame of each
    /// segment's end into the next so orientation is continuous at the joins.
    pub fn from_control_points<I>(points: I, settings: CurveSettings) -> Result<Self>
    where
        I: IntoIterator<Item = [Point3; 4]>,
    {
        settings.validate()?;
        let mut segments: Vec<SpaceCurve> = Vec::new();
        for cp in points {
            let seed = segments.last().map(|prev| prev.frame_table().last().right);
            segments.push(SpaceCurve::build(cp.into(), settings, seed));
        }
        Self::from_segments(segments)
    }

    fn assemble(segments: Vec<SpaceCurve>) -> Self {
        let mut offsets = Vec::with_capacity(segments.len() + 1);
        let mut total = 0.0;
        offsets.push(total);
        for segment in &segments {
            total += segment.length();
            offsets.push(total);
        }
        debug!(
            "assembled curve path: {} segments, length {:.6}",
            segments.len(),
            total
        );
        Self { segments, offsets }
    }

    /// Append a segment ending at `end_point` and arriving with handle
    /// `exit_tangent` (its third control point is `end_point - exit_tangent`).
    ///
    /// The new segment starts where the path ends with matching velocity.
    pub fn add_segment(self, end_point: Point3, exit_tangent: Vector3) -> Self {
        let next = SpaceCurve::continuation(self.last(), end_point - exit_tangent, end_point);
        let mut segments = self.segments;
        segments.push(next);
        Self::assemble(segments)
    }

    pub fn segments(&self) -> &[SpaceCurve] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn try_segment(&self, index: usize) -> Result<&SpaceCurve> {
        self.segments
            .get(index)
            .ok_or(CurveError::SegmentOutOfRange {
                index,
                count: self.segments.len(),
            })
    }

    pub fn first(&self) -> &SpaceCurve {
        &self.segments[0]
    }

    pub fn last(&self) -> &SpaceCurve {
        &self.segments[self.segments.len() - 1]
    }

    /// Arc length before each segment, followed by the total length.
    pub fn segment_offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Segment index and local parameter for global parameter `t`.
    pub fn locate(&self, t: f64) -> (usize, f64) {
        let count = self.segments.len();
        let t = t.clamp(0.0, count as f64);
        if t >= count as f64 {
            return (count - 1, 1.0);
        }
        let index = t.floor() as usize;
        (index, t - index as f64)
    }

    /// Smallest epsilon among the segments; segments may carry different settings.
    fn epsilon(&self) -> f64 {
        self.segments
            .iter()
            .map(|segment| segment.settings().epsilon)
            .fold(f64::INFINITY, f64::min)
    }
}

impl Curve for CurvePath {
    fn position(&self, t: f64) -> Point3 {
        let (i, local) = self.locate(t);
        self.segments[i].position(local)
    }

    fn velocity(&self, t: f64) -> Vector3 {
        let (i, local) = self.locate(t);
        self.segments[i].velocity(local)
    }

    fn acceleration(&self, t: f64) -> Vector3 {
        let (i, local) = self.locate(t);
        self.segments[i].acceleration(local)
    }

    fn tangent(&self, t: f64) -> Vector3 {
        let (i, local) = self.locate(t);
        self.segments[i].tangent(local)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.segments.len() as f64)
    }

    fn length(&self) -> f64 {
        self.offsets[self.offsets.len() - 1]
    }

    fn distance_at_parameter(&self, t: f64) -> f64 {
        let (i, local) = self.locate(t);
        self.offsets[i] + self.segments[i].distance_at_parameter(local)
    }

    fn parameter_at_distance(&self, distance: f64) -> f64 {
        if distance <= self.epsilon() {
            return 0.0;
        }
        let count = self.segments.len();
        if distance >= self.length() {
            return count as f64;
        }
        // Last segment starting at or before `distance`
        let index = self.offsets[..count]
            .partition_point(|&offset| offset <= distance)
            .saturating_sub(1);
        let local = self.segments[index].parameter_at_distance(distance - self.offsets[index]);
        index as f64 + local
    }

    fn frame_at(&self, t: f64) -> Frame {
        let (i, local) = self.locate(t);
        self.segments[i].frame_at(local)
    }

    fn frenet_frame(&self, t: f64) -> Frame {
        let (i, local) = self.locate(t);
        self.segments[i].frenet_frame(local)
    }
}

impl BoundingBox for CurvePath {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        let aabb = self
            .segments
            .iter()
            .map(|segment| {
                let (min, max) = segment.bounding_box();
                Aabb3::new(min, max)
            })
            .reduce(|a, b| a.merge(&b))
            .unwrap_or_else(|| Aabb3::new(Point3::ZERO, Point3::ZERO));
        (aabb.min, aabb.max)
    }
}

impl TryFrom<Vec<SpaceCurve>> for CurvePath {
    type Error = CurveError;

    fn try_from(segments: Vec<SpaceCurve>) -> Result<Self> {
        Self::from_segments(segments)
    }
}

impl From<CurvePath> for Vec<SpaceCurve> {
    fn from(path: CurvePath) -> Self {
        path.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use railcurve_math::{dvec3, DVec3};

    fn first_segment() -> SpaceCurve {
        SpaceCurve::new([
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(2.0, 0.0, 0.0),
            dvec3(3.0, 0.0, 0.0),
        ])
    }

    fn two_segment_path() -> CurvePath {
        CurvePath::new(first_segment()).add_segment(dvec3(5.0, 2.0, 0.0), dvec3(0.0, 1.0, 0.0))
    }

    #[test]
    fn test_add_segment_is_c1() {
        let path = two_segment_path();
        assert_eq!(path.segment_count(), 2);
        let [a, b] = [&path.segments()[0], &path.segments()[1]];
        assert_eq!(a.end(), b.start());
        assert!((a.velocity(1.0) - b.velocity(0.0)).length() < 1e-12);
        let cp = b.control_points();
        assert_eq!(cp.p1(), dvec3(4.0, 0.0, 0.0));
        assert_eq!(cp.p2(), dvec3(5.0, 1.0, 0.0));
    }

    #[test]
    fn test_seam_parameter() {
        let path = two_segment_path();
        assert_eq!(path.locate(1.0), (1, 0.0));
        assert_eq!(path.locate(2.0), (1, 1.0));
        assert_eq!(path.locate(-4.0), (0, 0.0));
        assert_eq!(path.locate(9.0), (1, 1.0));

        let before = path.position(1.0 - 1e-9);
        let at = path.position(1.0);
        assert!((before - at).length() < 1e-6);
        assert!((at - dvec3(3.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_length_and_distance() {
        let path = two_segment_path();
        let total = path.segments()[0].length() + path.segments()[1].length();
        assert_abs_diff_eq!(path.length(), total, epsilon = 1e-12);
        assert_abs_diff_eq!(path.distance_at_parameter(1.0), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(path.distance_at_parameter(0.5), 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(path.distance_at_parameter(2.0), total, epsilon = 1e-12);
        assert_eq!(path.segment_offsets().len(), 3);
    }

    #[test]
    fn test_parameter_at_distance_spans_segments() {
        let path = two_segment_path();
        assert_eq!(path.parameter_at_distance(0.0), 0.0);
        assert_abs_diff_eq!(path.parameter_at_distance(1.5), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(path.parameter_at_distance(3.0), 1.0, epsilon = 1e-9);
        assert_eq!(path.parameter_at_distance(path.length() + 1.0), 2.0);

        let d = path.distance_at_parameter(1.6);
        assert_abs_diff_eq!(path.parameter_at_distance(d), 1.6, epsilon = 1e-9);
    }

    #[test]
    fn test_frames_continuous_across_seam() {
        let path = two_segment_path();
        let before = path.frame_at(1.0 - 1e-9);
        let after = path.frame_at(1.0);
        assert!((before.right - after.right).length() < 1e-6);
        assert!((before.up - after.up).length() < 1e-6);
    }

    #[test]
    fn test_mixed_settings_follow_each_segment() {
        let loose = CurveSettings {
            epsilon: 1e-3,
            ..CurveSettings::default()
        };
        let a = SpaceCurve::with_settings(first_segment().control_points().to_array(), loose).unwrap();
        let b = SpaceCurve::continuation(&first_segment(), dvec3(5.0, 0.0, 0.0), dvec3(6.0, 0.0, 0.0));
        let path = CurvePath::from_segments(vec![a.clone(), b]).unwrap();
        assert_eq!(path.epsilon(), CurveSettings::DEFAULT_EPSILON);

        for d in [5e-4, 1e-2, 1.0] {
            assert_eq!(path.parameter_at_distance(d), a.parameter_at_distance(d));
        }
        let just_past_seam = path.parameter_at_distance(3.0 + 5e-4);
        assert!(just_past_seam > 1.0 && just_past_seam < 1.001);
    }

    #[test]
    fn test_empty_and_out_of_range() {
        assert!(matches!(
            CurvePath::from_segments(Vec::new()),
            Err(CurveError::EmptyPath)
        ));
        let path = two_segment_path();
        assert!(path.try_segment(1).is_ok());
        assert!(matches!(
            path.try_segment(2),
            Err(CurveError::SegmentOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_from_control_points_transports_frames() {
        let k = 0.5519150244935;
        let path = CurvePath::from_control_points(
            [
                [DVec3::ZERO, dvec3(1.0, 0.0, 0.0), dvec3(2.0, 0.0, 0.0), dvec3(3.0, 0.0, 0.0)],
                [
                    dvec3(3.0, 0.0, 0.0),
                    dvec3(3.0 + k, 0.0, 0.0),
                    dvec3(4.0, 1.0 - k, 0.5),
                    dvec3(4.0, 1.0, 0.5),
                ],
            ],
            CurveSettings::default(),
        )
        .unwrap();
        let a = path.frame_at(1.0 - 1e-9);
        let b = path.frame_at(1.0);
        assert!(a.right.dot(b.right) > 0.999999);
    }

    #[test]
    fn test_bounding_box_merges_segments() {
        let (min, max) = two_segment_path().bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, dvec3(5.0, 2.0, 0.0));
    }

    #[test]
    fn test_serde_round_trip() {
        let path = two_segment_path();
        let json = serde_json::to_string(&path).unwrap();
        let back: CurvePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back.segment_count(), 2);
        assert_abs_diff_eq!(back.length(), path.length(), epsilon = 1e-12);
        assert!((back.frame_at(1.5).right - path.frame_at(1.5).right).length() < 1e-12);

        assert!(serde_json::from_str::<CurvePath>("[]").is_err());
    }
}
