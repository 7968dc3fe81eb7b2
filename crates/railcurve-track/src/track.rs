//! Track layouts assembled from sections into a single curve path.

use log::debug;
use railcurve_bezier::sampling::{sample_frames_by_distance, MAX_STEPS};
use railcurve_bezier::{Curve, CurvePath, CurveSettings};
use railcurve_core::{BoundingBox, CurveError, Result, Validate};
use railcurve_math::vector::normalize_or;
use railcurve_math::{Aabb3, DVec3, Frame, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::section::{Cursor, Section, Turn};

/// A serializable description of a track: a start pose and its sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackLayout {
    pub start: Point3,
    pub heading: Vector3,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub settings: CurveSettings,
}

impl TrackLayout {
    /// Unit heading projected onto the plane perpendicular to `world_up`.
    fn horizontal_heading(&self) -> Result<Vector3> {
        let up = self.settings.world_up.normalize();
        let flat = self.heading - up * self.heading.dot(up);
        let heading = normalize_or(flat, DVec3::ZERO, self.settings.epsilon);
        if heading == DVec3::ZERO {
            return Err(CurveError::Geometry(format!(
                "track heading {} has no horizontal component",
                self.heading
            )));
        }
        Ok(heading)
    }

    /// Control points for every section, in order.
    pub fn control_points(&self) -> Result<Vec<[Point3; 4]>> {
        self.validate()?;
        let up = self.settings.world_up.normalize();
        let mut cursor = Cursor {
            position: self.start,
            heading: self.horizontal_heading()?,
        };
        let mut points = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            let (cp, next) = section.control_points(cursor, up);
            points.push(cp);
            cursor = next;
        }
        Ok(points)
    }
}

impl Validate for TrackLayout {
    fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        if self.sections.is_empty() {
            return Err(CurveError::EmptyPath);
        }
        for section in &self.sections {
            section.validate()?;
        }
        self.horizontal_heading().map(|_| ())
    }
}

/// Accumulates sections starting from a pose.
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    layout: TrackLayout,
}

impl TrackBuilder {
    pub fn new(start: Point3, heading: Vector3) -> Self {
        Self {
            layout: TrackLayout {
                start,
                heading,
                sections: Vec::new(),
                settings: CurveSettings::default(),
            },
        }
    }

    pub fn settings(mut self, settings: CurveSettings) -> Self {
        self.layout.settings = settings;
        self
    }

    pub fn straight(mut self, length: f64) -> Self {
        self.layout.sections.push(Section::Straight { length });
        self
    }

    pub fn turn(mut self, radius: f64, turn: Turn, rise: f64) -> Self {
        self.layout.sections.push(Section::Turn { radius, turn, rise });
        self
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    pub fn build(self) -> Result<Track> {
        Track::from_layout(self.layout)
    }
}

/// A built track: its layout plus the curve path riders follow.
#[derive(Debug, Clone)]
pub struct Track {
    layout: TrackLayout,
    path: CurvePath,
}

impl Track {
    pub fn from_layout(layout: TrackLayout) -> Result<Self> {
        let points = layout.control_points()?;
        let path = CurvePath::from_control_points(points, layout.settings)?;
        debug!(
            "built track: {} sections, length {:.3}",
            layout.sections.len(),
            path.length()
        );
        Ok(Self { layout, path })
    }

    /// Closed loop: a straight, two left turns dropping by `drop`, the return
    /// straight, and two left turns climbing back to the start.
    pub fn oval(length: f64, radius: f64, drop: f64) -> Result<Self> {
        TrackBuilder::new(Point3::ZERO, DVec3::X)
            .straight(length)
            .turn(radius, Turn::Left, -drop)
            .turn(radius, Turn::Left, 0.0)
            .straight(length)
            .turn(radius, Turn::Left, drop)
            .turn(radius, Turn::Left, 0.0)
            .build()
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    pub fn path(&self) -> &CurvePath {
        &self.path
    }

    pub fn length(&self) -> f64 {
        self.path.length()
    }

    /// Points every `spacing` units of arc length within each section,
    /// starting at each section's start. Sections are sampled independently,
    /// so spacing restarts at every join. A non-positive spacing yields the
    /// section starts only; a section never yields more than
    /// [`MAX_STEPS`] points.
    pub fn points(&self, spacing: f64) -> Vec<Point3> {
        self.path
            .segments()
            .iter()
            .flat_map(|segment| {
                let length = segment.length();
                let count = if spacing > 0.0 {
                    (length / spacing).min(MAX_STEPS as f64)
                } else {
                    1.0
                };
                (0usize..)
                    .take_while(move |&i| (i as f64) < count)
                    .map(move |i| {
                        let d = length * (i as f64 / count);
                        segment.position(segment.parameter_at_distance(d))
                    })
            })
            .collect()
    }

    /// `count + 1` evenly spaced orientation markers along the whole track.
    pub fn markers(&self, count: usize) -> Vec<Frame> {
        sample_frames_by_distance(&self.path, count)
    }

    pub fn bounds(&self) -> Aabb3 {
        let (min, max) = self.path.bounding_box();
        Aabb3::new(min, max)
    }
}
