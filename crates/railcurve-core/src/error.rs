use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Path has no segments")]
    EmptyPath,

    #[error("Segment {index} out of range for path with {count} segments")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("Geometry error: {0}")]
    Geometry(String),
}

pub type Result<T> = std::result::Result<T, CurveError>;
