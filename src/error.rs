use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {shape}: {reason}")]
    InvalidConstruction { shape: &'static str, reason: String },

    #[error("ray direction has zero length")]
    DegenerateRay,

    #[error("scene has no camera")]
    NoCamera,

    #[error("camera index {index} out of range, scene has {len} cameras")]
    CameraIndex { index: usize, len: usize },

    #[error("io error -> {0}")]
    Io(#[from] io::Error),

    #[error("malformed config -> {0}")]
    Json(#[from] serde_json::Error),

    #[error("thread pool -> {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn invalid(shape: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConstruction {
            shape,
            reason: reason.into(),
        }
    }
}
