use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("all lane assignments are empty")]
    EmptyInput,

    // Only ever logged
    #[error("unknown vehicle class '{0}', treating it as an ordinary vehicle")]
    UnknownClass(String),

    #[error("expected {expected} lanes, got {found}")]
    LaneCount { expected: usize, found: usize },

    #[error("could not load class counts from {path}: {reason}")]
    CountFile { path: PathBuf, reason: String },
}
