use thiserror::Error;

use crate::session::Status;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TracingError {
    #[error("started outside outline")]
    StartedOutside,
    #[error("went out of bounds")]
    OutOfBounds { progress: f32 },
    #[error("unknown shape: {0}")]
    UnknownShape(String),
    #[error("cannot change shape while the attempt is {0}")]
    ShapeChangeWhileActive(Status),
    #[error("attempt is already over ({0})")]
    AttemptOver(Status),
    #[error("outline has no pixels")]
    EmptyOutline,
}

impl TracingError {
    /// Failures that end the attempt, as opposed to rejected requests.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TracingError::StartedOutside | TracingError::OutOfBounds { .. })
    }
}
