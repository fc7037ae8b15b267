use games::{red_light::RedLightError, TracingError};
use thiserror::Error;
use warp::{http::StatusCode, reply::{Json, WithStatus}};

use crate::session_store::GameId;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Game not found")]
    UnknownGameId(GameId),
    #[error("Game is not running")]
    NotRunning,
    #[error("{0}")]
    Tracing(#[from] TracingError),
    #[error("{0}")]
    RedLight(#[from] RedLightError),
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownGameId(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn into_reply(self) -> WithStatus<Json> {
        let body = serde_json::json!({ "message": self.to_string() });
        warp::reply::with_status(warp::reply::json(&body), self.status())
    }
}

#[cfg(test)]
mod tests {
    use games::session::Status;

    use super::*;

    #[test]
    fn unknown_game_is_not_found() {
        assert_eq!(ApiError::UnknownGameId(4).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::UnknownGameId(4).to_string(), "Game not found");
    }

    #[test]
    fn state_errors_are_bad_requests() {
        assert_eq!(ApiError::NotRunning.status(), StatusCode::BAD_REQUEST);
        let err = ApiError::from(TracingError::ShapeChangeWhileActive(Status::Tracing));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "cannot change shape while the attempt is tracing");
    }
}
