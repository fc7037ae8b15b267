use chrono::{DateTime, Utc};
use games::{Point, ShapeId, Status, Step, TracingSession};
use tracing::debug;

use crate::api_error::ApiError;

#[derive(Debug, Clone)]
pub struct DalgonaGame {
    pub session: TracingSession,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DalgonaState {
    pub shape: ShapeId,
    pub progress: f32,
    pub game_status: Status,
    pub total_outline_pixels: usize,
    pub last_pointer_position: Option<Point>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DalgonaStart {
    pub shape: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DalgonaAction {
    Reset,
    SelectShape(String),
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DalgonaUpdate {
    pub game_id: crate::session_store::GameId,
    #[serde(default)]
    pub user_path: Vec<Point>,
    #[serde(default)]
    pub action: Option<DalgonaAction>,
}

impl DalgonaGame {
    pub fn new(shape_id: ShapeId, success_threshold: f32) -> DalgonaGame {
        DalgonaGame {
            session: TracingSession::with_success_threshold(shape_id, success_threshold),
            started_at: Utc::now(),
        }
    }

    pub fn state(&self) -> DalgonaState {
        DalgonaState {
            shape: self.session.shape_id(),
            progress: self.session.progress(),
            game_status: self.session.status(),
            total_outline_pixels: self.session.outline().total_outline_pixels(),
            last_pointer_position: self.session.last_pointer_position(),
            started_at: self.started_at,
        }
    }

    /// Applies the action, then the traced path. Returns a message for the player, if any.
    pub fn update(&mut self, action: Option<&DalgonaAction>, user_path: &[Point]) -> Result<Option<String>, ApiError> {
        let mut message = None;
        match action {
            Some(DalgonaAction::Reset) => {
                self.session.reset();
                message = Some("Game reset".to_string());
            }
            Some(DalgonaAction::SelectShape(name)) => {
                let shape_id = name.parse::<ShapeId>()?;
                self.session.change_shape(shape_id)?;
                message = Some(format!("Shape changed to {shape_id}"));
            }
            None => {}
        }

        if user_path.is_empty() {
            return Ok(message);
        }
        if self.session.status().is_over() {
            return Err(ApiError::NotRunning);
        }

        let outcome = self.session.trace_stroke(user_path);
        debug!(?outcome, progress = self.session.progress(), "stroke replayed");
        Ok(match outcome {
            Ok(Step::Succeeded { .. }) => Some("Shape completed!".to_string()),
            Ok(_) => message,
            Err(error) if error.is_terminal() => Some(format!("Candy broke! You {error}")),
            Err(error) => return Err(error.into()),
        })
    }
}
