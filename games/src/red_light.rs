use thiserror::Error;

const CATCH_CHANCE_ON_MOVE: f64 = 0.3;
const CATCH_CHANCE_ON_STOP: f64 = 0.1;
const FINISH_POSITION: u32 = 10;
const TIME_LIMIT_SECONDS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedLightStatus {
    Running,
    Stopped,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedLightAction {
    Move,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedLightError {
    #[error("Game is not running")]
    NotRunning,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedLightGame {
    pub player_position: u32,
    pub game_status: RedLightStatus,
    pub time_left: u32,
}

impl RedLightGame {
    pub fn new() -> RedLightGame {
        RedLightGame {
            player_position: 0,
            game_status: RedLightStatus::Running,
            time_left: TIME_LIMIT_SECONDS,
        }
    }

    /// Plays one action. Returns the message to show, if any.
    pub fn apply(&mut self, action: RedLightAction, rng: &mut fastrand::Rng) -> Result<Option<&'static str>, RedLightError> {
        if self.game_status != RedLightStatus::Running {
            return Err(RedLightError::NotRunning);
        }

        match action {
            RedLightAction::Move => {
                self.player_position += 1;
                if rng.f64() < CATCH_CHANCE_ON_MOVE {
                    self.game_status = RedLightStatus::Stopped;
                    return Ok(Some("Caught!"));
                }
            }
            RedLightAction::Stop => {
                if rng.f64() < CATCH_CHANCE_ON_STOP {
                    self.game_status = RedLightStatus::Stopped;
                    return Ok(Some("Failed to stop in time!"));
                }
            }
        }

        if self.player_position >= FINISH_POSITION {
            self.game_status = RedLightStatus::Finished;
            return Ok(Some("You won!"));
        }
        Ok(None)
    }
}

impl Default for RedLightGame {
    fn default() -> Self {
        RedLightGame::new()
    }
}
