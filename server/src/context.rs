use std::sync::Arc;

use games::{red_light::{RedLightAction, RedLightGame}, Point, ShapeId};
use tokio::sync::RwLock;
use tracing::info;

use crate::{api_error::ApiError, config::ServerConfig, dalgona::{DalgonaAction, DalgonaGame}, session_store::{GameId, SessionStore}};

pub struct GameContext {
    pub dalgona: SessionStore<DalgonaGame>,
    pub red_light: SessionStore<RedLightGame>,
    pub rng: fastrand::Rng,
    pub success_threshold: f32,
}

pub type GameContextRef = Arc<RwLock<GameContext>>;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub dalgona_games: usize,
    pub red_light_games: usize,
}

impl GameContext {
    pub fn new(config: &ServerConfig) -> GameContext {
        GameContext::with_rng(config, fastrand::Rng::new())
    }

    pub fn with_rng(config: &ServerConfig, rng: fastrand::Rng) -> GameContext {
        GameContext {
            dalgona: SessionStore::new(),
            red_light: SessionStore::new(),
            rng,
            success_threshold: config.success_threshold,
        }
    }

    pub fn start_dalgona(&mut self, shape: Option<ShapeId>) -> (GameId, &DalgonaGame) {
        let shape = shape.unwrap_or_else(|| ShapeId::random(&mut self.rng));
        let (game_id, game) = self.dalgona.insert(DalgonaGame::new(shape, self.success_threshold));
        info!(game_id, %shape, "dalgona game started");
        (game_id, &*game)
    }

    pub fn get_dalgona(&self, game_id: GameId) -> Result<&DalgonaGame, ApiError> {
        self.dalgona.get(game_id).ok_or(ApiError::UnknownGameId(game_id))
    }

    pub fn get_dalgona_mut(&mut self, game_id: GameId) -> Result<&mut DalgonaGame, ApiError> {
        self.dalgona.get_mut(game_id).ok_or(ApiError::UnknownGameId(game_id))
    }

    pub fn update_dalgona(&mut self, game_id: GameId, action: Option<&DalgonaAction>, user_path: &[Point]) -> Result<(&DalgonaGame, Option<String>), ApiError> {
        let game = self.get_dalgona_mut(game_id)?;
        let message = game.update(action, user_path)?;
        Ok((&*game, message))
    }

    pub fn start_red_light(&mut self) -> (GameId, &RedLightGame) {
        let (game_id, game) = self.red_light.insert(RedLightGame::new());
        info!(game_id, "red light green light game started");
        (game_id, &*game)
    }

    pub fn update_red_light(&mut self, game_id: GameId, action: RedLightAction) -> Result<(&RedLightGame, Option<&'static str>), ApiError> {
        let game = self.red_light.get_mut(game_id).ok_or(ApiError::UnknownGameId(game_id))?;
        let message = game.apply(action, &mut self.rng)?;
        Ok((&*game, message))
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            dalgona_games: self.dalgona.len(),
            red_light_games: self.red_light.len(),
        }
    }
}
