use bytes::Bytes;
use games::{red_light::{RedLightAction, RedLightGame}, ShapeId};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use warp::{http::StatusCode, reply::{Json, WithStatus}, Reply};

use crate::{api_error::ApiError, context::{GameContext, GameContextRef}, dalgona::{DalgonaStart, DalgonaState, DalgonaUpdate}, session_store::GameId, Result};

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse<T> {
    pub message: &'static str,
    pub game_id: GameId,
    pub game_state: T,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse<T> {
    pub game: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedLightUpdate {
    pub game_id: GameId,
    pub action: RedLightAction,
}

pub async fn root_handler() -> Result<impl Reply> {
    Ok(warp::reply::json(&serde_json::json!({ "message": "Game API is running!" })))
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}

pub async fn dalgona_start_handler(body: Bytes, context_ref: GameContextRef) -> Result<WithStatus<Json>> {
    let mut context = context_ref.write().await;
    Ok(respond(start_dalgona(&body, &mut context)))
}

pub async fn dalgona_update_handler(body: Bytes, context_ref: GameContextRef) -> Result<WithStatus<Json>> {
    let mut context = context_ref.write().await;
    Ok(respond(update_dalgona(&body, &mut context)))
}

pub async fn dalgona_show_handler(game_id: GameId, context_ref: GameContextRef) -> Result<WithStatus<Json>> {
    let context = context_ref.read().await;
    Ok(respond(context.get_dalgona(game_id).map(|game| game.state())))
}

pub async fn red_light_start_handler(context_ref: GameContextRef) -> Result<WithStatus<Json>> {
    let mut context = context_ref.write().await;
    let (game_id, game) = context.start_red_light();
    Ok(respond(Ok(StartResponse { message: "Game started", game_id, game_state: game.clone() })))
}

pub async fn red_light_update_handler(body: Bytes, context_ref: GameContextRef) -> Result<WithStatus<Json>> {
    let mut context = context_ref.write().await;
    Ok(respond(update_red_light(&body, &mut context)))
}

fn start_dalgona(body: &Bytes, context: &mut GameContext) -> ApiResult<StartResponse<DalgonaState>> {
    let start = if body.iter().all(u8::is_ascii_whitespace) {
        DalgonaStart::default()
    } else {
        parse_json::<DalgonaStart>(body)?
    };
    let shape = start.shape.map(|name| name.parse::<ShapeId>()).transpose()?;
    let (game_id, game) = context.start_dalgona(shape);
    Ok(StartResponse { message: "Game started", game_id, game_state: game.state() })
}

fn update_dalgona(body: &Bytes, context: &mut GameContext) -> ApiResult<UpdateResponse<DalgonaState>> {
    let update = parse_json::<DalgonaUpdate>(body)?;
    let (game, message) = context.update_dalgona(update.game_id, update.action.as_ref(), &update.user_path)?;
    Ok(UpdateResponse { game: game.state(), message })
}

fn update_red_light(body: &Bytes, context: &mut GameContext) -> ApiResult<UpdateResponse<RedLightGame>> {
    let update = parse_json::<RedLightUpdate>(body)?;
    let (game, message) = context.update_red_light(update.game_id, update.action)?;
    Ok(UpdateResponse { game: game.clone(), message: message.map(String::from) })
}

fn parse_json<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    Ok(serde_json::from_slice(body)?)
}

fn respond<T: Serialize>(result: ApiResult<T>) -> WithStatus<Json> {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), StatusCode::OK),
        Err(error) => {
            debug!(%error, "request rejected");
            error.into_reply()
        }
    }
}
