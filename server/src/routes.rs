use std::convert::Infallible;

use bytes::Bytes;
use warp::{reject::Rejection, Filter, Reply};

use crate::{context::GameContextRef, handler, session_store::GameId};

const MAX_BODY_BYTES: u64 = 256 * 1024;

pub fn routes(context_ref: GameContextRef) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let root = warp::path::end().and(warp::get()).and_then(handler::root_handler);
    let health = warp::path!("api" / "health").and(warp::get()).and_then(handler::health_handler);

    let dalgona_start = warp::path!("api" / "dalgona" / "start")
        .and(warp::post())
        .and(limited_body())
        .and(with_context(context_ref.clone()))
        .and_then(handler::dalgona_start_handler);
    let dalgona_update = warp::path!("api" / "dalgona" / "update")
        .and(warp::post())
        .and(limited_body())
        .and(with_context(context_ref.clone()))
        .and_then(handler::dalgona_update_handler);
    let dalgona_show = warp::path!("api" / "dalgona" / GameId)
        .and(warp::get())
        .and(with_context(context_ref.clone()))
        .and_then(handler::dalgona_show_handler);

    let red_light_start = warp::path!("api" / "red-light-green-light" / "start")
        .and(warp::post())
        .and(with_context(context_ref.clone()))
        .and_then(handler::red_light_start_handler);
    let red_light_update = warp::path!("api" / "red-light-green-light" / "update")
        .and(warp::post())
        .and(limited_body())
        .and(with_context(context_ref))
        .and_then(handler::red_light_update_handler);

    root.or(health)
        .or(dalgona_start)
        .or(dalgona_update)
        .or(dalgona_show)
        .or(red_light_start)
        .or(red_light_update)
        .with(warp::cors().allow_any_origin().allow_methods(vec!["GET", "POST"]).allow_header("content-type"))
        .with(warp::trace::request())
}

fn limited_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes())
}

fn with_context(context_ref: GameContextRef) -> impl Filter<Extract = (GameContextRef,), Error = Infallible> + Clone {
    warp::any().map(move || context_ref.clone())
}
