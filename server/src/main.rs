use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use config::ServerConfig;
use console_input::console_input_thread;
use context::GameContext;
use tokio::sync::RwLock;
use tracing::{info, warn};
use warp::reject::Rejection;

mod api_error;
mod config;
mod console_input;
mod context;
mod dalgona;
mod handler;
mod routes;
mod session_store;

type Result<T> = std::result::Result<T, Rejection>;

const CONFIG_PATH: &str = "server_config.json";

fn configure_tracing() -> anyhow::Result<()> {
    let max_level = if cfg!(debug_assertions) {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(max_level)
            .finish(),
    )?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = configure_tracing() {
        // We can continue without logging.
        eprintln!("{error}");
    }

    let config = match ServerConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("using default config: {e:#}");
            ServerConfig::default()
        }
    };

    let context_ref = Arc::new(RwLock::new(GameContext::new(&config)));

    console_input_thread(context_ref.clone());

    let routes = routes::routes(context_ref);

    let addr = SocketAddr::new(config.bind_address, config.port);
    let (addr, server) = warp::serve(routes)
        .try_bind_ephemeral(addr)
        .with_context(|| format!("failed to bind to {addr}, is another server using port {}?", config.port))?;

    info!("Starting game backend");
    info!("   Local:   http://127.0.0.1:{}", addr.port());
    if let Ok(local_ip) = local_ip_address::local_ip() {
        info!("   Network: http://{}:{}", local_ip, addr.port());
    }
    info!("   success threshold: {}", config.success_threshold);

    server.await;
    Ok(())
}
