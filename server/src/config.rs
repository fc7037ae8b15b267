use std::net::{IpAddr, Ipv4Addr};

use anyhow::{bail, Context};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    /// Progress at which lifting the pointer completes a dalgona attempt.
    pub success_threshold: f32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            success_threshold: games::session::DEFAULT_SUCCESS_THRESHOLD,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<ServerConfig> {
        let json = std::fs::read_to_string(path).with_context(|| format!("could not read {path}"))?;
        Self::parse(&json)
    }

    pub fn parse(json: &str) -> anyhow::Result<ServerConfig> {
        let config = serde_json::from_str::<ServerConfig>(json)?;
        if !(config.success_threshold > 0.0 && config.success_threshold <= 100.0) {
            bail!("success_threshold must be in (0, 100], got {}", config.success_threshold);
        }
        Ok(config)
    }
}
