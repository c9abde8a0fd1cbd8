//! Client configuration
//!
//! Loaded from TOML; every field has a default matching the stock agent
//! deployment, so an empty file is a valid configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pool::CHANNEL_COUNT;

pub const DEFAULT_HEARTBEAT_PATH: &str = "/tmp/hb_map.bin";
pub const DEFAULT_BASE_PORT: u16 = 8888;
pub const DEFAULT_HEARTBEAT_THRESHOLD_SECS: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Shared file the agent writes its heartbeat timestamp into
    pub heartbeat_path: PathBuf,

    /// Address the agent listens on
    pub agent_host: IpAddr,

    /// Channel `i` talks to `agent_host:(base_port + i)`
    pub base_port: u16,

    /// Heartbeats older than this many seconds mark the agent as dead
    pub heartbeat_threshold_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            heartbeat_path: PathBuf::from(DEFAULT_HEARTBEAT_PATH),
            agent_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            base_port: DEFAULT_BASE_PORT,
            heartbeat_threshold_secs: DEFAULT_HEARTBEAT_THRESHOLD_SECS,
        }
    }
}

impl ClientConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading client configuration from {}", path.display());

        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self
            .base_port
            .checked_add(CHANNEL_COUNT as u16 - 1)
            .is_none()
        {
            return Err(Error::Config(format!(
                "base_port {} leaves no room for {} channels",
                self.base_port, CHANNEL_COUNT
            )));
        }
        if self.heartbeat_threshold_secs == 0 {
            return Err(Error::Config(
                "heartbeat_threshold_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Remote address paired with channel `index`
    pub fn channel_addr(&self, index: usize) -> SocketAddr {
        SocketAddr::new(self.agent_host, self.base_port + index as u16)
    }
}
