use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Legacy numeric codes shared with the other language bindings of the agent API
pub mod codes {
    pub const AGENT_UNREACHABLE: i32 = -11111;
    pub const BAD_RESPONSE: i32 = -10001;
    pub const TIMED_OUT: i32 = -10002;
    pub const SOCKET_ERROR: i32 = -10003;
}

/// Failures while constructing a client
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to map heartbeat file {path}: {source}")]
    Heartbeat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Heartbeat file {path} holds {len} bytes, at least 8 are required")]
    HeartbeatTooShort { path: PathBuf, len: u64 },

    #[error("Failed to open channel {index} to {remote}: {source}")]
    Channel {
        index: usize,
        remote: SocketAddr,
        #[source]
        source: elb_fabric::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a host lookup produced no host
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("agent heartbeat is {gap_secs}s old")]
    AgentUnreachable { gap_secs: i64 },

    #[error("failed to send request: {0}")]
    SendFailed(#[source] elb_fabric::Error),

    #[error("malformed response: {0}")]
    Framing(#[source] elb_fabric::Error),

    #[error("request seq is {expected}, response seq is {actual}")]
    SequenceMismatch { expected: u32, actual: u32 },

    #[error("agent returned error code {code}")]
    AgentError { code: i32 },

    #[error("no response within {after:?}")]
    TimedOut { after: Duration },

    #[error("failed to receive response: {0}")]
    ReceiveFailed(#[source] elb_fabric::Error),
}

impl LookupError {
    /// Numeric code compatible with the legacy client API
    pub fn code(&self) -> i32 {
        match self {
            Self::AgentUnreachable { .. } => codes::AGENT_UNREACHABLE,
            Self::Framing(_) | Self::SequenceMismatch { .. } => codes::BAD_RESPONSE,
            Self::TimedOut { .. } => codes::TIMED_OUT,
            Self::SendFailed(_) | Self::ReceiveFailed(_) => codes::SOCKET_ERROR,
            Self::AgentError { code } => *code,
        }
    }
}
