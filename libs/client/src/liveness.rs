//! Agent liveness precheck
//!
//! The agent rewrites an 8-byte native-endian timestamp (seconds since the
//! epoch) at the start of a shared file once a second. A lookup is only
//! attempted while that timestamp is fresh.

use std::fs::File;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use memmap2::{Mmap, MmapOptions};

use crate::error::{Error, LookupError, Result};

pub const HEARTBEAT_LEN: usize = 8;

/// Anything that can report the agent's latest heartbeat
pub trait HeartbeatSource: Send + Sync {
    /// Seconds since the epoch of the most recent heartbeat
    fn last_beat(&self) -> i64;
}

/// Read-only shared mapping of the agent's heartbeat file
pub struct MappedHeartbeat {
    map: Mmap,
}

impl MappedHeartbeat {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let heartbeat_err = |source| Error::Heartbeat {
            path: path.clone(),
            source,
        };

        let file = File::open(&path).map_err(heartbeat_err)?;
        let len = file.metadata().map_err(heartbeat_err)?.len();
        if len < HEARTBEAT_LEN as u64 {
            return Err(Error::HeartbeatTooShort {
                path: path.clone(),
                len,
            });
        }

        // SAFETY: the mapping is read-only and shared with the agent, which
        // only ever overwrites the 8-byte timestamp in place.
        let map = unsafe { MmapOptions::new().len(HEARTBEAT_LEN).map(&file) }
            .map_err(heartbeat_err)?;

        Ok(Self { map })
    }
}

impl HeartbeatSource for MappedHeartbeat {
    fn last_beat(&self) -> i64 {
        let mut bytes = [0u8; HEARTBEAT_LEN];
        bytes.copy_from_slice(&self.map[..HEARTBEAT_LEN]);
        i64::from_ne_bytes(bytes)
    }
}

/// Decides whether the agent is alive from its heartbeat age
pub struct LivenessGate {
    source: Box<dyn HeartbeatSource>,
    threshold_secs: i64,
}

impl LivenessGate {
    pub fn new(source: impl HeartbeatSource + 'static, threshold_secs: u64) -> Self {
        Self {
            source: Box::new(source),
            threshold_secs: i64::try_from(threshold_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn is_agent_alive(&self) -> bool {
        self.check().is_ok()
    }

    /// Fail with [`LookupError::AgentUnreachable`] when the heartbeat is stale
    pub fn check(&self) -> std::result::Result<(), LookupError> {
        self.check_at(unix_now())
    }

    pub fn check_at(&self, now_secs: i64) -> std::result::Result<(), LookupError> {
        let gap_secs = now_secs.saturating_sub(self.source.last_beat());
        if gap_secs > self.threshold_secs {
            return Err(LookupError::AgentUnreachable { gap_secs });
        }
        Ok(())
    }
}

pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
