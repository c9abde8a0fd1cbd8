use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Frame tags understood by the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MessageId {
    GetHostReq = 1,
    GetHostRsp = 2,
    ReportReq = 3,
    CacheBatchRptReq = 4,
}

impl MessageId {
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for MessageId {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::GetHostReq),
            2 => Ok(Self::GetHostRsp),
            3 => Ok(Self::ReportReq),
            4 => Ok(Self::CacheBatchRptReq),
            other => Err(Error::UnknownMessageId(other)),
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GetHostReq => "GetHostReq",
            Self::GetHostRsp => "GetHostRsp",
            Self::ReportReq => "ReportReq",
            Self::CacheBatchRptReq => "CacheBatchRptReq",
        };
        write!(f, "{}({})", name, self.as_i32())
    }
}

/// Upstream host as the agent stores it
///
/// `ip` is the numeric IPv4 address (`a.b.c.d` is `a << 24 | b << 16 | ...`),
/// so converting to dotted-quad is a network-order interpretation of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostAddr {
    pub ip: u32,
    pub port: u16,
}

impl HostAddr {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self {
            ip: u32::from(ip),
            port,
        }
    }

    pub fn ipv4(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.ip)
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.ipv4(), self.port)
    }
}

impl From<SocketAddrV4> for HostAddr {
    fn from(addr: SocketAddrV4) -> Self {
        Self::new(*addr.ip(), addr.port())
    }
}

impl fmt::Display for HostAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

/// Ask the agent for one host serving `(modid, cmdid)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHostReq {
    pub seq: u32,
    pub modid: i32,
    pub cmdid: i32,
}

/// Agent answer to a [`GetHostReq`], correlated by `seq`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHostRsp {
    pub seq: u32,
    pub retcode: i32,
    pub host: HostAddr,
}

/// Outcome of one call made against a host returned by the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportReq {
    pub modid: i32,
    pub cmdid: i32,
    pub retcode: i32,
    pub host: HostAddr,
    /// Milliseconds spent on a failed call
    pub tcost: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostBatchCallRes {
    pub host: HostAddr,
    pub succ_cnt: u32,
}

/// Aggregated success counts for several hosts of one `(modid, cmdid)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheBatchRptReq {
    pub modid: i32,
    pub cmdid: i32,
    pub results: Vec<HostBatchCallRes>,
}
