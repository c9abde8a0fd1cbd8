//! ELB Core - Message schema shared with the load-balancing agent
//!
//! Every datagram exchanged with the agent carries one of these messages
//! as its body. The numeric [`MessageId`] tags must match the agent build.

pub mod error;
pub mod message;

pub use error::Error;
pub use message::{
    CacheBatchRptReq, GetHostReq, GetHostRsp, HostAddr, HostBatchCallRes, MessageId, ReportReq,
};
