//! ELB Fabric - Datagram transport and framing layer
//!
//! Provides the UDP transport, the frame header shared with the agent and
//! bincode body encoding, combined into a [`Channel`].
//!
//! # Example
//!
//! ```no_run
//! use elb_core::{GetHostReq, GetHostRsp, MessageId};
//! use elb_fabric::{Channel, codec::BincodeCodec};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut channel = Channel::udp("127.0.0.1:8888".parse()?, BincodeCodec).await?;
//! let req = GetHostReq { seq: 0, modid: 10001, cmdid: 1001 };
//! channel.send(MessageId::GetHostReq, &req).await?;
//! let rsp: GetHostRsp = channel.receive(MessageId::GetHostRsp).await?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod codec;
pub mod error;
pub mod frame;
pub mod transport;

// Re-exports for convenience
pub use channel::Channel;
pub use error::{Error, FrameError, Result};
