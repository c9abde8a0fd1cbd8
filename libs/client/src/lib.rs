//! ELB Client - Host lookup and result reporting against the local agent
//!
//! The agent listens on three UDP ports on the local host and publishes a
//! heartbeat timestamp in a shared file. [`ElbClient`] checks the heartbeat,
//! picks the channel for a `(modid, cmdid)` key and correlates the agent's
//! answer with the request by sequence number.
//!
//! # Example
//!
//! ```no_run
//! use elb_client::{ClientConfig, ElbClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = ElbClient::connect(&ClientConfig::default()).await?;
//!
//! match client.get_host(10001, 1001, 50).await {
//!     Ok(host) => {
//!         // ... call the upstream ...
//!         client.report_result(10001, 1001, *host.ip(), host.port(), 0).await?;
//!     }
//!     Err(e) => eprintln!("lookup failed ({}): {}", e.code(), e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod correlator;
pub mod error;
pub mod liveness;
pub mod pool;
pub mod report;

pub use client::ElbClient;
pub use config::ClientConfig;
pub use error::{Error, LookupError, Result};
