use crate::error::Result;

pub mod udp;

pub use self::udp::{UdpTransport, UdpTransportBuilder};

/// Transport trait for sending and receiving raw datagrams
///
/// Each transport instance is paired with a single remote address. Delivery
/// is unreliable: datagrams may be lost, duplicated or reordered.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one datagram to the paired remote address
    async fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Wait for the next datagram
    async fn receive(&mut self) -> Result<Vec<u8>>;

    /// Close the transport
    async fn close(&mut self) -> Result<()>;
}
