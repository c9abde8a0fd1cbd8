use std::net::SocketAddr;

use elb_core::MessageId;
use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::Result;
use crate::frame;
use crate::transport::{Transport, UdpTransport};

/// Framed message channel to one agent endpoint
///
/// Combines a datagram transport, a body codec and the frame header.
pub struct Channel<C> {
    transport: Box<dyn Transport>,
    codec: C,
}

impl<C: Codec> Channel<C> {
    /// Create a channel from an existing transport
    pub fn from_transport(transport: impl Transport + 'static, codec: C) -> Self {
        Self::from_boxed(Box::new(transport), codec)
    }

    pub fn from_boxed(transport: Box<dyn Transport>, codec: C) -> Self {
        Self { transport, codec }
    }

    /// Open a UDP channel paired with `remote`
    pub async fn udp(remote: SocketAddr, codec: C) -> Result<Self> {
        let transport = UdpTransport::bind(remote).await?;
        Ok(Self::from_transport(transport, codec))
    }

    /// Send a message framed with `id`
    pub async fn send<T: Serialize>(&mut self, id: MessageId, message: &T) -> Result<()> {
        let body = self.codec.encode(message)?;
        let datagram = frame::encode(id, &body)?;
        self.transport.send(&datagram).await
    }

    /// Receive the next datagram, which must be a frame of kind `expected`
    pub async fn receive<T: for<'de> Deserialize<'de>>(&mut self, expected: MessageId) -> Result<T> {
        let datagram = self.transport.receive().await?;
        let body = frame::decode(expected, &datagram)?;
        self.codec.decode(body)
    }

    /// Close the channel
    pub async fn close(mut self) -> Result<()> {
        self.transport.close().await
    }
}
