use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::UdpSocket;
use tracing::trace;

use crate::error::{Error, Result};
use crate::frame::MAX_DATAGRAM_LEN;
use crate::transport::Transport;

/// Connectionless UDP transport paired with one remote address
///
/// The socket is left unconnected, so datagrams from any source are
/// accepted on receive.
pub struct UdpTransport {
    socket: UdpSocket,
    remote: SocketAddr,
    recv_buffer: Vec<u8>,
}

impl UdpTransport {
    /// Bind an ephemeral local port and pair it with `remote`
    pub async fn bind(remote: SocketAddr) -> Result<Self> {
        Self::builder().remote(remote).bind().await
    }

    /// Create a builder for configuring the transport
    pub fn builder() -> UdpTransportBuilder {
        UdpTransportBuilder::new()
    }

    /// Create from an already bound socket, accepting datagrams up to the UDP maximum
    pub fn from_socket(socket: UdpSocket, remote: SocketAddr) -> Self {
        Self::with_recv_buffer(socket, remote, MAX_DATAGRAM_LEN)
    }

    fn with_recv_buffer(socket: UdpSocket, remote: SocketAddr, recv_buffer_size: usize) -> Self {
        Self {
            socket,
            remote,
            recv_buffer: vec![0u8; recv_buffer_size],
        }
    }

    /// Get the remote address datagrams are sent to
    pub fn peer_addr(&self) -> SocketAddr {
        self.remote
    }

    /// Get the local address of the socket
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(Into::into)
    }
}

#[async_trait::async_trait]
impl Transport for UdpTransport {
    async fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let sent = self.socket.send_to(bytes, self.remote).await?;
        trace!(remote = %self.remote, bytes = sent, "datagram sent");
        Ok(())
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
        let (len, from) = self.socket.recv_from(&mut self.recv_buffer).await?;
        trace!(%from, bytes = len, "datagram received");
        Ok(self.recv_buffer[..len].to_vec())
    }

    async fn close(&mut self) -> Result<()> {
        // The socket is released on drop; UDP holds no peer state to shut down
        Ok(())
    }
}

/// Builder for configuring UDP transport
pub struct UdpTransportBuilder {
    remote: Option<SocketAddr>,
    local: Option<SocketAddr>,
    recv_buffer_size: usize,
}

impl Default for UdpTransportBuilder {
    fn default() -> Self {
        Self {
            remote: None,
            local: None,
            recv_buffer_size: MAX_DATAGRAM_LEN,
        }
    }
}

impl UdpTransportBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the remote address datagrams are sent to
    pub fn remote(mut self, addr: SocketAddr) -> Self {
        self.remote = Some(addr);
        self
    }

    /// Set the local address to bind (defaults to an ephemeral port)
    pub fn local(mut self, addr: SocketAddr) -> Self {
        self.local = Some(addr);
        self
    }

    /// Set the largest datagram accepted on receive; longer ones are truncated
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size;
        self
    }

    /// Bind with the configured settings
    pub async fn bind(self) -> Result<UdpTransport> {
        let remote = self
            .remote
            .ok_or_else(|| Error::Custom("Remote address not set".to_string()))?;

        let local = self.local.unwrap_or_else(|| {
            let ip = match remote {
                SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            };
            SocketAddr::new(ip, 0)
        });

        let socket = UdpSocket::bind(local).await?;
        Ok(UdpTransport::with_recv_buffer(
            socket,
            remote,
            self.recv_buffer_size,
        ))
    }
}
