//! TCP transport for the client.
//!
//! Opens the stream and wraps it in a [`Session`]; all framing stays in
//! [`pkiframe_core`].

use std::net::SocketAddr;

use pkiframe_core::Session;
use tokio::net::TcpStream;

use crate::error::ClientError;

/// Connect to a pkiframe server.
///
/// Returns a fresh [`Session`] that can carry exactly one frame of
/// `frame_size` bytes.
pub async fn connect(
    server_addr: &str,
    frame_size: usize,
) -> Result<Session<TcpStream>, ClientError> {
    let addr: SocketAddr =
        server_addr.parse().map_err(|e| ClientError::InvalidAddress(format!("{server_addr}: {e}")))?;

    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| ClientError::Connection(format!("{addr}: {e}")))?;
    stream.set_nodelay(true).map_err(|e| ClientError::Connection(e.to_string()))?;

    tracing::debug!(%addr, "connected");

    Ok(Session::new(stream, frame_size))
}
