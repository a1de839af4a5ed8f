//! Receiving peer for the pkiframe protocol.
//!
//! Binds a TCP endpoint, accepts exactly one sender, reads one fixed-size
//! frame and decodes it with [`pkiframe_core::FrameCodec`].
//!
//! # Components
//!
//! - [`Server`]: one-shot runtime that owns the listener and the codec
//! - [`TcpTransport`]: listening TCP endpoint
//! - [`ServerError`]: startup, transport and exchange failures

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod transport;

use std::net::SocketAddr;

pub use error::ServerError;
use pkiframe_core::{FrameCodec, Session, SessionConfig, SystemEnv};
pub use transport::TcpTransport;

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Address to bind to (e.g., "0.0.0.0:1234")
    pub bind_address: String,
    /// Frame size, mode and key parameters
    pub session: SessionConfig,
}

/// One-shot receiving peer.
///
/// The listener and the codec are set up in [`Server::bind`]; key errors
/// surface there, before any peer connects.
pub struct Server {
    transport: TcpTransport,
    codec: FrameCodec,
    env: SystemEnv,
}

impl Server {
    /// Build the session codec and bind the listener.
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let codec = config.session.build_codec()?;
        let transport = TcpTransport::bind(&config.bind_address).await?;

        Ok(Self { transport, codec, env: SystemEnv::new() })
    }

    /// Accept one sender and return the message it sent.
    ///
    /// The connection is dropped once the frame is decoded; no reply is
    /// written.
    pub async fn run(self) -> Result<String, ServerError> {
        let (stream, peer) = self.transport.accept().await?;
        tracing::info!(%peer, "sender connected");

        let mut session = Session::new(stream, self.codec.frame_size());
        let message = session.receive_message(&self.codec, &self.env).await?;

        tracing::info!(%peer, chars = message.chars().count(), "message received");
        Ok(message)
    }

    /// Codec negotiated for this session.
    pub fn codec(&self) -> &FrameCodec {
        &self.codec
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.transport.local_addr()
    }
}
