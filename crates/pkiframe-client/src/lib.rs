//! Sending peer for the pkiframe protocol.
//!
//! Encodes one message into a fixed-size frame, connects to the receiver,
//! writes the frame and closes the stream.
//!
//! The message is encoded before the connection is opened, so a message
//! that does not fit the frame or the keys never reaches the network.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod transport;

pub use error::ClientError;
use pkiframe_core::{FrameCodec, SessionConfig, SystemEnv};
use pkiframe_proto::Frame;
pub use transport::connect;

/// Client configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ClientRuntimeConfig {
    /// Address of the receiving peer (e.g., "127.0.0.1:1234")
    pub server_address: String,
    /// Frame size, mode and key parameters
    pub session: SessionConfig,
}

/// One-shot sending peer.
pub struct Client {
    server_address: String,
    codec: FrameCodec,
    env: SystemEnv,
}

impl Client {
    /// Build the session codec.
    ///
    /// Fails on invalid key parameters or a zero frame size.
    pub fn new(config: ClientRuntimeConfig) -> Result<Self, ClientError> {
        let codec = config.session.build_codec()?;
        Ok(Self { server_address: config.server_address, codec, env: SystemEnv::new() })
    }

    /// Codec negotiated for this session.
    pub fn codec(&self) -> &FrameCodec {
        &self.codec
    }

    /// Encode `message`, deliver it and close the connection.
    ///
    /// Returns the frame that went on the wire.
    pub async fn send(self, message: &str) -> Result<Frame, ClientError> {
        let frame = self.codec.encode(message, &self.env)?;

        let mut session = connect(&self.server_address, self.codec.frame_size()).await?;
        session.send(&frame).await?;
        session.close().await?;

        tracing::info!(server = %self.server_address, bytes = frame.len(), "message sent");
        Ok(frame)
    }
}
