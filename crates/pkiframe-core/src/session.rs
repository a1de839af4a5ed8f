//! Transport session: exactly one fixed-size frame per connection.
//!
//! The session owns a connected byte stream (TCP in production, an in-memory
//! duplex in tests). Establishing the connection is the caller's job.
//!
//! # Lifecycle
//!
//! ```text
//! Ready ──send / receive──▶ Spent
//! ```
//!
//! A session carries one message. Sending blocks until the whole frame is
//! written and flushed; receiving blocks until exactly `frame_size` bytes
//! have arrived. There are no timeouts and no retries, and a short read is a
//! corrupt message.

use std::io;

use pkiframe_proto::{Frame, ProtocolError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{codec::FrameCodec, env::Environment, error::ExchangeError};

/// Where a session is in its one-message lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No frame sent or received yet
    Ready,
    /// The session's frame has been sent or received (or the attempt failed)
    Spent,
}

/// One connected stream plus the agreed frame size.
#[derive(Debug)]
pub struct Session<S> {
    stream: S,
    frame_size: usize,
    state: SessionState,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a connected stream.
    pub fn new(stream: S, frame_size: usize) -> Self {
        Self { stream, frame_size, state: SessionState::Ready }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Agreed frame size in bytes.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Write one frame and flush.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameSizeMismatch` if the frame is not the agreed
    ///   size (session stays `Ready`)
    /// - `ExchangeError::SessionSpent` if the session was already used
    /// - `ExchangeError::Transport` on any write failure
    pub async fn send(&mut self, frame: &Frame) -> Result<(), ExchangeError> {
        if frame.len() != self.frame_size {
            return Err(ProtocolError::FrameSizeMismatch {
                expected: self.frame_size,
                actual: frame.len(),
            }
            .into());
        }

        self.begin()?;

        self.stream.write_all(frame.as_bytes()).await?;
        self.stream.flush().await?;

        tracing::debug!(bytes = frame.len(), "sent frame");
        Ok(())
    }

    /// Read exactly one frame.
    ///
    /// # Errors
    ///
    /// - `ExchangeError::SessionSpent` if the session was already used
    /// - `ExchangeError::Transport` if the stream fails or closes before a
    ///   full frame arrives
    pub async fn receive(&mut self) -> Result<Frame, ExchangeError> {
        self.begin()?;

        let frame_size = self.frame_size;
        let mut buf = vec![0u8; frame_size];
        self.stream.read_exact(&mut buf).await.map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                ExchangeError::Transport(format!(
                    "stream closed before a full {frame_size}-byte frame arrived"
                ))
            } else {
                ExchangeError::from(err)
            }
        })?;

        tracing::debug!(bytes = buf.len(), "received frame");
        Ok(Frame::from_bytes(buf, frame_size)?)
    }

    /// Encode `message` and send it as this session's frame.
    ///
    /// Encoding failures leave the session `Ready`. Returns the frame that
    /// went on the wire.
    pub async fn send_message<E: Environment>(
        &mut self,
        codec: &FrameCodec,
        env: &E,
        message: &str,
    ) -> Result<Frame, ExchangeError> {
        let frame = codec.encode(message, env)?;
        self.send(&frame).await?;
        Ok(frame)
    }

    /// Receive this session's frame and decode it.
    pub async fn receive_message<E: Environment>(
        &mut self,
        codec: &FrameCodec,
        env: &E,
    ) -> Result<String, ExchangeError> {
        let frame = self.receive().await?;
        codec.decode(&frame, env)
    }

    /// Shut down the write half, signalling end of stream to the peer.
    pub async fn close(&mut self) -> Result<(), ExchangeError> {
        self.stream.shutdown().await?;
        Ok(())
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    fn begin(&mut self) -> Result<(), ExchangeError> {
        match self.state {
            SessionState::Ready => {
                self.state = SessionState::Spent;
                Ok(())
            },
            SessionState::Spent => Err(ExchangeError::SessionSpent),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::duplex;

    use super::*;

    fn frame(bytes: &[u8]) -> Frame {
        Frame::from_bytes(bytes.to_vec(), bytes.len()).unwrap()
    }

    #[tokio::test]
    async fn frame_crosses_the_stream_unchanged() {
        let (a, b) = duplex(64);
        let mut sender = Session::new(a, 4);
        let mut receiver = Session::new(b, 4);

        sender.send(&frame(&[1, 2, 3, 4])).await.unwrap();
        let received = receiver.receive().await.unwrap();

        assert_eq!(received.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(sender.state(), SessionState::Spent);
        assert_eq!(receiver.state(), SessionState::Spent);
    }

    #[tokio::test]
    async fn second_send_is_rejected() {
        let (a, _b) = duplex(64);
        let mut sender = Session::new(a, 2);

        sender.send(&frame(&[1, 2])).await.unwrap();
        let err = sender.send(&frame(&[3, 4])).await.unwrap_err();

        assert_eq!(err, ExchangeError::SessionSpent);
    }

    #[tokio::test]
    async fn wrong_size_frame_is_not_sent() {
        let (a, _b) = duplex(64);
        let mut sender = Session::new(a, 4);

        let err = sender.send(&frame(&[1, 2])).await.unwrap_err();

        assert!(matches!(err, ExchangeError::Protocol(ProtocolError::FrameSizeMismatch { .. })));
        assert_eq!(sender.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn partial_frame_is_a_transport_error() {
        let (mut a, b) = duplex(64);
        let mut receiver = Session::new(b, 8);

        a.write_all(&[1, 2, 3]).await.unwrap();
        drop(a);

        let err = receiver.receive().await.unwrap_err();
        assert!(matches!(err, ExchangeError::Transport(_)));
        assert!(err.is_fatal_to_session());
    }

    #[tokio::test]
    async fn close_signals_end_of_stream() {
        let (a, mut b) = duplex(64);
        let mut sender = Session::new(a, 1);

        sender.send(&frame(&[9])).await.unwrap();
        sender.close().await.unwrap();

        let mut rest = Vec::new();
        b.read_to_end(&mut rest).await.unwrap();
        assert_eq!(rest, vec![9]);
    }
}
