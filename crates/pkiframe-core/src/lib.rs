//! Pkiframe core: the message pipeline between two peers.
//!
//! # Architecture
//!
//! ```text
//! sender:   message ─▶ FrameCodec::encode ─▶ Frame ─▶ Session::send ─┐
//!                      (Transform::apply,                            │ one
//!                       Environment filler)                          │ frame
//! receiver: message ◀─ FrameCodec::decode ◀─ Frame ◀─ Session::receive ◀┘
//!                      (Transform::invert,
//!                       stop at terminator)
//! ```
//!
//! # Components
//!
//! - [`FrameCodec`]: marks, transforms, packs and pads messages (and the
//!   reverse)
//! - [`Transform`]: per-mode symbol chain, including the modulus-ordered
//!   chain for [`Mode::Both`](pkiframe_proto::Mode::Both)
//! - [`Session`]: one-frame exchange over an async byte stream
//! - [`Environment`]: injected time and randomness; [`SystemEnv`] for
//!   production
//! - [`SessionConfig`]: agreed parameters, validated into a codec

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod config;
pub mod env;
mod error;
mod order;
mod session;
mod system_env;

pub use codec::FrameCodec;
pub use config::{KeyParams, SessionConfig, report_key_pair};
pub use env::Environment;
pub use error::ExchangeError;
pub use order::Transform;
pub use session::{Session, SessionState};
pub use system_env::SystemEnv;
