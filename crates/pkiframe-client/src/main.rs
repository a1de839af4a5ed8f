//! pkiframe sending peer.
//!
//! # Usage
//!
//! ```bash
//! # Own key from p=5 q=11 e=3, receiver's public pair (7, 143)
//! pkiframe-client --p 5 --q 11 -e 3 --peer-e 7 --peer-n 143 \
//!     --frame-size 64 --mode both --message "hello"
//! ```

use clap::Parser;
use pkiframe_client::{Client, ClientRuntimeConfig};
use pkiframe_core::{KeyParams, SessionConfig};
use pkiframe_crypto::PublicKey;
use pkiframe_proto::{DEFAULT_PORT, Mode};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// pkiframe sending peer
#[derive(Parser, Debug)]
#[command(name = "pkiframe-client")]
#[command(about = "Send one pkiframe message")]
#[command(version)]
struct Args {
    /// Address of the receiving peer
    #[arg(short, long, default_value_t = format!("127.0.0.1:{DEFAULT_PORT}"))]
    connect: String,

    /// Message to send
    #[arg(short, long)]
    message: String,

    /// Frame size in bytes (must match the receiver)
    #[arg(long)]
    frame_size: usize,

    /// First prime of our key
    #[arg(long)]
    p: u32,

    /// Second prime of our key
    #[arg(long)]
    q: u32,

    /// Our public exponent
    #[arg(short)]
    e: u32,

    /// Receiver's public exponent
    #[arg(long)]
    peer_e: u64,

    /// Receiver's modulus
    #[arg(long)]
    peer_n: u64,

    /// Exchange mode: 1/authenticate, 2/encrypt, 3/both
    #[arg(long, default_value = "both")]
    mode: Mode,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("pkiframe client starting");

    let session = SessionConfig {
        frame_size: args.frame_size,
        mode: args.mode,
        own: KeyParams { p: args.p, q: args.q, e: args.e },
        peer: PublicKey::new(args.peer_e, args.peer_n),
    };
    let config = ClientRuntimeConfig { server_address: args.connect, session };

    let client = Client::new(config)?;
    client.send(&args.message).await?;

    Ok(())
}
