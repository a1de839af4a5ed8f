//! pkiframe receiving peer.
//!
//! # Usage
//!
//! ```bash
//! # Own key from p=11 q=13 e=7, sender's public pair (3, 55)
//! pkiframe-server --p 11 --q 13 -e 7 --peer-e 3 --peer-n 55 \
//!     --frame-size 64 --mode both
//! ```

use clap::Parser;
use pkiframe_core::{KeyParams, SessionConfig};
use pkiframe_crypto::PublicKey;
use pkiframe_proto::{DEFAULT_PORT, Mode};
use pkiframe_server::{Server, ServerRuntimeConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// pkiframe receiving peer
#[derive(Parser, Debug)]
#[command(name = "pkiframe-server")]
#[command(about = "Receive one pkiframe message")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value_t = format!("0.0.0.0:{DEFAULT_PORT}"))]
    bind: String,

    /// Frame size in bytes (must match the sender)
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

    /// Sender's public exponent
    #[arg(long)]
    peer_e: u64,

    /// Sender's modulus
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

    tracing::info!("pkiframe server starting");

    let session = SessionConfig {
        frame_size: args.frame_size,
        mode: args.mode,
        own: KeyParams { p: args.p, q: args.q, e: args.e },
        peer: PublicKey::new(args.peer_e, args.peer_n),
    };
    let config = ServerRuntimeConfig { bind_address: args.bind, session };

    let server = Server::bind(config).await?;

    tracing::info!("Server listening on {}", server.local_addr()?);

    let message = server.run().await?;

    tracing::info!(%message, "exchange complete");

    Ok(())
}
