//! bison-guard: live wildlife tracking dashboard.
//!
//! Run with:  `RUST_LOG=info bison-guard`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("bison-guard v{} starting", env!("CARGO_PKG_VERSION"));

    guard_server::run().await.map_err(Into::into)
}
