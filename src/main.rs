//! sysdash: live system metrics in a desktop window.
//!
//! Run with:  `RUST_LOG=info sysdash`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("sysdash v{} starting", env!("CARGO_PKG_VERSION"));

    dash_app::run().map_err(Into::into)
}
