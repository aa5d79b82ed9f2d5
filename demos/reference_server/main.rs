//! Link server with the built-in definitions
//!
//! Run with:
//! ```bash
//! RUST_LOG=link_modules=debug,tower_http=info cargo run --example reference_server
//! ```
//!
//! An optional YAML file passed as the first argument is merged over the
//! built-in configuration.

use anyhow::Result;
use link_modules::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut defaults = LinksConfig::default_config();
    defaults.reference = ReferenceConfig::from_env();

    let mut builder = ServerBuilder::new()
        .with_link_store(InMemoryLinkStore::new())
        .with_config(defaults);

    if let Some(path) = std::env::args().nth(1) {
        builder = builder.with_config_file(&path)?;
    }

    builder.serve("127.0.0.1:3000").await
}
