use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use bookshelf::server::{ENDPOINT, ResolutionProbe, check_schema, make_app, make_schema};
use bookshelf::store::RecordStore;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "GraphQL API over an in-memory library of books and authors")]
struct Cli {
    /// Address to serve the GraphQL endpoint on
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    listen: SocketAddr,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let store = Arc::new(RecordStore::seeded());
    let schema = make_schema(store, Arc::new(ResolutionProbe::default()));
    check_schema(&schema)
        .await
        .context("schema does not expose the library API")?;

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    tracing::info!("server running on http://{}{ENDPOINT}", cli.listen);

    axum::serve(listener, make_app(schema)).await?;
    Ok(())
}
