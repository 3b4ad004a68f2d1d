use anyhow::Result;
use axum::Router;
use clap::Parser;
use littlesearch_core::Corpus;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::{build_app, AppConfig};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Document-list file or directory of .txt documents
    #[arg(long, default_value = "docs.txt")]
    docs: PathBuf,
    /// Noise-word file; a built-in English list is used when omitted
    #[arg(long)]
    noise: Option<PathBuf>,
    /// Base directory for relative document names
    #[arg(long)]
    root: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let corpus = Corpus { docs: args.docs, noise: args.noise, root: args.root };
    let app: Router = build_app(AppConfig::from_env(corpus))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
