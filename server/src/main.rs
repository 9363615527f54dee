use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use newsfind_core::Thesaurus;
use server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus file or directory (JSON array or JSONL)
    #[arg(long, default_value = "./data/news.sample.json")]
    corpus: PathBuf,
    /// Optional thesaurus JSON replacing the built-in synonyms
    #[arg(long)]
    synonyms: Option<PathBuf>,
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
    let thesaurus = match &args.synonyms {
        Some(path) => Thesaurus::from_json_file(path)?,
        None => Thesaurus::default(),
    };
    let app: Router = build_app(args.corpus.clone(), thesaurus)
        .with_context(|| format!("loading corpus from {}", args.corpus.display()))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
