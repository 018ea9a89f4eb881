use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bible_backend::{run_server, AppConfig, CorpusStore};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();

    tracing::info!("loading World English Bible data into memory...");
    let started = Instant::now();
    let corpus = CorpusStore::load(&config.data_dir)?;
    tracing::info!(
        "loaded {} Bible books into memory in {}ms, total verses: {}",
        corpus.book_count(),
        started.elapsed().as_millis(),
        corpus.total_verse_count()
    );

    run_server(config, corpus).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
