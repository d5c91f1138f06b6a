mod app;
mod util;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use knowledge_map::store::{ArticleClient, ArticleStore, DEFAULT_API_URL, SnapshotStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the saved-articles backend.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Read articles from a JSON file instead of the backend.
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 860.0)]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("knowledge_map=info,warn")),
        )
        .init();

    let args = Args::parse();
    let store: Arc<dyn ArticleStore> = match &args.snapshot {
        Some(path) => Arc::new(SnapshotStore::new(path.clone())),
        None => Arc::new(
            ArticleClient::new(&args.api_url)
                .with_context(|| format!("invalid article API url {}", args.api_url))?,
        ),
    };
    info!(store = %store.describe(), "starting knowledge map");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Knowledge map",
        options,
        Box::new(move |cc| Ok(Box::new(app::KnowledgeMapApp::new(cc, store)))),
    )
    .map_err(|error| anyhow::anyhow!("failed to run the viewer: {error}"))
}
