//! Recipe finder binary entry point

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use shared::logging;

use finder::{
    Controller, FinderConfig, FinderResult, RecipeStateManager, SessionStore,
    services::{JsonFileSessionStore, MemorySessionStore, TerminalView},
};

#[derive(Parser, Debug)]
#[command(name = "finder")]
#[command(about = "Search recipes and videos, keep favorites and saved recipes for the session")]
struct Args {
    /// Keep the session in this JSON file instead of memory
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Search as you type
    #[arg(long)]
    dynamic_search: bool,

    /// Relevance language for video lookups (overrides YOUTUBE_LANGUAGE)
    #[arg(long)]
    language: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> FinderResult<()> {
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup("finder", "recipe finder");

    let mut config = match FinderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::log_error("finder", "Loading configuration", &e);
            return Err(e);
        }
    };
    if let Some(language) = args.language {
        config.youtube_language = language;
    }

    let store: Box<dyn SessionStore> = match args.session_file {
        Some(path) => {
            let store = JsonFileSessionStore::new(path);
            tracing::info!(path = %store.path().display(), "Using file-backed session");
            Box::new(store)
        }
        None => Box::new(MemorySessionStore::new()),
    };

    let state = RecipeStateManager::new(store);
    let mut controller = Controller::new(
        state,
        Arc::new(config.recipe_client()),
        Arc::new(config.video_client()),
        TerminalView::stdio(),
        args.dynamic_search,
    );

    let result = controller.run().await;
    logging::log_shutdown("finder", "input closed");
    result
}
