use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use targum_config::Config;
use targum_lang_hebrew::MorfixTranslator;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod render;
pub mod speech;
pub mod state;
pub mod surface;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// English to Hebrew popup dictionary for the terminal
#[derive(Debug, Parser)]
#[command(name = "targumchik", version)]
struct Args {
    /// JSON profile; defaults and TARGUM_* variables apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dictionary site to query instead of the configured one
    #[arg(long)]
    base_url: Option<String>,

    /// Word or phrase to look up on start
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    if let Some(base_url) = args.base_url {
        config.network.base_url = base_url;
    }

    let translator = MorfixTranslator::new(config.network.clone(), &config.dictionary)
        .context("failed to set up dictionary client")?;
    let state = Arc::new(AppState::new(config, Arc::new(translator)));

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
        }
    };

    run(state, args.query, shutdown).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

pub async fn run(
    state: Arc<AppState>,
    query: Option<String>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks().await;
    controller.page_ready(query).await?;

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::warn!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => tracing::warn!("no tasks running"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::error!("task failed during shutdown: {e}");
        }
    }

    Ok(())
}
