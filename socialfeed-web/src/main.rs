//! socialfeed-web: serve the feed dashboard on a local port.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

use socialfeed_bots::config::Settings;
use socialfeed_web::{AppState, router};

#[derive(Parser)]
#[command(name = "socialfeed-web", about = "Dashboard for the AI social feed")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "SOCIALFEED_LISTEN", default_value = "127.0.0.1:8501")]
    listen: SocketAddr,

    #[command(flatten)]
    settings: Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    socialfeed_bots::logging::init("socialfeed_web=info,socialfeed_bots=info,tower_http=info")?;
    let args = Args::parse();

    if !args.settings.model.has_api_key() {
        tracing::warn!("No API key configured; the run button is disabled");
    }

    let state = Arc::new(AppState::new(args.settings));
    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    tracing::info!(
        addr = %args.listen,
        feed = %state.store.path().display(),
        "Dashboard listening"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
