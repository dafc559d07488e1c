//! Local dashboard for the AI social feed.
//!
//! Serves a read-only view of the feed document and lets the operator kick
//! off one short agent run at a time. Also exposes the feed as JSON.

pub mod engagement;
pub mod profiles;
pub mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::get;
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use socialfeed_bots::agents::{self, prompts};
use socialfeed_bots::config::Settings;
use socialfeed_bots::feed::{FeedSnapshot, FeedStore, LoadProblem, Post};
use socialfeed_bots::team::{
    ChatMessage, DEFAULT_SENTINEL, QUICK_MAX_MESSAGES, RoundRobinChat, TeamResult, Termination,
};

use crate::render::{Notice, Page};

/// Shared by every request.
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<FeedStore>,
    /// Held for the whole of a dashboard-triggered run.
    run_lock: Mutex<()>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let store = Arc::new(settings.feed.store());
        Self {
            settings,
            store,
            run_lock: Mutex::new(()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/run", axum::routing::post(run))
        .route("/api/v1/feed", get(api_feed))
        .route("/api/v1/health", get(api_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Read the document off the async runtime. Never fails.
pub async fn load_snapshot(path: PathBuf) -> FeedSnapshot {
    match tokio::task::spawn_blocking(move || FeedSnapshot::load(&path)).await {
        Ok(snapshot) => snapshot,
        Err(e) => FeedSnapshot {
            posts: Vec::new(),
            problem: Some(LoadProblem::Unreadable(e.to_string())),
        },
    }
}

async fn page(state: &AppState, notice: Option<Notice>) -> Html<String> {
    let snapshot = load_snapshot(state.store.path().to_path_buf()).await;
    if let Some(problem) = &snapshot.problem
        && *problem != LoadProblem::Missing
    {
        tracing::warn!(
            ?problem,
            path = %state.store.path().display(),
            "Feed document not readable"
        );
    }
    Html(render::render_page(&Page {
        snapshot: &snapshot,
        notice,
        can_run: state.settings.model.has_api_key(),
    }))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    page(&state, None).await
}

pub async fn run(State(state): State<Arc<AppState>>) -> Html<String> {
    let notice = match state.run_lock.try_lock() {
        Err(_) => Notice::AlreadyRunning,
        Ok(_guard) => match run_quick_mission(&state).await {
            Ok(result) => Notice::Finished {
                reason: result.reason.to_string(),
                messages: result.message_count,
            },
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "Dashboard run failed");
                Notice::Failed(format!("{e:#}"))
            }
        },
    };
    page(&state, Some(notice)).await
}

/// One short run: each agent posts once, ceiling of nine messages.
pub async fn run_quick_mission(state: &AppState) -> Result<TeamResult> {
    let client = state.settings.model.client()?;
    let termination = Termination::new(DEFAULT_SENTINEL, QUICK_MAX_MESSAGES)?;
    let squad = agents::standard_squad(client, Arc::clone(&state.store));
    let mut chat = RoundRobinChat::new(squad, termination)?;

    tracing::info!(feed = %state.store.path().display(), "Dashboard run started");
    let result = chat
        .run(
            &prompts::quick_mission(DEFAULT_SENTINEL),
            &mut |m: &ChatMessage| tracing::debug!(agent = %m.source, "Agent message"),
        )
        .await?;
    tracing::info!(
        reason = %result.reason,
        messages = result.message_count,
        "Dashboard run finished"
    );
    Ok(result)
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub total: usize,
    /// Newest first.
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

pub async fn api_feed(State(state): State<Arc<AppState>>) -> Json<FeedResponse> {
    let snapshot = load_snapshot(state.store.path().to_path_buf()).await;
    let problem = match &snapshot.problem {
        None => None,
        Some(LoadProblem::Missing) => Some("missing".to_string()),
        Some(LoadProblem::Malformed(reason)) => Some(format!("malformed: {reason}")),
        Some(LoadProblem::Unreadable(reason)) => Some(format!("unreadable: {reason}")),
    };
    Json(FeedResponse {
        total: snapshot.len(),
        posts: snapshot.newest_first().map(|(_, p)| p.clone()).collect(),
        problem,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub feed_path: String,
    pub posts: usize,
    pub can_run: bool,
    pub run_in_progress: bool,
}

pub async fn api_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = load_snapshot(state.store.path().to_path_buf()).await;
    Json(HealthResponse {
        status: "ok",
        feed_path: state.store.path().display().to_string(),
        posts: snapshot.len(),
        can_run: state.settings.model.has_api_key(),
        run_in_progress: state.is_running(),
    })
}
