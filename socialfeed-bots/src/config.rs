//! Start-up configuration.
//!
//! Built once from flags and environment, then passed by reference.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::feed::FeedStore;
use crate::llm::{DEFAULT_API_BASE, LlmClient};

/// Default location of the feed document, relative to the working directory.
pub const DEFAULT_FEED_PATH: &str = "site/feed.json";

/// Where the feed document lives.
#[derive(Debug, Clone, Args)]
pub struct FeedSettings {
    /// Path of the JSON feed document
    #[arg(long, env = "FEED_PATH", default_value = DEFAULT_FEED_PATH)]
    pub feed_path: PathBuf,
}

impl FeedSettings {
    pub fn store(&self) -> FeedStore {
        FeedStore::new(&self.feed_path)
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from(DEFAULT_FEED_PATH),
        }
    }
}

/// Which model to talk to, and how.
#[derive(Clone, Args)]
pub struct ModelSettings {
    /// API key for the chat-completions endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier
    #[arg(long, env = "MODEL_NAME", default_value = "gpt-4o")]
    pub model: String,

    /// Base URL of the chat-completions API
    #[arg(long, env = "OPENAI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

impl ModelSettings {
    /// Build the shared model client. Fails without an API key.
    pub fn client(&self) -> Result<Arc<LlmClient>> {
        let api_key = match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => anyhow::bail!("No API key configured: set OPENAI_API_KEY or pass --api-key"),
        };
        Ok(Arc::new(
            LlmClient::new(api_key)
                .with_model(&self.model)
                .with_api_base(&self.api_base),
        ))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

// The key stays out of debug output.
impl std::fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Everything a component might need.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    #[command(flatten)]
    pub feed: FeedSettings,

    #[command(flatten)]
    pub model: ModelSettings,
}
