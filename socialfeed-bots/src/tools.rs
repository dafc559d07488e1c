//! Feed tools agents can call.
//!
//! Tool names from the model are resolved once into a typed `ToolCall`;
//! execution is a match over that enum.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::feed::{FeedError, FeedStore};
use crate::llm::ToolDef;

/// The tools this system offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedTool {
    PostToSite,
    ReadSiteFeed,
}

impl FeedTool {
    pub const ALL: [FeedTool; 2] = [FeedTool::PostToSite, FeedTool::ReadSiteFeed];

    pub fn name(self) -> &'static str {
        match self {
            FeedTool::PostToSite => "post_to_site",
            FeedTool::ReadSiteFeed => "read_site_feed",
        }
    }

    /// Function definition advertised to the model.
    pub fn definition(self) -> ToolDef {
        match self {
            FeedTool::PostToSite => ToolDef::function(
                self.name(),
                "Post a message to the social feed. Args: author (str), text (str)",
                json!({
                    "type": "object",
                    "required": ["author", "text"],
                    "properties": {
                        "author": {
                            "type": "string",
                            "description": "Your agent name, e.g. 'TrendSetter'"
                        },
                        "text": {
                            "type": "string",
                            "description": "The post body"
                        }
                    }
                }),
            ),
            FeedTool::ReadSiteFeed => ToolDef::function(
                self.name(),
                "Read all posts from the social feed",
                json!({
                    "type": "object",
                    "properties": {}
                }),
            ),
        }
    }
}

impl fmt::Display for FeedTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeedTool {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedTool::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ToolError::Unknown(s.to_string()))
    }
}

/// A parsed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    PostToSite { author: String, text: String },
    ReadSiteFeed,
}

#[derive(Deserialize)]
struct PostArgs {
    author: String,
    text: String,
}

impl ToolCall {
    /// Resolve a model-issued `(name, arguments)` pair.
    pub fn parse(name: &str, arguments: &str) -> Result<Self, ToolError> {
        let tool: FeedTool = name.parse()?;
        match tool {
            FeedTool::PostToSite => {
                let args: PostArgs = serde_json::from_str(arguments).map_err(|e| {
                    ToolError::BadArguments {
                        tool: tool.name(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(ToolCall::PostToSite {
                    author: args.author,
                    text: args.text,
                })
            }
            // Any (or no) arguments are fine for a read.
            FeedTool::ReadSiteFeed => Ok(ToolCall::ReadSiteFeed),
        }
    }

    pub fn tool(&self) -> FeedTool {
        match self {
            ToolCall::PostToSite { .. } => FeedTool::PostToSite,
            ToolCall::ReadSiteFeed => FeedTool::ReadSiteFeed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    Unknown(String),
    #[error("Tool {0} is not available to this agent")]
    NotAvailable(FeedTool),
    #[error("Invalid arguments for {tool}: {reason}")]
    BadArguments { tool: &'static str, reason: String },
    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// The tools handed to one agent, bound to the feed they act on.
#[derive(Debug, Clone)]
pub struct ToolSet {
    tools: Vec<FeedTool>,
    store: Option<Arc<FeedStore>>,
}

impl ToolSet {
    /// Both feed tools.
    pub fn feed(store: Arc<FeedStore>) -> Self {
        Self {
            tools: FeedTool::ALL.to_vec(),
            store: Some(store),
        }
    }

    /// A subset of the feed tools.
    pub fn only(store: Arc<FeedStore>, tools: &[FeedTool]) -> Self {
        let mut picked = Vec::new();
        for tool in tools {
            if !picked.contains(tool) {
                picked.push(*tool);
            }
        }
        Self {
            tools: picked,
            store: Some(store),
        }
    }

    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            store: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, tool: FeedTool) -> bool {
        self.tools.contains(&tool)
    }

    pub fn tools(&self) -> &[FeedTool] {
        &self.tools
    }

    pub fn definitions(&self) -> Vec<ToolDef> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Run one call against the feed.
    pub async fn call(&self, call: &ToolCall) -> Result<String, ToolError> {
        let tool = call.tool();
        let store = match &self.store {
            Some(store) if self.contains(tool) => store,
            _ => return Err(ToolError::NotAvailable(tool)),
        };
        let result = match call {
            ToolCall::PostToSite { author, text } => store.append_post(author, text).await?,
            ToolCall::ReadSiteFeed => store.read_feed_summary().await?,
        };
        Ok(result)
    }
}
