//! Chat-completions client with tool-calling support.
//!
//! Speaks the OpenAI `/chat/completions` wire format. Every agent role shares
//! one client; each request carries that agent's system prompt and tools.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Role of a message in a chat-completions request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A message sent to (or echoed back from) the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequestMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Some compatible backends send `null` here on plain text replies.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_calls: Vec<ToolCallRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatRequestMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content.into(), None)
    }

    pub fn user(content: impl Into<String>, name: Option<&str>) -> Self {
        Self::plain(Role::User, content.into(), name.map(sanitize_name))
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content.into(), None)
    }

    pub fn tool_result(tool_call_id: &str, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            name: None,
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.to_string()),
        }
    }

    fn plain(role: Role, content: String, name: Option<String>) -> Self {
        Self {
            role,
            content: Some(content),
            name,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Text content, empty if the model sent none.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The API only accepts `[A-Za-z0-9_-]` in participant names.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, exactly as the model produced them.
    #[serde(default)]
    pub arguments: String,
}

fn function_kind() -> String {
    "function".to_string()
}

/// Tool definition advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolDef {
    pub fn function(name: &str, description: &str, parameters: serde_json::Value) -> Self {
        Self {
            kind: function_kind(),
            function: FunctionDef {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

/// Response from the chat-completions endpoint.
#[derive(Debug, Deserialize)]
pub struct Completion {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatRequestMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl Completion {
    /// The first choice's message; the API always returns at least one.
    pub fn into_message(self) -> Result<ChatRequestMessage> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .context("Completion contained no choices")
    }
}

/// Chat-completions client.
pub struct LlmClient {
    api_key: String,
    model: String,
    api_base: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gpt-4o".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a conversation and get the model's completion.
    pub async fn chat(
        &self,
        messages: &[ChatRequestMessage],
        tools: &[ToolDef],
    ) -> Result<Completion> {
        let mut body = serde_json::json!({
            "model": &self.model,
            "messages": messages,
        });

        if !tools.is_empty() {
            body["tools"] = serde_json::to_value(tools)?;
        }

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to call chat completions API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Chat completions API error {status}: {body}");
        }

        let completion = resp
            .json::<Completion>()
            .await
            .context("Failed to parse chat completion")?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion received"
            );
        }
        Ok(completion)
    }
}
