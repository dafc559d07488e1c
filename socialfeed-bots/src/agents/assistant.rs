//! LLM-backed participant.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::AgentDescriptor;
use crate::llm::{ChatRequestMessage, LlmClient};
use crate::team::{ChatMessage, Participant, ToolExecution};
use crate::tools::ToolCall;

/// A participant that asks the model what to say or which tools to call.
pub struct LlmAgent {
    descriptor: AgentDescriptor,
    client: Arc<LlmClient>,
    max_tool_iterations: usize,
}

impl LlmAgent {
    pub fn new(descriptor: AgentDescriptor, client: Arc<LlmClient>) -> Self {
        Self {
            descriptor,
            client,
            max_tool_iterations: 1,
        }
    }

    /// Let the model see tool results and act again within the same turn.
    pub fn with_max_tool_iterations(mut self, rounds: usize) -> Self {
        self.max_tool_iterations = rounds.max(1);
        self
    }

    pub fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    /// System prompt, then the transcript from this agent's point of view.
    fn context(&self, transcript: &[ChatMessage]) -> Vec<ChatRequestMessage> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        messages.push(ChatRequestMessage::system(&self.descriptor.system_prompt));
        for message in transcript {
            let text = message.to_model_text();
            if message.source == self.descriptor.name {
                messages.push(ChatRequestMessage::assistant(text));
            } else {
                messages.push(ChatRequestMessage::user(text, Some(&message.source)));
            }
        }
        messages
    }
}

#[async_trait]
impl Participant for LlmAgent {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    async fn take_turn(&mut self, transcript: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        let name = self.descriptor.name.as_str();
        let tools = self.descriptor.tool_set.definitions();
        let mut context = self.context(transcript);
        let mut produced = Vec::new();

        for round in 1..=self.max_tool_iterations {
            let reply = self
                .client
                .chat(&context, &tools)
                .await
                .with_context(|| format!("{name} could not reach the model"))?
                .into_message()?;

            let text = reply.text().trim().to_string();
            if reply.tool_calls.is_empty() {
                produced.push(ChatMessage::text(name, text));
                return Ok(produced);
            }
            if !text.is_empty() {
                produced.push(ChatMessage::text(name, text));
            }

            let mut executions = Vec::with_capacity(reply.tool_calls.len());
            let mut results = Vec::with_capacity(reply.tool_calls.len());
            for request in &reply.tool_calls {
                let call = ToolCall::parse(&request.function.name, &request.function.arguments)
                    .with_context(|| format!("{name} issued a malformed tool call"))?;
                tracing::info!(agent = %name, tool = %call.tool(), round, "Calling tool");
                let result = self
                    .descriptor
                    .tool_set
                    .call(&call)
                    .await
                    .with_context(|| format!("{name}: {} failed", call.tool()))?;
                results.push(ChatRequestMessage::tool_result(&request.id, result.clone()));
                executions.push(ToolExecution { call, result });
            }
            produced.push(ChatMessage::tool_calls(name, executions));

            context.push(reply);
            context.extend(results);
        }

        Ok(produced)
    }
}
