//! Round-robin group chat.
//!
//! Participants speak one at a time in a fixed cyclic order. Every message
//! they produce is appended to a shared transcript that all participants see
//! on their next turn. The run ends when a message contains the sentinel
//! phrase or the message ceiling is reached, whichever comes first; both are
//! checked after every message.

use std::fmt;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::tools::ToolCall;

pub const DEFAULT_SENTINEL: &str = "WORKFLOW_COMPLETE";
/// Ceiling for a command-line run.
pub const DEFAULT_MAX_MESSAGES: usize = 30;
/// Ceiling for a dashboard-triggered run.
pub const QUICK_MAX_MESSAGES: usize = 9;

/// Source name of the seed task in the transcript.
pub const TASK_SOURCE: &str = "user";

/// A tool call made during a turn and what it returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecution {
    pub call: ToolCall,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    ToolCalls(Vec<ToolExecution>),
}

/// One entry in the shared transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub source: String,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn text(source: &str, text: impl Into<String>) -> Self {
        Self {
            source: source.to_string(),
            body: MessageBody::Text(text.into()),
        }
    }

    pub fn tool_calls(source: &str, executions: Vec<ToolExecution>) -> Self {
        Self {
            source: source.to_string(),
            body: MessageBody::ToolCalls(executions),
        }
    }

    /// Text content, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text(text) => Some(text),
            MessageBody::ToolCalls(_) => None,
        }
    }

    /// How the message reads to other participants.
    pub fn to_model_text(&self) -> String {
        match &self.body {
            MessageBody::Text(text) => text.clone(),
            MessageBody::ToolCalls(executions) => executions
                .iter()
                .map(|e| e.result.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A conversational participant driven by the orchestrator.
#[async_trait]
pub trait Participant: Send {
    fn name(&self) -> &str;

    /// Produce this turn's messages given everything said so far.
    ///
    /// An error aborts the whole run.
    async fn take_turn(&mut self, transcript: &[ChatMessage]) -> Result<Vec<ChatMessage>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    Sentinel,
    MaxMessages,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Sentinel => write!(f, "sentinel"),
            TerminationReason::MaxMessages => write!(f, "max-messages"),
        }
    }
}

/// Sentinel phrase plus message ceiling.
#[derive(Debug, Clone)]
pub struct Termination {
    sentinel: String,
    sentinel_folded: String,
    max_messages: usize,
}

impl Termination {
    pub fn new(sentinel: &str, max_messages: usize) -> Result<Self> {
        if sentinel.trim().is_empty() {
            bail!("Sentinel phrase must not be empty");
        }
        if max_messages == 0 {
            bail!("Message ceiling must be at least 1");
        }
        Ok(Self {
            sentinel: sentinel.to_string(),
            sentinel_folded: sentinel.to_lowercase(),
            max_messages,
        })
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Case-insensitive substring match against text messages.
    pub fn mentions_sentinel(&self, message: &ChatMessage) -> bool {
        message
            .as_text()
            .is_some_and(|text| text.to_lowercase().contains(&self.sentinel_folded))
    }

    /// Check after a message has been counted.
    pub fn check(&self, message: &ChatMessage, message_count: usize) -> Option<TerminationReason> {
        if self.mentions_sentinel(message) {
            Some(TerminationReason::Sentinel)
        } else if message_count >= self.max_messages {
            Some(TerminationReason::MaxMessages)
        } else {
            None
        }
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            sentinel_folded: DEFAULT_SENTINEL.to_lowercase(),
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running {
        turn_index: usize,
        message_count: usize,
    },
    Terminated(TerminationReason),
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running {
                turn_index,
                message_count,
            } => write!(f, "running(turn={turn_index}, messages={message_count})"),
            RunState::Terminated(reason) => write!(f, "terminated({reason})"),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct TeamResult {
    pub reason: TerminationReason,
    pub message_count: usize,
    /// Seed task followed by every counted message.
    pub transcript: Vec<ChatMessage>,
}

impl TeamResult {
    /// The message that ended the run.
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.transcript.last()
    }
}

/// Fixed-order round-robin over participants.
pub struct RoundRobinChat {
    participants: Vec<Box<dyn Participant>>,
    termination: Termination,
    state: RunState,
}

impl RoundRobinChat {
    pub fn new(participants: Vec<Box<dyn Participant>>, termination: Termination) -> Result<Self> {
        if participants.is_empty() {
            bail!("A round-robin chat needs at least one participant");
        }
        Ok(Self {
            participants,
            termination,
            state: RunState::Running {
                turn_index: 0,
                message_count: 0,
            },
        })
    }

    pub fn participant_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name()).collect()
    }

    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run to a terminal state, reporting each counted message to `observer`.
    pub async fn run(
        &mut self,
        task: &str,
        observer: &mut (dyn FnMut(&ChatMessage) + Send),
    ) -> Result<TeamResult> {
        if let RunState::Terminated(reason) = self.state {
            bail!("This chat has already terminated ({reason})");
        }

        let mut transcript = vec![ChatMessage::text(TASK_SOURCE, task)];
        let mut turn_index = 0usize;
        let mut message_count = 0usize;
        let mut silent_turns = 0usize;
        let cycle = self.participants.len();

        tracing::info!(
            participants = ?self.participant_names(),
            sentinel = %self.termination.sentinel,
            max_messages = self.termination.max_messages,
            "Starting round-robin chat"
        );

        loop {
            self.state = RunState::Running {
                turn_index,
                message_count,
            };

            let participant = &mut self.participants[turn_index % cycle];
            let name = participant.name().to_string();
            tracing::debug!(agent = %name, turn = turn_index, "Turn start");

            let produced = match participant.take_turn(&transcript).await {
                Ok(produced) => produced,
                Err(e) => {
                    tracing::error!(
                        agent = %name,
                        turn = turn_index,
                        error = %e,
                        "Participant failed"
                    );
                    return Err(e.context(format!("{name} failed on turn {turn_index}")));
                }
            };

            if produced.is_empty() {
                silent_turns += 1;
                if silent_turns >= cycle {
                    bail!("Chat stalled: a full cycle of {cycle} turns produced no messages");
                }
            } else {
                silent_turns = 0;
            }

            for message in produced {
                message_count += 1;
                observer(&message);
                let verdict = self.termination.check(&message, message_count);
                transcript.push(message);

                if let Some(reason) = verdict {
                    self.state = RunState::Terminated(reason);
                    tracing::info!(
                        agent = %name,
                        messages = message_count,
                        %reason,
                        "Round-robin chat terminated"
                    );
                    return Ok(TeamResult {
                        reason,
                        message_count,
                        transcript,
                    });
                }
            }

            turn_index += 1;
        }
    }
}
