//! Agent roles and their factories.
//!
//! Three fixed roles take turns in this order:
//! - TrendSetter: hype and emerging trends
//! - NewsBreaker: breaking-news reactions
//! - LogicQA: fact checks, and the one expected to close the run

mod assistant;
pub mod prompts;

use std::fmt;
use std::sync::Arc;

pub use assistant::LlmAgent;

use crate::feed::FeedStore;
use crate::llm::LlmClient;
use crate::team::Participant;
use crate::tools::ToolSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    TrendSetter,
    NewsBreaker,
    LogicQA,
}

impl Role {
    /// Turn order.
    pub const ALL: [Role; 3] = [Role::TrendSetter, Role::NewsBreaker, Role::LogicQA];

    pub fn name(self) -> &'static str {
        match self {
            Role::TrendSetter => "TrendSetter",
            Role::NewsBreaker => "NewsBreaker",
            Role::LogicQA => "LogicQA",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Role::TrendSetter => prompts::TRENDSETTER,
            Role::NewsBreaker => prompts::NEWSBREAKER,
            Role::LogicQA => prompts::LOGICQA,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name, prompt and tools of one participant. Fixed once built.
#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    pub name: String,
    pub system_prompt: String,
    pub tool_set: ToolSet,
}

impl AgentDescriptor {
    pub fn for_role(role: Role, tools: Option<ToolSet>) -> Self {
        Self {
            name: role.name().to_string(),
            system_prompt: role.system_prompt().to_string(),
            tool_set: tools.unwrap_or_else(ToolSet::empty),
        }
    }
}

/// Build the participant for `role`. `None` tools means no tools.
pub fn build(role: Role, client: Arc<LlmClient>, tools: Option<ToolSet>) -> LlmAgent {
    LlmAgent::new(AgentDescriptor::for_role(role, tools), client)
}

pub fn trend_setter(client: Arc<LlmClient>, tools: Option<ToolSet>) -> LlmAgent {
    build(Role::TrendSetter, client, tools)
}

pub fn news_breaker(client: Arc<LlmClient>, tools: Option<ToolSet>) -> LlmAgent {
    build(Role::NewsBreaker, client, tools)
}

pub fn logic_qa(client: Arc<LlmClient>, tools: Option<ToolSet>) -> LlmAgent {
    build(Role::LogicQA, client, tools)
}

/// All three roles, in turn order, each equipped with both feed tools.
pub fn standard_squad(client: Arc<LlmClient>, store: Arc<FeedStore>) -> Vec<Box<dyn Participant>> {
    Role::ALL
        .into_iter()
        .map(|role| {
            let agent = build(role, Arc::clone(&client), Some(ToolSet::feed(Arc::clone(&store))));
            Box::new(agent) as Box<dyn Participant>
        })
        .collect()
}
