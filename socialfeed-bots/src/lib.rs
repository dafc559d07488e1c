//! socialfeed-bots: LLM agents that take turns posting to a shared social feed.
//!
//! Three fixed roles (TrendSetter, NewsBreaker, LogicQA) are driven round-robin
//! until one of them says the sentinel phrase or the message ceiling is hit.
//! The only durable state is the JSON feed document:
//! - `feed`: the document, its store, and read-only snapshots for viewers
//! - `tools`: the two feed tools agents can call
//! - `llm`: chat-completions client with tool calling
//! - `agents`: role factories and the LLM-backed participant
//! - `team`: the round-robin orchestrator and its termination rules

pub mod agents;
pub mod config;
pub mod feed;
pub mod llm;
pub mod logging;
pub mod output;
pub mod team;
pub mod tools;
pub mod view;
