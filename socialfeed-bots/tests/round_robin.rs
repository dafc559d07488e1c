//! Round-robin orchestrator tests with scripted participants.
//!
//! Tests cover:
//! - Fixed turn order and message counting across turns
//! - Sentinel termination mid-cycle, before the ceiling
//! - Ceiling termination exactly at the limit
//! - Checks after every message, not only at turn boundaries
//! - Fail-fast on participant errors and stalled cycles
//! - Tool side effects sequenced before the next participant's turn

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;

use socialfeed_bots::feed::FeedStore;
use socialfeed_bots::team::{
    ChatMessage, Participant, RoundRobinChat, RunState, TASK_SOURCE, Termination,
    TerminationReason, ToolExecution,
};
use socialfeed_bots::tools::{ToolCall, ToolSet};

type TurnLog = Arc<Mutex<Vec<(String, usize)>>>;

/// Replays canned turns; once the script runs out it keeps saying "ok".
struct Scripted {
    name: String,
    turns: VecDeque<Vec<String>>,
    log: TurnLog,
}

impl Scripted {
    fn new(name: &str, turns: &[&[&str]], log: &TurnLog) -> Box<dyn Participant> {
        Box::new(Self {
            name: name.to_string(),
            turns: turns
                .iter()
                .map(|t| t.iter().map(|s| s.to_string()).collect())
                .collect(),
            log: Arc::clone(log),
        })
    }
}

#[async_trait]
impl Participant for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    async fn take_turn(&mut self, transcript: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        self.log
            .lock()
            .unwrap()
            .push((self.name.clone(), transcript.len()));
        let texts = self
            .turns
            .pop_front()
            .unwrap_or_else(|| vec!["ok".to_string()]);
        Ok(texts
            .into_iter()
            .map(|t| ChatMessage::text(&self.name, t))
            .collect())
    }
}

struct Failing;

#[async_trait]
impl Participant for Failing {
    fn name(&self) -> &str {
        "Broken"
    }

    async fn take_turn(&mut self, _transcript: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        bail!("model returned garbage")
    }
}

struct Silent;

#[async_trait]
impl Participant for Silent {
    fn name(&self) -> &str {
        "Silent"
    }

    async fn take_turn(&mut self, _transcript: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        Ok(Vec::new())
    }
}

/// Posts once per turn through a real tool set.
struct Poster {
    name: String,
    tools: ToolSet,
}

#[async_trait]
impl Participant for Poster {
    fn name(&self) -> &str {
        &self.name
    }

    async fn take_turn(&mut self, transcript: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
        let call = ToolCall::PostToSite {
            author: self.name.clone(),
            text: format!("post at transcript length {}", transcript.len()),
        };
        let result = self.tools.call(&call).await?;
        Ok(vec![ChatMessage::tool_calls(
            &self.name,
            vec![ToolExecution { call, result }],
        )])
    }
}

fn new_log() -> TurnLog {
    Arc::new(Mutex::new(Vec::new()))
}

#[tokio::test]
async fn sentinel_on_message_five_stops_the_run() {
    let log = new_log();
    // Two messages per turn: A=1,2  B=3,4  C=5 (sentinel), 6 discarded.
    let squad = vec![
        Scripted::new("TrendSetter", &[&["a1", "a2"]], &log),
        Scripted::new("NewsBreaker", &[&["b1", "b2"]], &log),
        Scripted::new("LogicQA", &[&["done: Workflow_Complete", "after"]], &log),
    ];
    let mut chat =
        RoundRobinChat::new(squad, Termination::new("WORKFLOW_COMPLETE", 9).unwrap()).unwrap();

    let mut seen = Vec::new();
    let result = chat
        .run("seed task", &mut |m: &ChatMessage| seen.push(m.source.clone()))
        .await
        .unwrap();

    assert_eq!(result.reason, TerminationReason::Sentinel);
    assert_eq!(result.message_count, 5);
    assert_eq!(seen.len(), 5);
    assert_eq!(result.last_message().unwrap().source, "LogicQA");
    // Seed plus five counted messages.
    assert_eq!(result.transcript.len(), 6);
    assert_eq!(result.transcript[0].source, TASK_SOURCE);
    assert_eq!(chat.state(), RunState::Terminated(TerminationReason::Sentinel));
}

#[tokio::test]
async fn ceiling_stops_exactly_at_nine() {
    let log = new_log();
    let squad = vec![
        Scripted::new("TrendSetter", &[], &log),
        Scripted::new("NewsBreaker", &[], &log),
        Scripted::new("LogicQA", &[], &log),
    ];
    let mut chat =
        RoundRobinChat::new(squad, Termination::new("WORKFLOW_COMPLETE", 9).unwrap()).unwrap();

    let result = chat.run("seed", &mut |_m: &ChatMessage| {}).await.unwrap();

    assert_eq!(result.reason, TerminationReason::MaxMessages);
    assert_eq!(result.message_count, 9);

    let turns = log.lock().unwrap();
    let order: Vec<&str> = turns.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(order, ["TrendSetter", "NewsBreaker", "LogicQA"].repeat(3));
}

#[tokio::test]
async fn ceiling_is_checked_inside_a_turn() {
    let log = new_log();
    let squad = vec![
        Scripted::new("A", &[&["1", "2", "3", "4"]], &log),
        Scripted::new("B", &[], &log),
    ];
    let mut chat = RoundRobinChat::new(squad, Termination::new("STOP", 3).unwrap()).unwrap();

    let result = chat.run("seed", &mut |_m: &ChatMessage| {}).await.unwrap();

    assert_eq!(result.reason, TerminationReason::MaxMessages);
    assert_eq!(result.message_count, 3);
    assert_eq!(log.lock().unwrap().len(), 1, "B never gets a turn");
}

#[tokio::test]
async fn every_participant_sees_the_growing_transcript() {
    let log = new_log();
    let squad = vec![
        Scripted::new("A", &[], &log),
        Scripted::new("B", &[], &log),
        Scripted::new("C", &[], &log),
    ];
    let mut chat = RoundRobinChat::new(squad, Termination::new("STOP", 4).unwrap()).unwrap();
    chat.run("seed", &mut |_m: &ChatMessage| {}).await.unwrap();

    let lens: Vec<usize> = log.lock().unwrap().iter().map(|(_, len)| *len).collect();
    assert_eq!(lens, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn seed_task_mentioning_sentinel_does_not_end_the_run() {
    let log = new_log();
    let squad = vec![Scripted::new("A", &[], &log)];
    let termination = Termination::new("WORKFLOW_COMPLETE", 2).unwrap();
    let mut chat = RoundRobinChat::new(squad, termination).unwrap();

    let result = chat
        .run("say WORKFLOW_COMPLETE when done", &mut |_m: &ChatMessage| {})
        .await
        .unwrap();
    assert_eq!(result.reason, TerminationReason::MaxMessages);
    assert_eq!(result.message_count, 2);
}

#[tokio::test]
async fn participant_error_aborts_the_run() {
    let log = new_log();
    let squad = vec![Scripted::new("A", &[], &log), Box::new(Failing) as Box<dyn Participant>];
    let mut chat = RoundRobinChat::new(squad, Termination::default()).unwrap();

    let mut count = 0;
    let err = chat
        .run("seed", &mut |_m: &ChatMessage| count += 1)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("model returned garbage"));
    assert_eq!(count, 1);
}

#[tokio::test]
async fn silent_cycle_is_an_error() {
    let squad: Vec<Box<dyn Participant>> = vec![Box::new(Silent), Box::new(Silent)];
    let mut chat = RoundRobinChat::new(squad, Termination::default()).unwrap();
    let err = chat.run("seed", &mut |_m: &ChatMessage| {}).await.unwrap_err();
    assert!(err.to_string().contains("stalled"));
}

#[tokio::test]
async fn terminated_chat_cannot_run_again() {
    let log = new_log();
    let squad = vec![Scripted::new("A", &[], &log)];
    let mut chat = RoundRobinChat::new(squad, Termination::new("STOP", 1).unwrap()).unwrap();
    chat.run("seed", &mut |_m: &ChatMessage| {}).await.unwrap();
    assert!(chat.run("seed", &mut |_m: &ChatMessage| {}).await.is_err());
}

#[tokio::test]
async fn tool_posts_land_in_turn_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FeedStore::new(dir.path().join("feed.json")));
    let squad: Vec<Box<dyn Participant>> = ["TrendSetter", "NewsBreaker", "LogicQA"]
        .into_iter()
        .map(|name| {
            Box::new(Poster {
                name: name.to_string(),
                tools: ToolSet::feed(Arc::clone(&store)),
            }) as Box<dyn Participant>
        })
        .collect();
    let mut chat = RoundRobinChat::new(squad, Termination::new("STOP", 6).unwrap()).unwrap();

    let result = chat.run("seed", &mut |_m: &ChatMessage| {}).await.unwrap();
    assert_eq!(result.message_count, 6);

    let doc = store.read_document().await.unwrap();
    let authors: Vec<&str> = doc.posts.iter().map(|p| p.author.as_str()).collect();
    assert_eq!(
        authors,
        vec!["TrendSetter", "NewsBreaker", "LogicQA", "TrendSetter", "NewsBreaker", "LogicQA"]
    );
    assert_eq!(doc.posts[3].text, "post at transcript length 4");
}
