//! Console progress for a command-line run.
//!
//! Formatting is kept separate from printing so it can be tested.

use std::path::Path;

use crate::team::{ChatMessage, MessageBody, TeamResult};

const RULE_WIDTH: usize = 80;
/// Characters of message content shown per message.
const MAX_SHOWN_CHARS: usize = 800;
const TOOL_ACTIVITY: &str = "[Social Feed Post Action Completed]";

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n{title}\n{rule}")
}

/// Content as shown on the console; tool activity is summarised.
pub fn display_content(message: &ChatMessage) -> String {
    match &message.body {
        MessageBody::Text(text) => text.trim().chars().take(MAX_SHOWN_CHARS).collect(),
        MessageBody::ToolCalls(_) => TOOL_ACTIVITY.to_string(),
    }
}

pub fn format_message(message: &ChatMessage) -> String {
    format!(
        "\n👤 [{}]\n{}\n{}",
        message.source.to_uppercase(),
        "-".repeat(20),
        display_content(message)
    )
}

/// A participant announcing it is done. Tool activity never counts.
pub fn handoff_line(message: &ChatMessage) -> Option<String> {
    message
        .as_text()
        .is_some_and(|text| text.to_uppercase().contains("COMPLETE"))
        .then(|| format!("\n✅ HANDOFF: {} is done.", message.source.to_uppercase()))
}

pub fn print_message(message: &ChatMessage) {
    println!("{}", format_message(message));
    if let Some(line) = handoff_line(message) {
        println!("{line}");
    }
}

pub fn summary(result: &TeamResult, feed_path: &Path) -> String {
    let body = format!(
        "✨ WORKFLOW FINISHED after {} messages ({})! Check {} and run `view-feed` or the dashboard",
        result.message_count,
        result.reason,
        feed_path.display()
    );
    banner(&body)
}
