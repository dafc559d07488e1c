//! Plain-text feed listing for the terminal, newest first.

use std::fmt::Write as _;
use std::path::Path;

use crate::feed::{FeedSnapshot, LoadProblem};

const WIDTH: usize = 80;

/// Render the whole listing. Pure in `snapshot`, so repeated views match.
pub fn render_listing(snapshot: &FeedSnapshot, feed_path: &Path) -> String {
    let heavy = "=".repeat(WIDTH);
    let light = "─".repeat(WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "🤖 AI SOCIAL FEED - COMMAND LINE VIEWER");
    let _ = writeln!(out, "{heavy}");

    match &snapshot.problem {
        Some(LoadProblem::Missing) => {
            let _ = writeln!(out, "\n❌ Feed file not found: {}", feed_path.display());
            let _ = writeln!(out, "💡 Run `socialfeed` first to generate the feed!\n");
            return out;
        }
        Some(LoadProblem::Malformed(_)) => {
            let _ = writeln!(out, "\n❌ Invalid JSON in feed file: {}", feed_path.display());
            let _ = writeln!(out, "💡 The feed file may be corrupted. Check its contents.\n");
            return out;
        }
        Some(LoadProblem::Unreadable(reason)) => {
            let _ = writeln!(out, "\n❌ Error reading feed: {reason}\n");
            return out;
        }
        None => {}
    }

    if snapshot.is_empty() {
        let _ = writeln!(out, "\n📭 No posts yet. Run `socialfeed` to generate content!\n");
        return out;
    }

    let _ = writeln!(out, "\n📊 Total posts: {}\n", snapshot.len());
    let _ = writeln!(out, "{}", "-".repeat(WIDTH));

    for (position, post) in snapshot.newest_first() {
        let _ = writeln!(out, "\n#{} - 👤 {}", position + 1, post.author);
        let _ = writeln!(out, "{light}");
        let _ = writeln!(out, "{}", post.text);
        let _ = writeln!(out, "{light}");
    }

    let _ = writeln!(out, "\n{heavy}");
    let _ = writeln!(out, "✨ End of feed");
    let _ = writeln!(out, "{heavy}");
    out
}
