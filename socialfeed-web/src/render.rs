//! Server-rendered dashboard page.

use std::fmt::Write;

use socialfeed_bots::feed::{FeedSnapshot, Post};

use crate::engagement::{comments_for, engagement_for, prediction_confidence};
use crate::profiles::{AGENT_PROFILES, MAIN_AGENTS, lookup, profile_for};

pub const EMPTY_FEED_TEXT: &str =
    "📭 No posts yet. Run the agents to start the AI agent conversation!";

/// Outcome banner shown above the feed after `POST /run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Finished { reason: String, messages: usize },
    Failed(String),
    AlreadyRunning,
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Finished { .. } => "notice ok",
            Notice::Failed(_) => "notice err",
            Notice::AlreadyRunning => "notice warn",
        }
    }

    fn text(&self) -> String {
        match self {
            Notice::Finished { reason, messages } => format!(
                "✅ Agents finished after {messages} messages ({reason}). New posts are below."
            ),
            Notice::Failed(reason) => format!("❌ Agent run failed: {reason}"),
            Notice::AlreadyRunning => {
                "⏳ A run is already in progress. Refresh in a moment.".to_string()
            }
        }
    }
}

pub struct Page<'a> {
    pub snapshot: &'a FeedSnapshot,
    pub notice: Option<Notice>,
    /// False when no API key is configured; the run button is disabled.
    pub can_run: bool,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(page: &Page<'_>) -> String {
    let sidebar = render_sidebar(page.snapshot.len());
    let notice = page
        .notice
        .as_ref()
        .map(|n| format!(r#"<div class="{}">{}</div>"#, n.class(), escape_html(&n.text())))
        .unwrap_or_default();
    let run_button = if page.can_run {
        r#"<button type="submit">🤖 Run agents</button>"#.to_string()
    } else {
        r#"<button type="submit" disabled title="Set OPENAI_API_KEY to enable">🤖 Run agents</button>"#
            .to_string()
    };
    let feed = render_feed(page.snapshot);

    format!(r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Social Network</title>
<style>
*{{box-sizing:border-box}}
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;background:#0f1419;color:#e7e9ea;display:flex}}
aside{{width:300px;padding:24px;border-right:1px solid #2f3336;min-height:100vh}}
main{{flex:1;max-width:720px;padding:24px}}
.post{{background:#16181c;border-radius:16px;padding:16px;margin:16px 0}}
.post header{{display:flex;gap:12px;align-items:center}}
.avatar{{font-size:32px}}
.handle,.caption{{color:#71767b;font-size:14px}}
.live{{margin-left:auto;font-size:12px}}
.text{{margin:12px 0;white-space:pre-wrap}}
.notice{{padding:12px;border-radius:8px;margin:12px 0}}
.ok{{background:#0f3d2e}}.err{{background:#4a1c1c}}.warn{{background:#4a3d1c}}
.metric{{margin:8px 0}}
</style>
</head>
<body>
{sidebar}
<main>
<h1>🌐 AI Agent's Social Feed</h1>
<p><strong>Real-time multi-agent conversations powered by next-token prediction</strong></p>
<form method="post" action="/run"><a href="/">🔄 Refresh Feed</a> {run_button}</form>
{notice}
<hr>
{feed}
</main>
</body>
</html>
"##)
}

fn render_sidebar(total_posts: usize) -> String {
    let mut agents = String::new();
    for profile in MAIN_AGENTS.iter().filter_map(|name| lookup(name)) {
        let _ = write!(
            agents,
            "<details><summary>{} {}</summary><p><strong>{}</strong></p><p class=\"caption\">{}</p><p><strong>Role:</strong> {}</p><p><strong>Status:</strong> 🟢 Active</p></details>\n",
            profile.avatar,
            escape_html(&profile.name),
            escape_html(&profile.handle),
            escape_html(&profile.bio),
            escape_html(&profile.role),
        );
    }
    format!(
        r#"<aside>
<h2>🤖 AI Social Network</h2>
<h3>Active AI Agents</h3>
{agents}<hr>
<h3>📊 Network Stats</h3>
<div class="metric">Total Posts: <strong>{total_posts}</strong></div>
<div class="metric">Active Agents: <strong>{active}</strong></div>
<div class="metric">Network Activity: <strong>🔥 High</strong></div>
<hr>
<p>💡 <strong>How it works:</strong> This feed is generated by a multi-agent AI system. Each agent has a specific role and takes turns in a round-robin conversation to create realistic social media posts.</p>
</aside>"#,
        active = AGENT_PROFILES.len(),
    )
}

fn render_feed(snapshot: &FeedSnapshot) -> String {
    if snapshot.is_empty() {
        return format!(r#"<p class="notice warn">{EMPTY_FEED_TEXT}</p>"#);
    }
    let total = snapshot.len();
    snapshot
        .newest_first()
        .map(|(position, post)| render_card(post, position, total))
        .collect()
}

/// One post card. `position` counts from the newest post.
pub fn render_card(post: &Post, position: usize, total: usize) -> String {
    let profile = profile_for(&post.author);
    let engagement = engagement_for(position);

    let mut comments = String::new();
    for comment in comments_for(position) {
        let _ = write!(
            comments,
            "<div class=\"comment\"><span class=\"avatar\">{}</span> <strong>{}</strong> <span class=\"handle\">{}</span><p class=\"caption\">{}</p></div>\n",
            comment.profile.avatar,
            escape_html(&comment.profile.name),
            escape_html(&comment.profile.handle),
            escape_html(comment.text),
        );
    }

    format!(
        r#"<article class="post" style="border-left:5px solid {color}">
<header><span class="avatar">{avatar}</span><div><strong>{name}</strong> <span class="handle">{handle}</span><div class="caption">{role} • Post #{number}</div></div><span class="live">🔴 LIVE</span></header>
<div class="text">{text}</div>
<div class="engagement">❤️ {likes} 🔄 {reposts}</div>
<details><summary>💬 Comment</summary>
{comments}<p><strong>Next Token Prediction:</strong> Based on the multi-agent workflow, LogicQA is likely to fact-check this post next, with a {confidence}% confidence score.</p>
</details>
</article>
"#,
        color = escape_html(&profile.color),
        avatar = profile.avatar,
        name = escape_html(&profile.name),
        handle = escape_html(&profile.handle),
        role = escape_html(&profile.role),
        number = total - position,
        text = escape_html(&post.text),
        likes = engagement.likes,
        reposts = engagement.reposts,
        confidence = prediction_confidence(position),
    )
}
