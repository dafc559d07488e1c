//! The shared feed document.
//!
//! A single JSON file, `{"posts": [...]}`, appended to by agents and read by
//! the viewers. Insertion order is chronological order.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::Mutex;

/// Characters of post text echoed back in the append acknowledgment.
pub const ACK_PREVIEW_CHARS: usize = 50;

/// One authored, timestamped entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default = "unknown_author")]
    pub author: String,
    #[serde(default)]
    pub text: String,
    /// ISO-8601. Kept as written so documents from other writers stay readable.
    #[serde(default)]
    pub timestamp: String,
}

fn unknown_author() -> String {
    "Unknown".to_string()
}

impl Post {
    fn now(author: &str, text: &str) -> Self {
        Self {
            author: author.to_string(),
            text: text.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Parse the timestamp, if it carries an offset.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

/// The whole document. Unknown top-level keys survive a rewrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedDocument {
    /// `"posts": null` reads as an empty feed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub posts: Vec<Post>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Post>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Post>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FeedDocument {
    /// Parse document text. Empty (or whitespace-only) text is an empty feed.
    pub fn parse(raw: &str) -> Result<Self, FeedError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(FeedError::Parse)
    }

    /// Posts newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().rev()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("feed document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize feed document: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

impl FeedError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        FeedError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read-write access to the feed document at a fixed path.
///
/// Appends from this process are serialized. Nothing guards against a second
/// process writing the same file; the later rename wins.
#[derive(Debug)]
pub struct FeedStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a post and return a short acknowledgment.
    pub async fn append_post(&self, author: &str, text: &str) -> Result<String, FeedError> {
        if author.trim().is_empty() {
            return Err(FeedError::EmptyField("author"));
        }
        if text.trim().is_empty() {
            return Err(FeedError::EmptyField("text"));
        }

        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.posts.push(Post::now(author, text));
        self.write_document(&doc).await?;

        tracing::debug!(
            author,
            posts = doc.posts.len(),
            path = %self.path.display(),
            "Appended post"
        );
        Ok(acknowledgment(author, text))
    }

    /// Post count as a sentence. A missing document has zero posts.
    pub async fn read_feed_summary(&self) -> Result<String, FeedError> {
        let doc = self.read_document().await?;
        Ok(format!("Feed has {} posts", doc.posts.len()))
    }

    /// Load the current document; missing or empty files are an empty feed.
    pub async fn read_document(&self) -> Result<FeedDocument, FeedError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => FeedDocument::parse(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FeedDocument::default()),
            Err(e) => Err(FeedError::io(&self.path, e)),
        }
    }

    /// Replace the document via a uniquely named sibling temp file, synced
    /// to disk, then renamed over the original.
    async fn write_document(&self, doc: &FeedDocument) -> Result<(), FeedError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| FeedError::io(&dir, e))?;

        let mut body = serde_json::to_string_pretty(doc).map_err(FeedError::Serialize)?;
        body.push('\n');

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&dir, &path, body.as_bytes()))
            .await
            .map_err(|e| FeedError::io(&self.path, std::io::Error::other(e)))?
    }
}

fn replace_file(dir: &Path, path: &Path, body: &[u8]) -> Result<(), FeedError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| FeedError::io(dir, e))?;
    tmp.write_all(body).map_err(|e| FeedError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| FeedError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| FeedError::io(path, e.error))?;
    Ok(())
}

fn acknowledgment(author: &str, text: &str) -> String {
    let preview: String = text.chars().take(ACK_PREVIEW_CHARS).collect();
    format!("✅ Posted by {author}: {preview}...")
}

/// Why a viewer could not show the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadProblem {
    Missing,
    Malformed(String),
    Unreadable(String),
}

/// What a viewer sees: the posts, plus why there may be none.
///
/// Loading never fails; problems degrade to an empty feed.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub posts: Vec<Post>,
    pub problem: Option<LoadProblem>,
}

impl FeedSnapshot {
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_raw(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self {
                posts: Vec::new(),
                problem: Some(LoadProblem::Missing),
            },
            Err(e) => Self {
                posts: Vec::new(),
                problem: Some(LoadProblem::Unreadable(e.to_string())),
            },
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match FeedDocument::parse(raw) {
            Ok(doc) => Self {
                posts: doc.posts,
                problem: None,
            },
            Err(e) => Self {
                posts: Vec::new(),
                problem: Some(LoadProblem::Malformed(e.to_string())),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts newest first, each with its position in that order (0 = newest).
    pub fn newest_first(&self) -> impl Iterator<Item = (usize, &Post)> {
        self.posts.iter().rev().enumerate()
    }
}
