//! Feed store tests: appends, summaries, missing and malformed documents.
//!
//! Tests cover:
//! - Sequential appends keep call order and are counted by the summary
//! - Round trip of author/text with a well-formed timestamp
//! - Absent documents read as empty and are created on first append
//! - Unknown top-level keys survive a rewrite
//! - Writers that share no lock never leave a half-written document
//! - Malformed JSON is fatal to the store but not to viewers

use std::sync::Arc;

use chrono::Utc;
use socialfeed_bots::feed::{FeedDocument, FeedError, FeedSnapshot, FeedStore, LoadProblem};
use socialfeed_bots::view;

fn store_in(dir: &tempfile::TempDir) -> FeedStore {
    FeedStore::new(dir.path().join("site").join("feed.json"))
}

fn dir_entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn sequential_appends_keep_order_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    for i in 0..7 {
        store
            .append_post(&format!("agent{i}"), &format!("post {i}"))
            .await
            .unwrap();
    }

    let doc = store.read_document().await.unwrap();
    let authors: Vec<String> = doc.posts.iter().map(|p| p.author.clone()).collect();
    let expected: Vec<String> = (0..7).map(|i| format!("agent{i}")).collect();
    assert_eq!(authors, expected);

    let first = store.read_feed_summary().await.unwrap();
    let second = store.read_feed_summary().await.unwrap();
    assert_eq!(first, "Feed has 7 posts");
    assert_eq!(first, second, "reads without a write in between must agree");
}

#[tokio::test]
async fn round_trip_preserves_author_text_and_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let ack = store.append_post("TrendSetter", "Hello world").await.unwrap();
    assert_eq!(ack, "✅ Posted by TrendSetter: Hello world...");

    let doc = store.read_document().await.unwrap();
    let post = &doc.posts[0];
    assert_eq!(post.author, "TrendSetter");
    assert_eq!(post.text, "Hello world");
    let stamped = post.parsed_timestamp().expect("timestamp should be RFC 3339");
    assert!(stamped.with_timezone(&Utc) <= Utc::now());
}

#[tokio::test]
async fn absent_document_reads_as_zero_posts() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.read_feed_summary().await.unwrap(), "Feed has 0 posts");
    assert!(!store.path().exists(), "reading must not create the document");

    let snapshot = FeedSnapshot::load(store.path());
    assert_eq!(snapshot.len(), 0);
    assert_eq!(snapshot.problem, Some(LoadProblem::Missing));
}

#[tokio::test]
async fn empty_file_is_treated_as_empty_feed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.json");
    std::fs::write(&path, "").unwrap();
    let store = FeedStore::new(&path);

    store.append_post("LogicQA", "Checking facts").await.unwrap();
    assert_eq!(store.read_feed_summary().await.unwrap(), "Feed has 1 posts");
}

#[tokio::test]
async fn unknown_keys_survive_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.json");
    std::fs::write(&path, r#"{"title": "AI feed", "posts": []}"#).unwrap();
    let store = FeedStore::new(&path);

    store.append_post("NewsBreaker", "Breaking!").await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["title"], "AI feed");
    assert_eq!(raw["posts"][0]["text"], "Breaking!");
    assert_eq!(dir_entries(dir.path()), vec!["feed.json".to_string()]);
}

#[tokio::test]
async fn malformed_document_fails_store_but_not_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.json");
    std::fs::write(&path, "{\"posts\": [").unwrap();
    let store = FeedStore::new(&path);

    assert!(matches!(
        store.append_post("TrendSetter", "hi").await,
        Err(FeedError::Parse(_))
    ));
    assert!(matches!(store.read_feed_summary().await, Err(FeedError::Parse(_))));
    // The broken document is left as it was.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"posts\": [");

    let snapshot = FeedSnapshot::load(&path);
    assert!(snapshot.is_empty());
    assert!(matches!(snapshot.problem, Some(LoadProblem::Malformed(_))));
}

#[tokio::test]
async fn empty_author_or_text_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert!(matches!(
        store.append_post("", "text").await,
        Err(FeedError::EmptyField("author"))
    ));
    assert!(matches!(
        store.append_post("LogicQA", "   ").await,
        Err(FeedError::EmptyField("text"))
    ));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn concurrent_appends_in_one_process_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(store_in(&dir));

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.append_post("agent", &format!("post {i}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.read_feed_summary().await.unwrap(), "Feed has 20 posts");
}

#[tokio::test]
async fn separate_stores_never_leave_a_torn_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.json");
    // Two stores on one path stand in for two processes: no shared lock.
    let stores = [Arc::new(FeedStore::new(&path)), Arc::new(FeedStore::new(&path))];

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = Arc::clone(&stores[i % 2]);
        handles.push(tokio::spawn(async move {
            store.append_post("agent", &format!("post {i}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Posts may be lost between writers, but the document always parses.
    let raw = std::fs::read_to_string(&path).unwrap();
    let doc = FeedDocument::parse(&raw).unwrap();
    assert!(!doc.posts.is_empty());
    assert_eq!(dir_entries(dir.path()), vec!["feed.json".to_string()]);
}

#[tokio::test]
async fn cli_view_lists_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append_post("TrendSetter", "Hello world").await.unwrap();
    store.append_post("NewsBreaker", "Breaking!").await.unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["posts"][0]["author"], "TrendSetter");
    assert_eq!(doc["posts"][0]["text"], "Hello world");
    assert_eq!(doc["posts"][1]["author"], "NewsBreaker");
    assert_eq!(doc["posts"][1]["text"], "Breaking!");

    let first = view::render_listing(&FeedSnapshot::load(store.path()), store.path());
    let second = view::render_listing(&FeedSnapshot::load(store.path()), store.path());
    assert_eq!(first, second);

    let news = first.find("NewsBreaker").unwrap();
    let trend = first.find("TrendSetter").unwrap();
    assert!(news < trend, "newest post should be listed first");
}
