//! view-feed: print the social feed in the terminal, newest first.
//!
//! Read-only. A missing or corrupt feed file is reported, not fatal.

use clap::Parser;

use socialfeed_bots::config::FeedSettings;
use socialfeed_bots::feed::FeedSnapshot;
use socialfeed_bots::view;

#[derive(Parser)]
#[command(name = "view-feed", about = "Print the AI social feed")]
struct Args {
    #[command(flatten)]
    feed: FeedSettings,
}

fn main() -> anyhow::Result<()> {
    socialfeed_bots::logging::init("socialfeed_bots=warn")?;
    let args = Args::parse();

    let snapshot = FeedSnapshot::load(&args.feed.feed_path);
    if let Some(problem) = &snapshot.problem {
        tracing::debug!(?problem, path = %args.feed.feed_path.display(), "Feed not viewable");
    }
    print!("{}", view::render_listing(&snapshot, &args.feed.feed_path));
    Ok(())
}
