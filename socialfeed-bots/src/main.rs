//! socialfeed: run the agent squad once, to completion.
//!
//! TrendSetter, NewsBreaker and LogicQA take turns posting to the feed
//! document until one of them says the sentinel phrase or the message
//! ceiling is reached. Progress is printed to stdout.
//!
//! Requires OPENAI_API_KEY (or --api-key).

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use socialfeed_bots::agents::{self, prompts};
use socialfeed_bots::config::Settings;
use socialfeed_bots::output;
use socialfeed_bots::team::{DEFAULT_MAX_MESSAGES, DEFAULT_SENTINEL, RoundRobinChat, Termination};

#[derive(Parser)]
#[command(name = "socialfeed", about = "Run the AI social agents once")]
struct Args {
    #[command(flatten)]
    settings: Settings,

    /// Stop after this many agent messages
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGES)]
    max_messages: usize,

    /// Phrase that ends the run when any agent says it
    #[arg(long, default_value = DEFAULT_SENTINEL)]
    sentinel: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    socialfeed_bots::logging::init("socialfeed_bots=info")?;
    let args = Args::parse();
    let settings = &args.settings;

    println!(
        "{}",
        output::banner("🤖 AI SOCIAL AGENT BOT: Automated Social Feed Generation")
    );

    let termination = Termination::new(&args.sentinel, args.max_messages)?;
    let client = settings.model.client()?;
    let store = Arc::new(settings.feed.store());

    tracing::info!(
        model = %settings.model.model,
        feed = %store.path().display(),
        "Starting socialfeed run"
    );

    println!("🛠️  Equipping agents with tools...");
    let squad = agents::standard_squad(client, Arc::clone(&store));
    let mut chat = RoundRobinChat::new(squad, termination)?;

    let mission = prompts::mission(&args.sentinel);
    println!("🎯 MISSION: {mission}\n");
    println!("🔄 Starting agent workflow...\n");

    let result = chat.run(&mission, &mut output::print_message).await?;

    println!("{}", output::summary(&result, store.path()));
    Ok(())
}
