//! Recovers title and author for a permalink twice; the second call is a cache hit
//!
//! Run with: cargo run --example permalink -p snoosearch-core -- <permalink>

use std::time::Instant;

use snoosearch_core::{ClientConfig, RedditScraper};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let permalink = std::env::args().nth(1).ok_or("usage: permalink <url>")?;

    let scraper = RedditScraper::with_config(ClientConfig::from_env())?;

    for attempt in 1..=2 {
        let start = Instant::now();
        match scraper.scrape_permalink(&permalink).await {
            Ok(post) => println!(
                "#{} \"{}\" by {} ({:?})",
                attempt,
                post.title,
                post.author,
                start.elapsed()
            ),
            Err(e) => {
                println!("#{} failed: {}", attempt, e);
                break;
            }
        }
    }

    Ok(())
}
