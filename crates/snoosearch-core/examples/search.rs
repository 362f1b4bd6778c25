//! Runs a live search and prints the extracted records
//!
//! Run with: cargo run --example search -p snoosearch-core -- "rust async" [sr]

use snoosearch_core::{ClientConfig, MixedResult, RedditScraper, SearchQuery};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "rust".to_string());
    let filter = args.next().unwrap_or_default();

    let scraper = RedditScraper::with_config(ClientConfig::from_env())?;
    let query = SearchQuery {
        content_type_filter: filter,
        ..SearchQuery::posts(text)
    };

    println!("Searching for '{}'...\n", query.text);

    let results = scraper.search(&query).await?;

    if results.is_empty() {
        println!("No results found!");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        match result {
            MixedResult::Community(community) => println!("{}. r/{}", i + 1, community.name),
            MixedResult::Post { post, published_at } => {
                println!("{}. [{:?}] {}", i + 1, post.kind, post.title);
                println!(
                    "   r/{} by {} ({})",
                    post.subreddit, post.author, post.vote_count_text
                );
                println!(
                    "   {} comments: {}",
                    post.comments_count_text, post.comments_url
                );
                println!("   Media: {}", post.media_url);
                if let Some(thumbnail) = &post.thumbnail_url {
                    println!("   Thumbnail: {}", thumbnail);
                }
                if let Some(date) = published_at {
                    println!("   Posted: {}", date);
                }
                println!();
            }
        }
    }

    Ok(())
}
