//! Look up a GitHub user, or resume the last lookup.
//!
//! The last query is kept under the platform data directory, so running
//! with no argument repeats the previous search. Set `GITHUB_TOKEN` for
//! higher rate limits and RUST_LOG=debug to watch the coordinator.
//!
//! Run with: cargo run --example lookup -p scout -- octocat

use std::sync::Arc;

use scout::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber (respects RUST_LOG env var).
    tracing_subscriber::fmt::init();

    let store = FsStore::in_data_dir("scout").ok_or("no data directory on this platform")?;
    let config = CoordinatorConfig {
        hydrate: false,
        ..CoordinatorConfig::default()
    };
    let coordinator = Arc::new(SearchCoordinator::new(
        GitHub::from_env(),
        Arc::new(store),
        config,
    ));

    match std::env::args().nth(1) {
        Some(login) => {
            coordinator.submit(&login).await;
        }
        None => match coordinator.hydrate().await {
            Some(handle) => {
                handle.await?;
            }
            None => {
                eprintln!("usage: lookup <username>  (no previous search to resume)");
                return Ok(());
            }
        },
    }

    match coordinator.state() {
        SearchState::Succeeded(profile) => {
            println!("{} (@{})", profile.display_name(), profile.login);
            if let Some(bio) = &profile.bio {
                println!("  {bio}");
            }
            println!(
                "  {} repos, {} followers, {} following",
                profile.public_repos, profile.followers, profile.following
            );
        }
        SearchState::Failed(message) => println!("{message}"),
        SearchState::Idle | SearchState::Searching(_) => println!("search did not finish"),
    }
    Ok(())
}
