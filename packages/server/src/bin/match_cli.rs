//! Rank events for one volunteer from JSON files, without a server.
//!
//! ```text
//! match_cli --volunteer volunteer.json --events events.json [--top 3]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use volunteer_core::domains::events::Event;
use volunteer_core::domains::matching::{rank_events, MatchResult};
use volunteer_core::domains::profiles::VolunteerProfile;

#[derive(Parser)]
#[command(name = "match_cli")]
#[command(about = "Rank events for a volunteer by match score")]
struct Cli {
    /// Volunteer profile JSON (camelCase fields)
    #[arg(long)]
    volunteer: PathBuf,

    /// JSON array of events
    #[arg(long)]
    events: PathBuf,

    /// Only print the best N matches
    #[arg(long)]
    top: Option<usize>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load both files and rank, keeping at most `cli.top` results
fn ranked_matches(cli: &Cli) -> Result<Vec<MatchResult<Event>>> {
    let volunteer: VolunteerProfile = read_json(&cli.volunteer)?;
    let events: Vec<Event> = read_json(&cli.events)?;

    let mut ranked = rank_events(&volunteer, &events);
    if let Some(top) = cli.top {
        ranked.truncate(top);
    }
    Ok(ranked)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ranked = ranked_matches(&cli)?;
    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}
