//! Query the backend geocoder.
//!
//! Usage:
//!   cargo run -p floodroute-cli --bin geocode -- search "Quezon City"
//!   cargo run -p floodroute-cli --bin geocode -- reverse 121.0437,14.6760

use anyhow::Result;
use clap::{Parser, Subcommand};
use floodroute_cli::{init_tracing, parse_point};
use floodroute_core::Coordinates;
use floodroute_planner::Config;
use floodroute_sdk::{HttpPlannerApi, PlannerApi};

#[derive(Parser, Debug)]
#[command(author, version, about = "Forward and reverse geocoding against the planner backend")]
struct Args {
    /// Backend URL (defaults to FLOODROUTE_API_URL)
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find places matching a free-text query
    Search { query: String },
    /// Resolve the address of a lon,lat point
    Reverse {
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        point: Coordinates,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("floodroute_sdk=info")?;
    let args = Args::parse();
    let config = Config::from_env();
    let url = args.url.unwrap_or(config.api_url);
    let api = HttpPlannerApi::new(&url, config.http_timeout)?;

    match args.command {
        Command::Search { query } => {
            let query = query.trim();
            if query.is_empty() {
                println!("Empty query, nothing to search.");
                return Ok(());
            }
            let hits = api.search(query).await?;
            if hits.is_empty() {
                println!("No results for '{}'", query);
            }
            for (i, hit) in hits.iter().enumerate() {
                println!(
                    "{:>2}. {} ({:.6}, {:.6})",
                    i + 1,
                    hit.display_name,
                    hit.lat,
                    hit.lon
                );
            }
        }
        Command::Reverse { point } => match api.reverse_search(point).await? {
            Some(name) => println!("{}", name),
            None => println!("{}", point.label()),
        },
    }

    Ok(())
}
