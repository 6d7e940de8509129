//! Place a source and destinations, then submit them for optimization.
//!
//! Each point is placed the way a user would: arm the row, click the map,
//! wait for the address. The optimizer's redirect target is printed.
//!
//! Usage:
//!   cargo run -p floodroute-cli --bin plan_route -- \
//!       --source 121.0,14.55 --dest 121.02,14.56 --dest 121.05,14.6

use anyhow::{bail, Context, Result};
use clap::Parser;
use floodroute_cli::{init_tracing, log_notices, parse_point, ConsoleSurface};
use floodroute_core::{Coordinates, WaypointId};
use floodroute_planner::{Config, Planner};
use floodroute_sdk::{HttpPlannerApi, PlannerApi};

#[derive(Parser, Debug)]
#[command(author, version, about = "Submit a multi-stop route to the flood-aware optimizer")]
struct Args {
    /// Backend URL (defaults to FLOODROUTE_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Starting point as lon,lat
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    source: Coordinates,

    /// Destination as lon,lat (repeatable, visited in the optimizer's order)
    #[arg(long = "dest", value_parser = parse_point, allow_hyphen_values = true, required = true)]
    destinations: Vec<Coordinates>,
}

async fn place<A: PlannerApi>(
    planner: &Planner<A, ConsoleSurface>,
    id: WaypointId,
    at: Coordinates,
) -> Result<()> {
    planner.toggle_pick(id);
    let lookup = planner
        .on_map_click(at)
        .context("waypoint was not armed for placement")?;
    lookup.await?;
    planner.toggle_pick(id);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("floodroute_planner=info")?;
    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(url) = args.url {
        config.api_url = url;
    }

    let api = HttpPlannerApi::new(&config.api_url, config.http_timeout)?;
    let planner = Planner::new(api, ConsoleSurface::new(), &config);
    planner.on_map_ready();

    let notices = tokio::spawn(log_notices(planner.subscribe()));

    place(&planner, planner.source_id(), args.source).await?;
    for at in &args.destinations {
        let id = planner.add_destination();
        place(&planner, id, *at).await?;
    }

    planner.inspect(|state| {
        for waypoint in state.registry().all() {
            println!("{:>5}  {}", waypoint.id.to_string(), waypoint.label);
        }
    });

    let outcome = planner.submit().await;
    notices.abort();
    match outcome {
        Ok(target) => {
            println!("Route planned: {}", target);
            Ok(())
        }
        Err(e) => bail!("route planning failed: {}", e),
    }
}
