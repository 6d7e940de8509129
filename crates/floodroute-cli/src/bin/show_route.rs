//! Render a route GeoJSON document on a headless map and print its summary.
//!
//! Usage:
//!   cargo run -p floodroute-cli --bin show_route -- route.geojson

use anyhow::{Context, Result};
use clap::Parser;
use floodroute_cli::{init_tracing, render_results, ConsoleSurface};
use floodroute_core::RouteResult;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Draw an optimized route and print distance and duration")]
struct Args {
    /// FeatureCollection whose first feature is the route
    path: PathBuf,
}

fn main() -> Result<()> {
    init_tracing("floodroute_core=debug")?;
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let route = RouteResult::from_geojson_str(&text)?;

    let mut surface = ConsoleSurface::new();
    let (renderer, summary) = render_results(&mut surface, route);
    let summary = summary.context("route was not rendered")?;

    println!("Hazard layers: {}", surface.recorded().fill_layers.len());
    println!("{}", summary.distance_text());
    println!("{}", summary.duration_text());
    match renderer.bounds() {
        Some(bounds) => println!(
            "Bounds: [{:.6}, {:.6}] - [{:.6}, {:.6}]",
            bounds.min.lon, bounds.min.lat, bounds.max.lon, bounds.max.lat
        ),
        None => println!("Route has no drawable points"),
    }

    Ok(())
}
