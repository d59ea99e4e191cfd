//! CLI tool to find the aircraft closest to a position.
//!
//! Queries OpenSky directly, without going through the HTTP backend.

use anyhow::Context;
use clap::Parser;
use std::time::Duration;

use vcompass_cli::{describe, describe_with_distance, observer};
use vcompass_core::{compute_bounding_box, find_nearest, rank_by_distance};
use vcompass_opensky::{OpenSkyClient, OpenSkyConfig, DEFAULT_BASE_URL};

/// Show the aircraft nearest to a position (or all aircraft around it)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,

    /// Observer altitude in meters
    #[arg(long, default_value_t = 0.0)]
    alt: f64,

    /// Search radius in kilometers
    #[arg(long, default_value_t = 111.0)]
    radius_km: f64,

    /// OpenSky API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    opensky_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// List every aircraft in range, closest first
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (center, altitude_m) = observer(args.lat, args.lon, args.alt)?;
    let bbox = compute_bounding_box(&center, args.radius_km)?;

    let client = OpenSkyClient::new(OpenSkyConfig {
        base_url: args.opensky_url.clone(),
        timeout: Duration::from_secs(args.timeout.max(1)),
        ..OpenSkyConfig::default()
    })?;

    println!(
        "Querying {} for lat {:.3}..{:.3}, lon {:.3}..{:.3}",
        client.base_url(),
        bbox.lat_min,
        bbox.lat_max,
        bbox.lon_min,
        bbox.lon_max
    );
    let snapshot = client
        .aircraft_in(&bbox)
        .await
        .context("Could not fetch data from OpenSky Network")?;

    if args.all {
        let ranked = rank_by_distance(&center, altitude_m, &snapshot.aircraft);
        if ranked.is_empty() {
            println!("No aircraft found");
        }
        for entry in ranked {
            println!("{}", describe_with_distance(entry.aircraft, entry.distance_m));
        }
        return Ok(());
    }

    match find_nearest(&center, altitude_m, &snapshot.aircraft) {
        Some(nearest) => {
            println!("Nearest of {} aircraft:", snapshot.aircraft.len());
            println!("{}", describe(nearest.aircraft));
            println!("Distance: {:.1} km", nearest.distance_m / 1000.0);
        }
        None => println!("No aircraft found"),
    }

    Ok(())
}
