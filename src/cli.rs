use agrorank::models::Season;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agrorank",
    version,
    about = "Explainable crop recommendations for Indian farms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank crops for a location
    Recommend {
        /// District, state or free-text place name
        location: String,

        /// Latitude for the weather lookup
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude for the weather lookup
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Season override (rabi, kharif, zaid, winter, monsoon, summer)
        #[arg(short, long, value_parser = parse_season)]
        season: Option<Season>,

        /// Number of recommendations to show
        #[arg(short, long)]
        top: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Skip live weather and market lookups
        #[arg(long)]
        offline: bool,
    },
    /// List the candidate catalog
    Catalog {
        /// Only candidates eligible in this season
        #[arg(short, long, value_parser = parse_season)]
        season: Option<Season>,
    },
    /// Validate config and test connections
    Check,
}

fn parse_season(s: &str) -> Result<Season, String> {
    Season::from_str(s).ok_or_else(|| {
        format!(
            "unknown season '{}' (expected rabi, kharif, zaid, winter, monsoon or summer)",
            s
        )
    })
}
