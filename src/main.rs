mod cli;

use agrorank::config::Config;
use agrorank::datasources::{AgmarknetClient, OpenMeteoClient};
use agrorank::logic::{CandidateCatalog, RecommendationRequest, RecommendationService};
use agrorank::models::{RecommendationReport, Season};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.clone()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Recommend {
            location,
            lat,
            lon,
            season,
            top,
            json,
            offline,
        } => {
            let catalog = load_catalog(&config)?;

            let (weather, market) = if offline {
                (None, None)
            } else {
                build_clients(&config)?
            };
            let service = RecommendationService::from_config(&config, catalog, weather, market);

            let mut request = RecommendationRequest::new(location)
                .with_top_n(top.unwrap_or(config.recommendations.top_n));
            if let (Some(lat), Some(lon)) = (lat, lon) {
                request = request.with_coordinates(lat, lon);
            }
            if let Some(season) = season {
                request = request.with_season(season);
            }

            let report = service.get_recommendations(&request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Catalog { season } => {
            let catalog = load_catalog(&config)?;
            print_catalog(&catalog, season);
        }
        Commands::Check => run_check(&config).await?,
    }

    Ok(())
}

fn load_catalog(config: &Config) -> Result<CandidateCatalog> {
    match config.catalog_path {
        Some(ref path) => CandidateCatalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => CandidateCatalog::builtin().context("Built-in catalog is invalid"),
    }
}

fn build_clients(config: &Config) -> Result<(Option<OpenMeteoClient>, Option<AgmarknetClient>)> {
    let weather = if config.weather.enabled {
        Some(OpenMeteoClient::new(config.weather.clone())?)
    } else {
        None
    };

    let market = if config.market_enabled() {
        Some(AgmarknetClient::new(config.market.clone())?)
    } else {
        if config.market.enabled {
            tracing::info!("Market API key not configured - market signals will be unavailable");
        }
        None
    };

    Ok((weather, market))
}

fn print_report(report: &RecommendationReport) {
    println!(
        "{} ({}, {} level) - {}",
        report.location, report.region_name, report.granularity, report.agro_zone
    );
    println!("Season: {}", report.season);
    println!(
        "Outlook: {} [{}]",
        report.outlook.narrative,
        report.outlook.source.as_str()
    );
    if !report.enrichment.fully_enriched() {
        let mut missing = Vec::new();
        if !report.enrichment.weather {
            missing.push("live weather");
        }
        if !report.enrichment.market {
            missing.push("market prices");
        }
        println!("Note: ranked without {}", missing.join(" and "));
    }
    println!();

    if report.is_empty() {
        println!("No crop is suitable for these conditions.");
        return;
    }

    for (rank, crop) in report.recommendations.iter().enumerate() {
        println!(
            "{:>2}. {} ({})  score {:.0}",
            rank + 1,
            crop.display_name,
            crop.localized_name,
            crop.score
        );
        println!(
            "    {} | {} water | {} days | est. profit ₹{:.0}/ha",
            crop.category,
            crop.water_requirement,
            crop.duration_days,
            crop.financials.profit_estimate
        );
        for reason in &crop.reasons {
            println!("    - {}", reason);
        }
    }
}

fn print_catalog(catalog: &CandidateCatalog, season: Option<Season>) {
    println!(
        "{:<12} {:<14} {:<10} {:<10} {:<9} {:>5} {:>8}",
        "ID", "NAME", "SEASON", "CATEGORY", "WATER", "DAYS", "MSP"
    );
    for crop in catalog
        .candidates()
        .iter()
        .filter(|c| season.map_or(true, |s| c.is_in_season(s)))
    {
        let msp = crop
            .msp_price
            .map(|p| format!("{:.0}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:<14} {:<10} {:<10} {:<9} {:>5} {:>8}",
            crop.id,
            crop.display_name,
            crop.season_tag.as_str(),
            crop.category.as_str(),
            crop.water_requirement.as_str(),
            crop.duration_days,
            msp
        );
    }
}

async fn run_check(config: &Config) -> Result<()> {
    println!("Configuration OK");

    let catalog = load_catalog(config)?;
    println!("Catalog: {} candidates", catalog.len());

    let (weather, market) = build_clients(config)?;

    match weather {
        Some(client) => {
            let ok = client.test_connection().await.unwrap_or(false);
            println!("Open-Meteo: {}", if ok { "OK" } else { "OFFLINE" });
        }
        None => println!("Open-Meteo: disabled"),
    }

    match market {
        Some(client) => {
            let ok = client.test_connection().await.unwrap_or(false);
            println!("Agmarknet: {}", if ok { "OK" } else { "OFFLINE" });
        }
        None => println!("Agmarknet: disabled"),
    }

    Ok(())
}
