use transit_planner::config::PlannerConfig;
use transit_planner::module::popularity::PopularityClient;
use transit_planner::module::renderer::{OutputFormat, TransitRenderer};
use transit_planner::module::transit::TransitTableClient;
use transit_planner::TransitPlanner;

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "transit-planner", version, about = "Rank observable exoplanet transits, least-observed first")]
struct Args {
    /// Path to the TOML configuration
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Year for the day/month printed in the transit table
    #[arg(long)]
    year: Option<i32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = PlannerConfig::from_file(&args.config)?;

    // Initialize logging
    let _logging_guard = transit_planner::logging::init_logging(
        &config.log_dir,
        "transit-planner",
        &config.log_level,
    )?;

    let reference_year = args
        .year
        .or(config.reference_year)
        .unwrap_or_else(|| Utc::now().year());
    tracing::info!("Transit planner starting (reference year {})", reference_year);

    let planner = TransitPlanner::new(
        TransitTableClient::new(config.transit_service.clone())?,
        PopularityClient::new(config.popularity_service.clone())?,
        config.filter_thresholds()?,
        reference_year,
    );

    let ranked = planner.run().await?;

    let renderer = TransitRenderer::new(config.output_offset()?);
    renderer.render(args.format, &ranked, std::io::stdout().lock())?;

    Ok(())
}
