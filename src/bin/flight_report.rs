use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itinerary_analysis::{FileSource, ItineraryParser, RouteAnalyzer, RouteQuery};

#[derive(Debug, Parser)]
#[command(about = "Route analysis over two air-fare search responses")]
struct Args {
    /// First search response (the baseline when comparing)
    #[arg(long, default_value = "RS_ViaOW.xml")]
    file1: PathBuf,

    /// Second search response
    #[arg(long, default_value = "RS_Via-3.xml")]
    file2: PathBuf,

    #[arg(long, default_value = "DXB")]
    origin: String,

    #[arg(long, default_value = "BKK")]
    destination: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Itineraries on the route, per file
    Flights,
    Cheapest,
    Expensive,
    Fastest,
    Longest,
    /// Added, removed and modified routes between the two files
    Compare,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!(
        file1 = %args.file1.display(),
        file2 = %args.file2.display(),
        command = ?args.command,
        "starting"
    );

    let query = RouteQuery::new(args.origin, args.destination);
    let analyzer = RouteAnalyzer::load(
        &ItineraryParser::new(),
        &FileSource::new(args.file1),
        &FileSource::new(args.file2),
        &query,
    )
    .await?;

    let output = match args.command {
        Command::Flights => serde_json::to_string_pretty(&analyzer.filtered())?,
        Command::Cheapest => serde_json::to_string_pretty(&analyzer.cheapest())?,
        Command::Expensive => serde_json::to_string_pretty(&analyzer.most_expensive())?,
        Command::Fastest => serde_json::to_string_pretty(&analyzer.fastest())?,
        Command::Longest => serde_json::to_string_pretty(&analyzer.longest())?,
        Command::Compare => serde_json::to_string_pretty(&analyzer.compare())?,
    };
    println!("{}", output);
    Ok(())
}
