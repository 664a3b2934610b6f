use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use importer::batch::{BatchFile, BatchLoader};
use importer::catalog::{CatalogFile, CatalogLoader};
use importer::pipeline::RawPredictionProcessor;
use storage::Store;
use storage::dto::standings::StandingsScope;
use storage::repository::{RawPredictionRepository, SeasonRepository, TournamentRepository};
use storage::services::{scoring, standings};

#[derive(Parser)]
#[command(name = "ingest")]
#[command(about = "Prediction ingestion and standings runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog JSON: teams, seasons, tournaments, games and recorded
    /// outcomes.
    #[arg(long)]
    catalog: PathBuf,

    /// Harvested raw submissions JSON to ingest.
    #[arg(long)]
    raws: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ingest={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Store::new();

    tracing::info!("Loading catalog from: {}", cli.catalog.display());
    let catalog = CatalogFile::from_path(&cli.catalog)?;
    CatalogLoader::new(&store).load(&catalog)?;

    if let Some(raws_path) = &cli.raws {
        tracing::info!("Loading raw submissions from: {}", raws_path.display());
        let batch = BatchFile::from_path(raws_path)?;
        BatchLoader::new(&store).load(&batch)?;

        let report = RawPredictionProcessor::new(&store).process_all()?;
        tracing::info!(
            "Ingestion finished: {} of {} submissions became predictions",
            report.succeeded,
            report.total
        );
    }

    let seasons = SeasonRepository::new(&store);
    for season in seasons.list()? {
        scoring::score_season(&store, season.season_id)?;

        for tournament in
            TournamentRepository::new(&store).list_for_season(season.season_id, None)?
        {
            let rows = standings::standings_for(
                &store,
                &StandingsScope::Tournament(tournament.tournament_id),
            )?;
            if rows.is_empty() {
                continue;
            }

            println!("\n{} / {}", season.name, tournament.name);
            println!(
                "{:<4} {:<24} {:>5} {:>8} {:>4} {:>4} {:>4} {:>6}",
                "#", "Predictor", "Count", "Points", "W", "RU", "3rd", "Prize"
            );
            for (position, row) in rows.iter().enumerate() {
                println!(
                    "{:<4} {:<24} {:>5} {:>8.1} {:>4} {:>4} {:>4} {:>6}",
                    position + 1,
                    row.predictor_name,
                    row.count,
                    row.total_points,
                    row.winners,
                    row.runners_up,
                    row.third_places,
                    row.prize_winners
                );
            }
        }
    }

    let pending = RawPredictionRepository::new(&store).list_active()?;
    if !pending.is_empty() {
        tracing::warn!("{} raw submission(s) left unprocessed:", pending.len());
        for raw in pending {
            tracing::warn!("  {} / {}: {}", raw.name, raw.game, raw.note);
        }
    }

    Ok(())
}
