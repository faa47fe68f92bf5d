use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fixtures::{FixtureValidator, load_file};
use serde::Serialize;
use storage::Database;
use storage::dto::leaderboard::LeaderboardParams;
use storage::services::{LeaderboardService, ScoreWeights, ScoringConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "callrank")]
#[command(about = "CallRank influencer leaderboard tooling", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    weights: WeightArgs,

    /// Evaluate time windows as of this instant instead of the current time
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Score weight overrides; unset weights keep the library defaults.
#[derive(clap::Args)]
struct WeightArgs {
    #[arg(long, env = "SCORE_WEIGHT_ACCURACY")]
    weight_accuracy: Option<f64>,

    #[arg(long, env = "SCORE_WEIGHT_CONSISTENCY")]
    weight_consistency: Option<f64>,

    #[arg(long, env = "SCORE_WEIGHT_VOLUME")]
    weight_volume: Option<f64>,

    #[arg(long, env = "SCORE_WEIGHT_RECENCY")]
    weight_recency: Option<f64>,
}

impl WeightArgs {
    fn scoring(&self) -> storage::Result<ScoringConfig> {
        let defaults = ScoreWeights::default();
        let weights = ScoreWeights::new(
            self.weight_accuracy.unwrap_or(defaults.accuracy()),
            self.weight_consistency.unwrap_or(defaults.consistency()),
            self.weight_volume.unwrap_or(defaults.volume()),
            self.weight_recency.unwrap_or(defaults.recency()),
        )?;

        Ok(ScoringConfig::with_weights(weights))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check a fixture file without scoring it
    Validate { file: PathBuf },
    /// Print one leaderboard page
    Leaderboard {
        file: PathBuf,

        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long)]
        order: Option<String>,

        #[arg(long)]
        time_range: Option<String>,

        #[arg(long)]
        min_predictions: Option<String>,

        #[arg(long)]
        page: Option<String>,

        #[arg(long)]
        page_size: Option<String>,
    },
    /// Print top performers, hottest streaks and biggest gainers
    Highlights {
        file: PathBuf,

        #[arg(long)]
        limit: Option<String>,
    },
    /// Print one influencer's profile
    Profile { file: PathBuf, id: Uuid },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "callrank={},fixtures={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let now = cli.now.unwrap_or_else(Utc::now);
    let scoring = cli.weights.scoring()?;

    match cli.command {
        Commands::Validate { file } => {
            let fixtures = load_file(&file).await?;
            let report = FixtureValidator::validate(&fixtures)?;
            report.log_warnings();
            tracing::info!(
                "✓ {} is valid ({} warning(s))",
                file.display(),
                report.warnings.len()
            );
        }
        Commands::Leaderboard {
            file,
            sort_by,
            order,
            time_range,
            min_predictions,
            page,
            page_size,
        } => {
            let db = open(&file, scoring, now).await?;
            let params = LeaderboardParams {
                sort_by,
                order,
                time_range,
                min_predictions,
                page,
                page_size,
            };
            print_json(&LeaderboardService::from_database(&db).leaderboard(&params, now))?;
        }
        Commands::Highlights { file, limit } => {
            let db = open(&file, scoring, now).await?;
            print_json(&LeaderboardService::from_database(&db).highlights(limit.as_deref(), now))?;
        }
        Commands::Profile { file, id } => {
            let db = open(&file, scoring, now).await?;
            print_json(&LeaderboardService::from_database(&db).profile(id, now)?)?;
        }
    }

    Ok(())
}

async fn open(
    file: &Path,
    scoring: ScoringConfig,
    now: DateTime<Utc>,
) -> Result<Database, Box<dyn std::error::Error>> {
    let db = load_file(file).await?.into_database(scoring, now)?;
    Ok(db)
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_default_to_library_values() {
        let cli = Cli::try_parse_from(["callrank", "validate", "demo.json"]).unwrap();

        let scoring = cli.weights.scoring().unwrap();

        assert_eq!(scoring.weights, ScoreWeights::default());
    }

    #[test]
    fn test_partial_override_must_still_sum_to_one() {
        let cli = Cli::try_parse_from([
            "callrank",
            "--weight-accuracy",
            "0.9",
            "validate",
            "demo.json",
        ])
        .unwrap();

        assert!(cli.weights.scoring().is_err());
    }

    #[test]
    fn test_full_override() {
        let cli = Cli::try_parse_from([
            "callrank",
            "--weight-accuracy",
            "0.7",
            "--weight-consistency",
            "0.1",
            "--weight-volume",
            "0.1",
            "--weight-recency",
            "0.1",
            "validate",
            "demo.json",
        ])
        .unwrap();

        let scoring = cli.weights.scoring().unwrap();

        assert_eq!(scoring.weights.accuracy(), 0.7);
    }
}
