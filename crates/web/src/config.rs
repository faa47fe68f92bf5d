use anyhow::{Context, Result};
use storage::services::{ScoreWeights, ScoringConfig};

const DEFAULT_FIXTURES_PATH: &str = "fixtures/demo.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub fixtures_path: String,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            fixtures_path: std::env::var("FIXTURES_PATH")
                .unwrap_or_else(|_| DEFAULT_FIXTURES_PATH.to_string()),
            scoring: scoring_from_env()?,
        })
    }
}

fn scoring_from_env() -> Result<ScoringConfig> {
    let defaults = ScoreWeights::default();
    let weights = ScoreWeights::new(
        weight_var("SCORE_WEIGHT_ACCURACY", defaults.accuracy())?,
        weight_var("SCORE_WEIGHT_CONSISTENCY", defaults.consistency())?,
        weight_var("SCORE_WEIGHT_VOLUME", defaults.volume())?,
        weight_var("SCORE_WEIGHT_RECENCY", defaults.recency())?,
    )
    .context("Invalid SCORE_WEIGHT_* configuration")?;

    Ok(ScoringConfig::with_weights(weights))
}

fn weight_var(name: &str, default: f64) -> Result<f64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number", name)),
        Err(_) => Ok(default),
    }
}
