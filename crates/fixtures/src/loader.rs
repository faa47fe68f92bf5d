use std::path::Path;

use chrono::{DateTime, Utc};
use storage::Database;
use storage::models::{Influencer, Prediction};
use storage::services::ScoringConfig;

use crate::Result;
use crate::models::FixtureSet;
use crate::validator::FixtureValidator;

pub async fn load_file(path: impl AsRef<Path>) -> Result<FixtureSet> {
    let path = path.as_ref();
    tracing::info!("Loading fixtures from: {}", path.display());

    let json_content = tokio::fs::read_to_string(path).await?;
    let fixtures: FixtureSet = serde_json::from_str(&json_content)?;

    tracing::info!(
        "Loaded {} influencers and {} predictions (v{})",
        fixtures.influencers.len(),
        fixtures.predictions.len(),
        fixtures.format_version
    );

    Ok(fixtures)
}

impl FixtureSet {
    /// Validates the set and builds a fully scored database from it.
    pub fn into_database(self, scoring: ScoringConfig, now: DateTime<Utc>) -> Result<Database> {
        let report = FixtureValidator::validate(&self)?;
        report.log_warnings();

        let influencers: Vec<Influencer> = self.influencers.into_iter().map(Into::into).collect();
        let predictions: Vec<Prediction> = self.predictions.into_iter().map(Into::into).collect();

        let db = Database::new(influencers, predictions, scoring)?;
        db.rescore_all(now);

        Ok(db)
    }
}

/// Reads, validates and scores a fixture file in one step.
pub async fn load_database(
    path: impl AsRef<Path>,
    scoring: ScoringConfig,
    now: DateTime<Utc>,
) -> Result<Database> {
    load_file(path).await?.into_database(scoring, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixtureError;
    use std::io::Write;
    use storage::repository::{InfluencerStore, PredictionStore};

    const SAMPLE: &str = r#"{
        "formatVersion": "1.0.0",
        "influencers": [
            {
                "id": "7d3c1b1e-1f2a-4c59-9a0e-3b7c2b8f0a11",
                "platform": "twitter",
                "handle": "satoshi_calls",
                "displayName": "Satoshi Calls",
                "followers": 120000,
                "verified": true
            },
            {
                "id": "0b6f4e2a-5c1d-4e8b-8f3a-9d2c7e1a4b22",
                "platform": "youtube",
                "handle": "moonboy",
                "displayName": "Moon Boy",
                "followers": 45000
            }
        ],
        "predictions": [
            {
                "id": "a1000000-0000-4000-8000-000000000001",
                "influencerId": "7d3c1b1e-1f2a-4c59-9a0e-3b7c2b8f0a11",
                "coinSymbol": "btc",
                "direction": "bullish",
                "predictedAt": "2024-05-01T00:00:00Z",
                "status": "correct",
                "resolvedAt": "2024-05-20T00:00:00Z",
                "realizedReturn": "18.5"
            },
            {
                "id": "a1000000-0000-4000-8000-000000000002",
                "influencerId": "0b6f4e2a-5c1d-4e8b-8f3a-9d2c7e1a4b22",
                "coinSymbol": "ETH",
                "direction": "bearish",
                "predictedAt": "2024-05-10T00:00:00Z"
            }
        ]
    }"#;

    fn now() -> DateTime<Utc> {
        "2024-06-01T00:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn test_load_and_score_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let db = load_database(file.path(), ScoringConfig::default(), now())
            .await
            .unwrap();

        let influencers = db.influencers().list_influencers();
        assert_eq!(influencers.len(), 2);
        assert_eq!(influencers[0].handle, "satoshi_calls");
        assert_eq!(influencers[0].rank, 1);
        assert_eq!(influencers[0].correct_predictions, 1);
        assert!(influencers[0].verified);
        assert_eq!(influencers[1].total_predictions, 1);
    }

    #[test]
    fn test_coin_symbols_are_upper_cased() {
        let fixtures: FixtureSet = serde_json::from_str(SAMPLE).unwrap();

        let db = fixtures.into_database(ScoringConfig::default(), now()).unwrap();

        assert!(
            db.predictions()
                .list_predictions(None)
                .iter()
                .all(|p| p.coin_symbol == p.coin_symbol.to_uppercase())
        );
    }

    #[tokio::test]
    async fn test_demo_fixtures_load() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/demo.json");

        let as_of = "2026-10-18T00:00:00Z".parse().unwrap();

        let db = load_database(path, ScoringConfig::default(), as_of)
            .await
            .unwrap();

        assert_eq!(db.influencers().len(), 6);
        assert!(
            db.influencers()
                .list_influencers()
                .iter()
                .all(|i| (0.0..=100.0).contains(&i.score))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_file("/definitely/not/here.json").await.unwrap_err();
        assert!(matches!(err, FixtureError::IoError(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_file(file.path()).await.unwrap_err();

        assert!(matches!(err, FixtureError::ParseError(_)));
    }
}
