use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Database;
use crate::dto::common::{PaginatedResponse, parse_lenient};
use crate::dto::influencer::{DirectoryParams, InfluencerProfile};
use crate::dto::leaderboard::{Highlights, LeaderboardEntry, LeaderboardParams, LeaderboardQuery};
use crate::dto::prediction::PredictionFeedParams;
use crate::error::Result;
use crate::models::{Prediction, TimeRange};
use crate::repository::SnapshotStore;
use crate::services::scoring::ScoringConfig;
use crate::services::{feed, leaderboard, profile, selectors};

/// Computes presentation views from store snapshots.
///
/// Every call takes one fresh snapshot covering both stores; nothing is
/// cached between calls.
pub struct LeaderboardService<'a> {
    store: &'a dyn SnapshotStore,
    scoring: &'a ScoringConfig,
}

impl<'a> LeaderboardService<'a> {
    pub fn new(store: &'a dyn SnapshotStore, scoring: &'a ScoringConfig) -> Self {
        Self { store, scoring }
    }

    pub fn from_database(db: &'a Database) -> Self {
        Self::new(db, db.scoring())
    }

    pub fn entries(&self, time_range: TimeRange, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        let snapshot = self.store.snapshot();
        leaderboard::build_entries(&snapshot.influencers, &snapshot.predictions, time_range, now)
    }

    pub fn leaderboard(
        &self,
        params: &LeaderboardParams,
        now: DateTime<Utc>,
    ) -> PaginatedResponse<LeaderboardEntry> {
        let query = LeaderboardQuery::normalize(params);
        let snapshot = self.store.snapshot();
        leaderboard::leaderboard_page(&snapshot.influencers, &snapshot.predictions, &query, now)
    }

    /// The influencer directory is the all-time leaderboard without a threshold.
    pub fn directory(
        &self,
        params: &DirectoryParams,
        now: DateTime<Utc>,
    ) -> PaginatedResponse<LeaderboardEntry> {
        self.leaderboard(
            &LeaderboardParams {
                sort_by: params.sort_by.clone(),
                order: params.order.clone(),
                time_range: None,
                min_predictions: None,
                page: params.page.clone(),
                page_size: params.page_size.clone(),
            },
            now,
        )
    }

    pub fn top_performers(&self, limit: Option<&str>, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        selectors::top_performers(&self.entries(TimeRange::All, now), parse_lenient(limit))
    }

    pub fn hottest_streaks(&self, limit: Option<&str>, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        selectors::hottest_streaks(&self.entries(TimeRange::All, now), parse_lenient(limit))
    }

    pub fn biggest_gainers(&self, limit: Option<&str>, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        selectors::biggest_gainers(&self.entries(TimeRange::All, now), parse_lenient(limit))
    }

    pub fn highlights(&self, limit: Option<&str>, now: DateTime<Utc>) -> Highlights {
        selectors::highlights(&self.entries(TimeRange::All, now), parse_lenient(limit))
    }

    pub fn profile(&self, influencer_id: Uuid, now: DateTime<Utc>) -> Result<InfluencerProfile> {
        let (influencer, predictions) = self.store.influencer_snapshot(influencer_id)?;
        profile::influencer_profile(&influencer, &predictions, self.scoring, now)
    }

    pub fn prediction_feed(
        &self,
        influencer_id: Uuid,
        params: &PredictionFeedParams,
        now: DateTime<Utc>,
    ) -> Result<PaginatedResponse<Prediction>> {
        let (_, predictions) = self.store.influencer_snapshot(influencer_id)?;
        Ok(feed::prediction_feed(
            &predictions,
            Some(influencer_id),
            params,
            now,
        ))
    }
}
