use anyhow::Context;
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;

use config::Config;
use features::{influencers, leaderboard, predictions};

#[derive(OpenApi)]
#[openapi(
    paths(
        leaderboard::handlers::get_leaderboard,
        leaderboard::handlers::get_top_performers,
        leaderboard::handlers::get_hottest_streaks,
        leaderboard::handlers::get_biggest_gainers,
        influencers::handlers::list_influencers,
        influencers::handlers::get_influencer,
        influencers::handlers::list_influencer_predictions,
        predictions::handlers::resolve_prediction,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::SortField,
            storage::dto::leaderboard::SortOrder,
            storage::dto::influencer::InfluencerProfile,
            storage::dto::prediction::ResolvePredictionRequest,
            storage::models::Influencer,
            storage::models::Prediction,
            storage::models::Platform,
            storage::models::Direction,
            storage::models::PredictionStatus,
            storage::models::Outcome,
            storage::models::TimeRange,
            storage::services::PredictionStats,
            storage::services::ScoreBreakdown,
            storage::services::tiering::TierBadge,
        )
    ),
    tags(
        (name = "leaderboard", description = "Ranked influencer views"),
        (name = "influencers", description = "Influencer directory, profiles and prediction feeds"),
        (name = "predictions", description = "Prediction resolution"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting CallRank API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = fixtures::load_database(&config.fixtures_path, config.scoring, Utc::now())
        .await
        .with_context(|| format!("Failed to load fixtures from {}", config.fixtures_path))?;
    tracing::info!("Fixtures loaded and scored");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::api()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
