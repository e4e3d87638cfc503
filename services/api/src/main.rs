use anyhow::Context as _;
use reqwest::Url;
use sea_orm::Database;
use tracing::info;

use loomap_api::config::ApiConfig;
use loomap_api::infra::geocoder::NominatimGeocoder;
use loomap_api::router::build_router;
use loomap_api::state::AppState;
use loomap_api::usecase::seed::SeedBathroomsUseCase;
use loomap_core::config::Config;
use loomap_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ApiConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let geocoder = NominatimGeocoder::new(
        Url::parse(&config.geocoder_url).context("parse GEOCODER_URL")?,
        config.geocoder_user_agent.clone(),
        config.geocoder_timeout(),
    )
    .context("build geocoder client")?;

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        cookie_secure: config.cookie_secure,
        geocoder,
    };

    if config.seed_bathrooms {
        let seeded = SeedBathroomsUseCase {
            repo: state.bathroom_repo(),
        }
        .execute()
        .await
        .context("seed bathrooms")?;
        info!(seeded, "bathroom seeding finished");
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
