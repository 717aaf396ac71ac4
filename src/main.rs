//! TalentScout server binary.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use talentscout::adapters::ai::{GeminiConfig, GeminiProvider};
use talentscout::adapters::document::PdfTextReader;
use talentscout::adapters::http::{screening_routes, ScreeningAppState};
use talentscout::adapters::storage::InMemorySessionStore;
use talentscout::config::AppConfig;
use talentscout::ports::AiProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate()?;

    let api_key = config
        .ai
        .google_api_key
        .clone()
        .expect("validated configuration carries an API key");
    let provider: Arc<dyn AiProvider> = Arc::new(GeminiProvider::new(
        GeminiConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    ));
    tracing::info!(
        provider = %provider.provider_info().name,
        model = %provider.provider_info().model,
        "AI provider configured"
    );

    let state = ScreeningAppState::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(PdfTextReader::new()),
        provider,
    );

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = Router::new()
        .merge(screening_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(cors),
        );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "TalentScout listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
