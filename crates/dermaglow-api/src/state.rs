//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the REST API. Services are generic over repository/client traits, but
//! AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::warn;

use dermaglow_core::prompt::ChatSettings;
use dermaglow_core::recommendation::RecommendationService;
use dermaglow_core::session::SessionService;
use dermaglow_infra::config::{database_url, load_config, resolve_data_dir};
use dermaglow_infra::llm::OpenAiClient;
use dermaglow_infra::sqlite::pool::DatabasePool;
use dermaglow_infra::sqlite::session::SqliteSessionRepository;
use dermaglow_infra::weather::WeatherApiClient;
use dermaglow_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSessionService = SessionService<SqliteSessionRepository, OpenAiClient>;

pub type ConcreteRecommendationService = RecommendationService<WeatherApiClient, OpenAiClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<ConcreteSessionService>,
    pub recommendation_service: Arc<ConcreteRecommendationService>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        // Initialize database
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        // LLM client, shared by both services
        let openai_key = match &config.llm.api_key {
            Some(key) => key.expose_secret().to_string(),
            None => {
                warn!("No OpenAI API key configured; LLM calls will fail upstream");
                String::new()
            }
        };
        let llm = OpenAiClient::new(
            &openai_key,
            config.llm.model.clone(),
            config.llm.base_url.as_deref(),
        );

        let settings = ChatSettings {
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        };

        // Wire session service
        let session_repo = SqliteSessionRepository::new(db_pool.clone());
        let session_service = SessionService::new(session_repo, llm.clone(), settings.clone());

        // Wire recommendation service
        let weather = WeatherApiClient::new(
            config.weather.api_key.clone(),
            config.weather.base_url.clone(),
        );
        let recommendation_service = RecommendationService::new(weather, llm, settings);

        Ok(Self {
            session_service: Arc::new(session_service),
            recommendation_service: Arc::new(recommendation_service),
            config,
            data_dir,
            db_pool,
        })
    }
}
