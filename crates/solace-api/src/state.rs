//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! The chat service and gateway are generic over their ports, but AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use solace_core::chat::service::ChatService;
use solace_core::event::bus::EventBus;
use solace_core::gateway::ReplyGateway;
use solace_infra::config::{load_global_config, resolve_data_dir};
use solace_infra::llm::openai_compat::config::from_gateway_config;
use solace_infra::llm::openai_compat::OpenAiCompatibleProvider;
use solace_infra::secret::env::api_key_from_env;
use solace_infra::sqlite::api_key::SqliteApiKeyRepository;
use solace_infra::sqlite::pool::DatabasePool;
use solace_infra::sqlite::session::SqliteSessionRepository;
use solace_types::config::GlobalConfig;

/// Event bus channel capacity. Slow SSE consumers lag rather than block writes.
const EVENT_BUS_CAPACITY: usize = 64;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteSessionRepository>;
pub type ConcreteGateway = ReplyGateway<OpenAiCompatibleProvider>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub gateway: Arc<ConcreteGateway>,
    pub events: EventBus,
    pub api_keys: Arc<SqliteApiKeyRepository>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("solace.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_global_config(&data_dir).await;

        // The provider key comes from the environment only. A missing key is
        // not fatal at startup; completion calls will fail upstream and turns
        // will persist the fallback reply instead.
        let provider_key = match api_key_from_env(&config.gateway.api_key_env) {
            Some(key) => key,
            None => {
                tracing::warn!(
                    var = %config.gateway.api_key_env,
                    "Provider API key not set; completions will fail until it is exported"
                );
                SecretString::from(String::new())
            }
        };

        let provider =
            OpenAiCompatibleProvider::new(from_gateway_config(&config.gateway, provider_key));
        let gateway = ReplyGateway::new(provider, config.gateway.clone());

        let events = EventBus::new(EVENT_BUS_CAPACITY);
        let chat_service = ChatService::new(
            SqliteSessionRepository::new(db_pool.clone()),
            events.clone(),
        );

        let api_keys = SqliteApiKeyRepository::new(db_pool.clone());

        Ok(Self {
            chat_service: Arc::new(chat_service),
            gateway: Arc::new(gateway),
            events,
            api_keys: Arc::new(api_keys),
            config,
            data_dir,
            db_pool,
        })
    }
}
