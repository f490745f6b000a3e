//! Rebuttal service entry point.
//!
//! Loads configuration from the environment, wires the conversation store and
//! reply engine behind their ports, and serves the chat API over HTTP.

use std::sync::Arc;

use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use rebuttal::adapters::ai::{OpenAIChatModel, OpenAIConfig};
use rebuttal::adapters::http::{chat_routes, ChatHandlers};
use rebuttal::adapters::store::{InMemoryConversationStore, RedisConversationStore};
use rebuttal::application::handlers::{ModelReplyEngine, SendMessageHandler, TemplateReplyEngine};
use rebuttal::config::{AppConfig, ReplyMode, StoreBackend};
use rebuttal::ports::{ChatModel, ConversationStore, ReplyEngine};

#[tokio::main]
async fn main() {
    // Configuration first: the log filter comes from it.
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Check your environment or .env file.");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!(
        environment = ?config.server.environment,
        "starting rebuttal service"
    );

    let store = match build_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Conversation store error: {}", e);
            std::process::exit(1);
        }
    };
    let engine = build_engine(&config);

    let handler = Arc::new(SendMessageHandler::new(
        store,
        engine,
        config.store.history_keep,
    ));
    let app = chat_routes(ChatHandlers::new(handler))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(build_cors(&config))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Builds the conversation store selected by configuration.
async fn build_store(
    config: &AppConfig,
) -> Result<Arc<dyn ConversationStore>, redis::RedisError> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("conversation store: in-memory");
            Ok(Arc::new(InMemoryConversationStore::new()))
        }
        StoreBackend::Redis => {
            // validate() has already required the URL for this backend.
            let url = config
                .store
                .redis_url
                .as_deref()
                .expect("redis backend requires store.redis_url");
            let client = redis::Client::open(url)?;
            let conn = match tokio::time::timeout(
                config.store.timeout(),
                client.get_multiplexed_tokio_connection(),
            )
            .await
            {
                Ok(conn) => conn?,
                Err(_) => {
                    return Err(redis::RedisError::from((
                        redis::ErrorKind::IoError,
                        "connection timed out",
                    )))
                }
            };
            info!(ttl_secs = config.store.ttl_secs, "conversation store: redis");
            Ok(Arc::new(RedisConversationStore::new(
                conn,
                config.store.ttl(),
            )))
        }
    }
}

/// Builds the reply engine selected by configuration.
fn build_engine(config: &AppConfig) -> Arc<dyn ReplyEngine> {
    match config.ai.mode {
        ReplyMode::Mock => {
            info!("reply engine: templates");
            Arc::new(TemplateReplyEngine::new())
        }
        ReplyMode::Ai => {
            let model: Option<Arc<dyn ChatModel>> = if config.ai.has_api_key() {
                let key = config.ai.openai_api_key.clone().unwrap_or_default();
                info!(model = %config.ai.model, "reply engine: openai");
                let openai_config = OpenAIConfig::new(key)
                    .with_model(config.ai.model.clone())
                    .with_timeout(config.ai.timeout());
                Some(Arc::new(OpenAIChatModel::new(openai_config)))
            } else {
                warn!("AI mode without an API key; every reply degrades to fallback text");
                None
            };
            Arc::new(
                ModelReplyEngine::new(model)
                    .with_max_retries(config.ai.max_retries)
                    .with_sampling(config.ai.max_tokens, config.ai.temperature)
                    .with_debug(config.ai.debug),
            )
        }
    }
}

/// Builds the CORS layer: permissive without configured origins, an
/// allowlist with them.
fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
