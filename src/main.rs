//! Directory Chat service binary.
//!
//! Serves the SMS webhook and runs the idle conversation sweep.

use std::error::Error;
use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use directory_chat::adapters::directory::{load_city_zips, load_zip_index, JsonFileResourceSource};
use directory_chat::adapters::http::{sms_router, SmsAppState};
use directory_chat::adapters::i18n::CatalogTextResolver;
use directory_chat::adapters::lock::{InMemoryContactLock, RedisContactLock};
use directory_chat::adapters::postgres::{run_migrations, PostgresConversationRepository};
use directory_chat::adapters::storage::InMemoryConversationRepository;
use directory_chat::adapters::transport::{LoggingSender, TwilioSender};
use directory_chat::application::{
    CleanupInactiveCommand, CleanupInactiveHandler, HandleInboundMessageHandler,
    RecordSentMessageHandler, SendRepliesHandler,
};
use directory_chat::config::{AppConfig, ChatConfig, DirectoryConfig, ServerConfig};
use directory_chat::domain::chat::ChatEngine;
use directory_chat::ports::{ContactLock, ConversationRepository, MessageSender};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let repository = build_repository(&config).await?;
    let lock = build_lock(&config).await?;
    let sender = build_sender(&config)?;
    let engine = Arc::new(build_engine(&config).await?);

    let inbound = Arc::new(HandleInboundMessageHandler::new(
        repository.clone(),
        lock.clone(),
        engine,
    ));
    let recorder = Arc::new(RecordSentMessageHandler::new(repository.clone(), lock));
    let replies = Arc::new(SendRepliesHandler::new(sender, recorder));

    spawn_cleanup(CleanupInactiveHandler::new(repository), &config.chat);

    let app = sms_router()
        .with_state(SmsAppState::new(inbound, replies))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Directory chat listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_repository(config: &AppConfig) -> Result<Arc<dyn ConversationRepository>, BoxError> {
    let Some(database) = &config.database else {
        tracing::warn!("No database configured, conversations are kept in memory");
        return Ok(Arc::new(InMemoryConversationRepository::new()));
    };

    let pool = database.pool_options().connect(&database.url).await?;
    if database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(Arc::new(PostgresConversationRepository::new(pool)))
}

async fn build_lock(config: &AppConfig) -> Result<Arc<dyn ContactLock>, BoxError> {
    let lock = &config.lock;
    let Some(url) = &lock.redis_url else {
        let in_memory = InMemoryContactLock::new(lock.wait()).with_ttl(lock.ttl());
        return Ok(Arc::new(in_memory));
    };

    let client = redis::Client::open(url.as_str())?;
    let conn = tokio::time::timeout(
        lock.connect_timeout(),
        client.get_multiplexed_async_connection(),
    )
    .await??;
    Ok(Arc::new(RedisContactLock::new(conn, lock.ttl(), lock.wait())))
}

fn build_sender(config: &AppConfig) -> Result<Arc<dyn MessageSender>, BoxError> {
    let Some(twilio) = &config.twilio else {
        tracing::warn!("No Twilio account configured, replies are only logged");
        return Ok(Arc::new(LoggingSender::new("directory-chat")));
    };

    let sender_config = directory_chat::adapters::transport::TwilioConfig::new(
        twilio.account_sid.clone(),
        twilio.auth_token.clone(),
        twilio.from_number.clone(),
    )
    .with_base_url(twilio.api_base_url.clone())
    .with_timeout(twilio.timeout());

    Ok(Arc::new(TwilioSender::new(sender_config)?))
}

async fn build_engine(config: &AppConfig) -> Result<ChatEngine, BoxError> {
    let directory = &config.directory;
    let resources = Arc::new(JsonFileResourceSource::open(&directory.resources_path).await?);
    spawn_directory_refresh(resources.clone(), directory);
    let resolver = CatalogTextResolver::load_dir(&directory.catalog_dir, &directory.default_language)?;
    tracing::info!(languages = ?resolver.languages(), "Loaded message catalogs");

    let mut engine = ChatEngine::new(resources, Arc::new(resolver))
        .with_max_message_length(config.chat.max_message_length);
    if let Some(path) = &directory.zip_index_path {
        engine = engine.with_zip_index(load_zip_index(path).await?);
    }
    if let Some(path) = &directory.city_zips_path {
        engine = engine.with_city_zips(load_city_zips(path).await?);
    }
    Ok(engine)
}

fn spawn_directory_refresh(source: Arc<JsonFileResourceSource>, directory: &DirectoryConfig) {
    let mut ticker = tokio::time::interval(directory.refresh_interval());

    tokio::spawn(async move {
        // The first tick fires immediately and the snapshot was just read
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match source.refresh().await {
                Ok(true) => tracing::info!("Reloaded directory snapshot"),
                Ok(false) => {}
                Err(err) => tracing::error!(
                    error = %err,
                    "Directory refresh failed, serving previous snapshot"
                ),
            }
        }
    });
}

fn spawn_cleanup(handler: CleanupInactiveHandler, chat: &ChatConfig) {
    let command = CleanupInactiveCommand {
        inactive_after_mins: chat.inactive_after_mins,
    };
    let mut ticker = tokio::time::interval(chat.cleanup_interval());

    tokio::spawn(async move {
        loop {
            ticker.tick().await;
            if let Err(err) = handler.handle(command).await {
                tracing::error!(code = %err.code(), error = %err, "Conversation cleanup failed");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
