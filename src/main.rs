//! Partner hub server.

use anyhow::Context;
use partner_hub::api::rest::{AppState, create_router};
use partner_hub::application::jobs::OfferingRefreshJob;
use partner_hub::application::services::{
    OfferingNormalizer, QuoteAggregationEngine, TranslationPipeline,
};
use partner_hub::config::{AppConfig, LogConfig, LogFormat};
use partner_hub::infrastructure::feeds::HttpOfferingFeed;
use partner_hub::infrastructure::persistence::OfferingRepository;
use partner_hub::infrastructure::persistence::in_memory::InMemoryOfferingRepository;
use partner_hub::infrastructure::persistence::postgres::PostgresOfferingRepository;
use partner_hub::infrastructure::providers::ProviderRegistry;
use partner_hub::infrastructure::translation::{
    HttpTranslationBackend, InMemoryTranslationCache, RedisTranslationCache, TranslationCache,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

async fn translation_cache(config: &AppConfig) -> Arc<dyn TranslationCache> {
    if let Some(url) = config.translation.redis_url() {
        match RedisTranslationCache::connect(url).await {
            Ok(cache) => {
                tracing::info!("translation cache: redis");
                return Arc::new(cache);
            }
            Err(e) => tracing::warn!(error = %e, "redis unavailable, using in-memory translation cache"),
        }
    }
    tracing::info!("translation cache: in-memory");
    Arc::new(InMemoryTranslationCache::new())
}

async fn offering_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn OfferingRepository>> {
    let Some(url) = config.database.url() else {
        tracing::info!("offering store: in-memory");
        return Ok(Arc::new(InMemoryOfferingRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(url)
        .await
        .context("connecting to database")?;
    let repository = PostgresOfferingRepository::new(pool);
    repository
        .ensure_schema()
        .await
        .context("creating offering schema")?;
    tracing::info!("offering store: postgres");
    Ok(Arc::new(repository))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!(".env not loaded: {e}");
    }

    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.log);
    tracing::info!("starting partner hub");

    let registry = Arc::new(
        ProviderRegistry::from_config(&config.providers).context("building provider adapters")?,
    );
    for descriptor in registry.descriptors() {
        tracing::info!(provider = %descriptor.provider, state = %descriptor.state, "provider registered");
    }
    let engine = Arc::new(QuoteAggregationEngine::new(
        registry,
        config.aggregation.clone(),
    ));

    let backend = HttpTranslationBackend::from_config(&config.translation)
        .context("building translation client")?;
    if !backend.is_configured() {
        tracing::warn!("translation api key not set, unknown text will stay untranslated");
    }
    let translations = Arc::new(
        TranslationPipeline::new(Arc::new(backend), translation_cache(&config).await)
            .with_cache_ttl(config.translation.cache_ttl()),
    );
    let normalizer = Arc::new(OfferingNormalizer::new(Arc::clone(&translations)));
    let repository = offering_repository(&config).await?;

    let refresh_job = if config.feed.is_enabled() {
        let feed = HttpOfferingFeed::from_config(&config.feed).context("building feed client")?;
        let job = Arc::new(OfferingRefreshJob::new(
            Arc::new(feed),
            normalizer.clone(),
            Arc::clone(&repository),
        ));
        if config.refresh.enabled {
            tracing::info!(
                interval_secs = config.refresh.interval().as_secs(),
                categories = config.refresh.categories.len(),
                "scheduling offering refresh"
            );
            let _schedule = Arc::clone(&job)
                .spawn_periodic(config.refresh.interval(), config.refresh.categories.clone());
        }
        Some(job)
    } else {
        tracing::info!("no offering feed configured, refresh disabled");
        None
    };

    let state = AppState {
        engine,
        translations,
        normalizer,
        repository,
        refresh_job,
    };
    let app = create_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
