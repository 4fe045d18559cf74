use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use scholar_match::config::{LoggingSettings, Settings};
use scholar_match::core::Matcher;
use scholar_match::routes::{self, AppState};
use scholar_match::services::{OpportunityCache, OpportunityClient, ProfileClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

fn io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    init_logging(
        settings
            .as_ref()
            .map(|s| &s.logging)
            .unwrap_or(&LoggingSettings::default()),
    );

    info!("Starting Scholar Match matching service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io_error(e)
    })?;

    info!("Configuration loaded successfully");

    let opportunities = Arc::new(
        OpportunityClient::new(settings.provider.base_url.clone(), settings.provider.timeout())
            .map_err(io_error)?,
    );
    let profiles = Arc::new(
        ProfileClient::new(settings.profiles.base_url.clone(), settings.profiles.timeout())
            .map_err(io_error)?,
    );

    info!(
        "Upstream clients initialized (provider: {}, profiles: {})",
        settings.provider.base_url, settings.profiles.base_url
    );

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(30);
    let cache_size = settings.cache.max_entries.unwrap_or(16);
    let cache = Arc::new(OpportunityCache::new(cache_size, cache_ttl));

    if cache.is_enabled() {
        info!("Opportunity cache initialized ({} entries, TTL: {}s)", cache_size, cache_ttl);
    } else {
        info!("Opportunity cache disabled");
    }

    // Initialize matcher with configured weights
    let (weights, legacy_weights) = settings.weights();
    let matcher = Matcher::new(weights, legacy_weights, settings.scoring.strategy).map_err(|e| {
        error!("Invalid scoring configuration: {}", e);
        io_error(e)
    })?;

    info!(
        "Matcher initialized ({:?} strategy) with weights: {:?}",
        matcher.strategy(),
        weights
    );

    let app_state = AppState {
        opportunities,
        profiles,
        cache,
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
