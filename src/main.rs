use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use talent_scout::config::Settings;
use talent_scout::routes::{self, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; LOG_LEVEL and LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting Talent Scout search service...");
    info!("Configuration loaded successfully");

    let app_state = AppState::from_settings(&settings).map_err(|e| {
        error!("Failed to initialize clients: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    match &app_state.provider {
        Some(provider) => info!(
            "Provider client initialized for {} ({} requests per {}s)",
            provider.base_url(),
            settings.rate_limit.max_requests_per_minute,
            settings.rate_limit.window_secs
        ),
        None => warn!("Provider API key or host missing, serving mock data"),
    }

    if app_state.generator.is_some() {
        info!("Generator initialized with model {}", settings.generator.model);
    } else {
        warn!("Generator API key missing, talent search will derive filters from job fields");
    }

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
