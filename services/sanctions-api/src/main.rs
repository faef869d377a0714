use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use sanctions_api::{config::Config, handlers, metrics, Refresher, SourceFetcher};
use sanctions_core::DatasetStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sanctions_api=debug,sanctions_core=info,actix_web=info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_tracing();

    info!("Starting Sanctions API...");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    info!("Configuration loaded successfully");

    if let Err(e) = metrics::register_metrics(prometheus::default_registry()) {
        warn!("Failed to register metrics: {}", e);
    }

    let store = Arc::new(DatasetStore::new());
    let fetcher = SourceFetcher::new(config.source.clone()).map_err(|e| {
        error!("Failed to create SDN source fetcher: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let refresher = Arc::new(Refresher::new(fetcher, store.clone()));

    // Serve with an empty list if the first load fails; /refresh can recover.
    if let Err(e) = refresher.refresh().await {
        warn!("Initial SDN load failed, starting with an empty list: {}", e);
    }

    if config.refresh.auto_update_enabled {
        let interval = Duration::from_secs(config.refresh.update_interval_hours.max(1) * 3600);
        refresher.clone().spawn_periodic(interval);
    }

    let server_config = config.server.clone();
    info!(
        "Starting HTTP server on {}:{}",
        server_config.host, server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(refresher.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(handlers::configure_routes)
    })
    .workers(server_config.workers)
    .bind((server_config.host, server_config.port))?
    .run()
    .await
}
