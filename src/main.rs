use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use sitter_match::config::{LoggingSettings, Settings};
use sitter_match::core::Matcher;
use sitter_match::routes::{self, AppState};
use sitter_match::services::{
    CsvRoster, HttpGeocoder, LocationResolver, SampleRoster, SitterSource, StaticGeocoder,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize logging; `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_resolver(settings: &Settings) -> Arc<dyn LocationResolver> {
    let geocoding = &settings.geocoding;
    let table = StaticGeocoder::new(geocoding.extra_coordinates(), geocoding.fallback());

    let Some(endpoint) = geocoding.endpoint.clone() else {
        info!("Using static postal-code table for geocoding");
        return Arc::new(table);
    };

    match HttpGeocoder::new(
        endpoint.clone(),
        Duration::from_secs(geocoding.timeout_secs),
        geocoding.cache_size,
        table.clone(),
    ) {
        Ok(geocoder) => {
            info!("Geocoding via {} (cache: {} entries)", endpoint, geocoding.cache_size);
            Arc::new(geocoder)
        }
        Err(e) => {
            warn!("Failed to build HTTP geocoder ({}), using static table", e);
            Arc::new(table)
        }
    }
}

fn build_roster(settings: &Settings) -> Arc<dyn SitterSource> {
    match &settings.roster.csv_path {
        Some(path) => {
            info!("Loading sitters from {}", path.display());
            Arc::new(CsvRoster::new(path.clone()))
        }
        None => {
            info!("No roster configured, using built-in sample sitters");
            Arc::new(SampleRoster)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Sitter Match service...");

    let weights = settings.scoring.weights();
    let matcher = Matcher::new(weights, settings.matching.result_limit);

    info!(
        "Matcher initialized with weights: {:?}, result limit: {}",
        weights, settings.matching.result_limit
    );

    let app_state = AppState {
        roster: build_roster(&settings),
        resolver: build_resolver(&settings),
        matcher,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
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
