use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use jobz_match::config::Settings;
use jobz_match::routes::{self, AppState};
use jobz_match::services::TracingSink;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Jobz match-scoring service...");

    let matcher = settings.matcher();

    info!(
        "Matcher initialized: weights={:?}, batch threshold={}, employer threshold={}, anchors={:?}",
        matcher.scorer().weights(),
        matcher.options().batch_threshold,
        matcher.options().employer_threshold,
        matcher.scorer().anchors()
    );

    let app_state = AppState {
        matcher,
        sink: Arc::new(TracingSink),
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
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))
    .inspect_err(|e| error!("Failed to bind HTTP server: {}", e))?
    .run()
    .await
}
