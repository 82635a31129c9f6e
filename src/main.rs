use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use gift_rotation::config::{LogFormat, Settings};
use gift_rotation::core::Matcher;
use gift_rotation::models::ErrorResponse;
use gift_rotation::routes::{self, pairings::AppState};
use gift_rotation::services::{PairingService, SheetsClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn json_error(message: String) -> actix_web::Error {
    let body = ErrorResponse {
        error: "invalid_json".to_string(),
        message,
        status_code: 400,
    };
    error::InternalError::from_response(
        "invalid request body",
        HttpResponse::BadRequest().json(body),
    )
    .into()
}

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    json_error(format!("Invalid JSON: {}", err))
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
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
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, settings.logging.log_format());

    info!("Starting gift rotation service...");

    let sheets = SheetsClient::new(
        settings.sheets.endpoint.clone(),
        settings.sheets.spreadsheet_id.clone(),
        settings.sheets.access_token.clone(),
        settings.ranges.clone().into(),
        settings.output.clone().into(),
        settings.sheets.timeout_secs.unwrap_or(30),
    )
    .map_err(|e| {
        error!("Failed to create spreadsheet client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Spreadsheet client initialized for {}", settings.sheets.spreadsheet_id);

    let matcher = Matcher::new(settings.pairing.max_attempts).map_err(|e| {
        error!("Invalid pairing settings: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Matcher initialized (max attempts: {})", matcher.max_attempts());

    let app_state = AppState {
        service: PairingService::new(Arc::new(sheets), matcher, settings.pairing.seed),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes::<SheetsClient>)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
