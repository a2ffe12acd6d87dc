use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use activity_booking_api::{
    config::AppConfig,
    routes,
    services::backend_client::ReqwestActivityBackend,
    state::AppState,
    store::{auth_session::AuthSession, preferences::JsonFilePreferenceStore},
};

fn to_io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        to_io_error(e)
    })?;

    let backend = ReqwestActivityBackend::new(&config.backend_base_url, config.backend_timeout)
        .map_err(to_io_error)?;
    info!("Using activity backend at {}", config.backend_base_url);

    let store = JsonFilePreferenceStore::open(&config.preferences_path).map_err(to_io_error)?;
    info!("Preferences loaded from {}", config.preferences_path.display());

    let auth = AuthSession::new(Arc::new(store));
    let state = web::Data::new(AppState::new(
        Arc::new(backend),
        auth,
        config.form_idle_timeout,
    ));

    let cors_origin = config.cors_allowed_origin.clone();
    info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        };

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
