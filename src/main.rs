pub mod blobs;
pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod service;
pub mod state;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io;

use config::Config;
use state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    service::log::init_logger();

    let config = Config::load().map_err(|e| {
        error!("{}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let state = AppState::init(&config).await.map_err(|e| {
        error!("startup failed: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;
    let state = web::Data::new(state);
    let photo_max_bytes = config.photo_max_bytes;

    info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(photo_max_bytes))
            .wrap(NormalizePath::trim())
            .wrap(service::log::LoggerMiddleware)
            .configure(handlers::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
