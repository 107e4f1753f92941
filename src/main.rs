mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_db;
mod manager_weatherapi;

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tokio::sync::Mutex;
use log::info;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_db::DB;
use crate::manager_weatherapi::WeatherApi;

pub struct AppState {
    pub db: Arc<Mutex<DB>>,
    pub weather: WeatherApi,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let db: Arc<Mutex<DB>> = Arc::new(Mutex::new(DB::new(&config.db.db_path)?));
    let weather = WeatherApi::new(
        &config.weather_api.api_key,
        &config.weather_api.base_url,
        config.weather_api.timeout_seconds,
    )?;

    info!("starting weatherhub on {}:{}",
        config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(AppState { db: db.clone(), weather: weather.clone() }))
            .app_data(handlers::json_config())
            .service(handlers::health)
            .service(handlers::current_passthrough)
            .service(handlers::forecast_passthrough)
            .service(handlers::weather_by_city)
            .service(handlers::list_locations)
            .service(handlers::add_location)
            .service(handlers::delete_location)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
