use actix_web::{delete, get, post, web, HttpRequest, HttpResponse, Responder};
use actix_web::http::StatusCode;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use crate::AppState;
use crate::manager_db::{AddOutcome, DeleteOutcome};
use crate::manager_weatherapi::Endpoint;
use crate::manager_weatherapi::errors::WeatherError;

#[derive(Deserialize, Debug)]
struct SaveLocationRequest {
    city: Option<String>,
}

/// Json extractor config that keeps error bodies well-formed json
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({"error": "Invalid JSON body"})),
        ).into()
    })
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"ok": true}))
}

#[get("/current.json")]
pub async fn current_passthrough(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    forward(Endpoint::Current, &req, &data).await
}

#[get("/forecast.json")]
pub async fn forecast_passthrough(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    forward(Endpoint::Forecast, &req, &data).await
}

async fn forward(endpoint: Endpoint, req: &HttpRequest, data: &AppState) -> HttpResponse {
    info!("GET /{}.json?{}", endpoint.as_str(), req.query_string());

    match data.weather.passthrough(endpoint, req.query_string()).await {
        Ok(raw) => {
            let status = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status)
                .content_type(raw.content_type)
                .body(raw.body)
        },
        Err(e) => {
            error!("passthrough to {} failed: {}", endpoint.as_str(), e);
            HttpResponse::BadGateway().json(json!({"error": "Failed to contact WeatherAPI"}))
        },
    }
}

#[get("/api/weather/{city}")]
pub async fn weather_by_city(path: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    let city = path.into_inner();
    info!("GET /api/weather/{}", city);

    match data.weather.fetch_weather(&city).await {
        Ok(weather) => HttpResponse::Ok().json(weather),
        Err(WeatherError::NotFound(msg)) => HttpResponse::NotFound().json(json!({"error": msg})),
        Err(WeatherError::Upstream(msg)) => {
            error!("upstream error for {}: {}", city, msg);
            HttpResponse::InternalServerError().json(json!({"error": msg}))
        },
        Err(WeatherError::Unreachable(e)) => {
            error!("upstream unreachable: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "Failed to contact WeatherAPI"}))
        },
        Err(WeatherError::Malformed(e)) => {
            error!("malformed upstream payload for {}: {}", city, e);
            HttpResponse::InternalServerError().json(json!({"error": "Unexpected response from WeatherAPI"}))
        },
    }
}

#[get("/api/saved-locations")]
pub async fn list_locations(data: web::Data<AppState>) -> impl Responder {
    let db = data.db.lock().await;

    match db.list_locations() {
        Ok(locations) => HttpResponse::Ok().json(locations),
        Err(e) => {
            error!("failed to list saved locations: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "Failed to load saved locations"}))
        },
    }
}

#[post("/api/saved-locations")]
pub async fn add_location(body: web::Json<SaveLocationRequest>, data: web::Data<AppState>) -> impl Responder {
    info!("POST /api/saved-locations {:?}", body);

    let city = body.city.as_deref().unwrap_or("");
    let db = data.db.lock().await;

    match db.add_location(city) {
        Ok(AddOutcome::Created(loc)) => {
            HttpResponse::Created().json(json!({"message": format!("Saved {}", loc.city)}))
        },
        Ok(AddOutcome::AlreadyExists) => {
            HttpResponse::Ok().json(json!({"message": "City already saved"}))
        },
        Ok(AddOutcome::InvalidInput) => {
            HttpResponse::BadRequest().json(json!({"error": "City name is required"}))
        },
        Err(e) => {
            error!("failed to save location: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "Failed to save location"}))
        },
    }
}

#[delete("/api/saved-locations/{city}")]
pub async fn delete_location(path: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    let city = path.into_inner();
    info!("DELETE /api/saved-locations/{}", city);

    let db = data.db.lock().await;

    match db.delete_location(&city) {
        Ok(DeleteOutcome::Deleted) => HttpResponse::Ok().json(json!({"message": "Deleted"})),
        Ok(DeleteOutcome::NotFound) => HttpResponse::NotFound().json(json!({"error": "City not found"})),
        Err(e) => {
            error!("failed to delete location: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "Failed to delete location"}))
        },
    }
}
