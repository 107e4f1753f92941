use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ApiLocation {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ApiCondition {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ApiCurrent {
    pub temp_f: f64,
    pub humidity: u8,
    pub wind_mph: f64,
    pub condition: ApiCondition,
}

#[derive(Deserialize)]
pub struct ApiResponse {
    pub location: ApiLocation,
    pub current: ApiCurrent,
}

#[derive(Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: Option<ApiErrorBody>,
}

/// Upstream response reduced to the shape served to API consumers
#[derive(Debug, Clone, Serialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temp: i32,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// Untouched upstream response for the passthrough endpoints
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}
