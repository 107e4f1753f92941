pub mod errors;
pub mod models;

use std::time::Duration;
use reqwest::{Client, Url};
use crate::manager_weatherapi::errors::WeatherError;
use crate::manager_weatherapi::models::{ApiErrorEnvelope, ApiResponse, CurrentWeather, RawResponse};

/// Upstream endpoints available for raw passthrough
#[derive(Debug, Clone, Copy)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current",
            Endpoint::Forecast => "forecast",
        }
    }
}

/// Struct for fetching weather data from WeatherAPI.com
///
/// The API key is held server side and injected into every upstream request,
/// it never appears in anything returned to a caller.
#[derive(Clone)]
pub struct WeatherApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherApi {
    /// Returns a WeatherApi struct ready for fetching weather data
    ///
    /// # Arguments
    ///
    /// * 'api_key' - WeatherAPI.com API key
    /// * 'base_url' - upstream base url, e.g. https://api.weatherapi.com/v1
    /// * 'timeout_seconds' - per request timeout enforced by the http client
    pub fn new(api_key: &str, base_url: &str, timeout_seconds: u64) -> Result<WeatherApi, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Retrieves the current weather for a city, reduced to the normalized shape.
    ///
    /// A non-success upstream status is classified by its error message: an
    /// unknown location reports `NotFound`, anything else `Upstream`. A payload
    /// missing any of the expected fields reports `Malformed`.
    ///
    /// # Arguments
    ///
    /// * 'city' - city name to query for
    pub async fn fetch_weather(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/current.json", self.base_url);

        let res = self.client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(classify_failure(&extract_error_message(&body)));
        }

        normalize(&body)
    }

    /// Forwards a caller's query string to the given upstream endpoint and
    /// returns status, content type and body unchanged.
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - upstream endpoint to forward to
    /// * 'raw_query' - the caller's query string, forwarded as-is
    pub async fn passthrough(&self, endpoint: Endpoint, raw_query: &str) -> Result<RawResponse, WeatherError> {
        let mut url = Url::parse(&format!("{}/{}.json", self.base_url, endpoint.as_str()))
            .map_err(|e| WeatherError::Unreachable(e.to_string()))?;
        if !raw_query.is_empty() {
            url.set_query(Some(raw_query));
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let res = self.client.get(url).send().await?;

        let status = res.status().as_u16();
        let content_type = res.headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let body = res.bytes().await?.to_vec();

        Ok(RawResponse { status, content_type, body })
    }
}

/// Reduces an upstream current-conditions payload to the normalized shape
fn normalize(body: &str) -> Result<CurrentWeather, WeatherError> {
    let parsed: ApiResponse = serde_json::from_str(body)?;

    Ok(CurrentWeather {
        city: parsed.location.name,
        temp: parsed.current.temp_f.round() as i32,
        description: parsed.current.condition.text,
        humidity: parsed.current.humidity,
        wind_speed: parsed.current.wind_mph,
    })
}

/// Pulls the upstream error message out of a failure body, if there is one
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| "City not found".to_string())
}

fn classify_failure(message: &str) -> WeatherError {
    let lower = message.to_lowercase();
    if lower.contains("not found") || lower.contains("no matching location") {
        WeatherError::NotFound(message.to_string())
    } else {
        WeatherError::Upstream(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_PAYLOAD: &str = r#"{
        "location": {"name": "London", "country": "United Kingdom"},
        "current": {
            "temp_c": 22.0,
            "temp_f": 71.6,
            "humidity": 55,
            "wind_mph": 6.9,
            "condition": {"text": "Partly cloudy"}
        }
    }"#;

    #[test]
    fn normalize_rounds_temperature_to_nearest_integer() {
        let weather = normalize(CURRENT_PAYLOAD).unwrap();
        assert_eq!(weather.temp, 72);
    }

    #[test]
    fn normalize_extracts_all_fields() {
        let weather = normalize(CURRENT_PAYLOAD).unwrap();

        assert_eq!(weather.city, "London");
        assert_eq!(weather.description, "Partly cloudy");
        assert_eq!(weather.humidity, 55);
        assert_eq!(weather.wind_speed, 6.9);
    }

    #[test]
    fn normalize_rejects_missing_field() {
        let payload = r#"{
            "location": {"name": "London"},
            "current": {"temp_f": 71.6, "humidity": 55}
        }"#;

        match normalize(payload) {
            Err(WeatherError::Malformed(_)) => (),
            other => panic!("expected Malformed, got {:?}", other.map(|w| w.city)),
        }
    }

    #[test]
    fn unknown_location_classifies_as_not_found() {
        match classify_failure("No matching location found.") {
            WeatherError::NotFound(_) => (),
            other => panic!("expected NotFound, got {}", other),
        }
        match classify_failure("City NOT FOUND") {
            WeatherError::NotFound(_) => (),
            other => panic!("expected NotFound, got {}", other),
        }
    }

    #[test]
    fn other_failures_classify_as_upstream() {
        match classify_failure("API key is invalid or not provided.") {
            WeatherError::Upstream(msg) => assert!(msg.contains("API key")),
            other => panic!("expected Upstream, got {}", other),
        }
    }

    #[test]
    fn error_message_extraction_falls_back() {
        let body = r#"{"error": {"code": 1006, "message": "No matching location found."}}"#;
        assert_eq!(extract_error_message(body), "No matching location found.");

        assert_eq!(extract_error_message("not json at all"), "City not found");
        assert_eq!(extract_error_message(r#"{"error": {}}"#), "City not found");
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Current.as_str(), "current");
        assert_eq!(Endpoint::Forecast.as_str(), "forecast");
    }
}
