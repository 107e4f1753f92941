use std::fmt;

#[derive(Debug)]
pub enum WeatherError {
    NotFound(String),
    Upstream(String),
    Unreachable(String),
    Malformed(String),
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WeatherError::NotFound(e) => write!(f, "WeatherError::NotFound: {}", e),
            WeatherError::Upstream(e) => write!(f, "WeatherError::Upstream: {}", e),
            WeatherError::Unreachable(e) => write!(f, "WeatherError::Unreachable: {}", e),
            WeatherError::Malformed(e) => write!(f, "WeatherError::Malformed: {}", e),
        }
    }
}
impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Unreachable(e.to_string())
    }
}
impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Malformed(e.to_string())
    }
}
