//! Weather boundary types.
//!
//! The weather client accepts either coordinates or a free-text place name
//! and returns a normalized current-conditions report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location to fetch current weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Coordinates { lat: f64, lng: f64 },
    /// City name or other free-text location query.
    Place(String),
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherQuery::Coordinates { lat, lng } => write!(f, "{lat},{lng}"),
            WeatherQuery::Place(name) => write!(f, "{name}"),
        }
    }
}

/// Normalized current weather conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Air temperature in whole degrees Celsius.
    pub temperature: i32,
    /// Apparent temperature in whole degrees Celsius.
    pub feels_like: i32,
    pub humidity: Option<i32>,
    pub uv_index: Option<f64>,
    /// Condition text, e.g. "Partly cloudy"; "Unknown" when absent upstream.
    pub condition: String,
    /// Wind speed in m/s, one decimal.
    pub wind_speed: f64,
    pub city: String,
    pub country: String,
}

/// Errors from the weather client.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather API key not configured")]
    MissingApiKey,

    #[error("invalid weather query: {0}")]
    InvalidQuery(String),

    #[error("weather upstream error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}
