//! WeatherAPI.com client.
//!
//! Implements the `WeatherProvider` port: one GET to `current.json` per
//! call, normalized into a [`WeatherReport`]. No retry, no caching.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use dermaglow_core::weather::WeatherProvider;
use dermaglow_types::weather::{WeatherError, WeatherQuery, WeatherReport};

/// Current-conditions client for WeatherAPI.com.
///
/// Does NOT derive Debug to keep the API key out of accidental output.
/// A missing key is only reported when a call is attempted, so the server
/// can start without weather configured.
pub struct WeatherApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl WeatherApiClient {
    pub fn new(api_key: Option<SecretString>, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl WeatherProvider for WeatherApiClient {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_ref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}/current.json", self.base_url.trim_end_matches('/'));
        let q = query.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", api_key.expose_secret()),
                ("q", q.as_str()),
                // Include AQI for completeness; `current` carries uv,
                // condition, wind, humidity, temp.
                ("aqi", "yes"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Upstream {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            return Err(match status {
                StatusCode::BAD_REQUEST => WeatherError::InvalidQuery(message),
                _ => WeatherError::Upstream {
                    status: Some(status.as_u16()),
                    message,
                },
            });
        }

        let payload: CurrentPayload =
            response.json().await.map_err(|e| WeatherError::Upstream {
                status: Some(status.as_u16()),
                message: format!("failed to parse response: {e}"),
            })?;

        Ok(normalize(payload))
    }
}

// ---------------------------------------------------------------------------
// Raw WeatherAPI response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct CurrentPayload {
    #[serde(default)]
    location: Location,
    #[serde(default)]
    current: Current,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Current {
    temp_c: Option<f64>,
    feelslike_c: Option<f64>,
    humidity: Option<f64>,
    uv: Option<f64>,
    condition: Option<Condition>,
    wind_kph: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Condition {
    text: Option<String>,
}

/// Normalize the raw payload: whole degrees Celsius, kph to m/s with one
/// decimal, "Unknown" for a missing condition.
fn normalize(payload: CurrentPayload) -> WeatherReport {
    let current = payload.current;
    let location = payload.location;

    WeatherReport {
        temperature: current.temp_c.unwrap_or(0.0).round() as i32,
        feels_like: current.feelslike_c.unwrap_or(0.0).round() as i32,
        humidity: current.humidity.map(|h| h.round() as i32),
        uv_index: current.uv,
        condition: current
            .condition
            .and_then(|c| c.text)
            .unwrap_or_else(|| "Unknown".to_string()),
        wind_speed: current
            .wind_kph
            .map(|kph| (kph / 3.6 * 10.0).round() / 10.0)
            .unwrap_or(0.0),
        city: location.name.unwrap_or_default(),
        country: location.country.unwrap_or_default(),
    }
}
