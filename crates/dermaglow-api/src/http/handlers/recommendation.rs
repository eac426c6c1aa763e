//! Weather recommendation HTTP handler.
//!
//! GET /api/v1/recommendations/weather?lat=..&lng=.. (or ?city=..)

use std::time::Instant;

use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use dermaglow_core::recommendation::WeatherAdvice;
use dermaglow_types::weather::WeatherQuery;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Query parameters: either a city or a lat/lng pair.
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub city: Option<String>,
}

impl WeatherParams {
    /// Resolve the parameters into a weather query. City wins when both
    /// are supplied; neither is a validation error.
    fn into_query(self) -> Result<WeatherQuery, AppError> {
        if let Some(city) = self.city {
            return Ok(WeatherQuery::Place(city));
        }
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(WeatherQuery::Coordinates { lat, lng }),
            _ => Err(AppError::Validation(
                "Provide either lat/lng or city".to_string(),
            )),
        }
    }
}

/// GET /api/v1/recommendations/weather - Weather-based skincare advice.
pub async fn weather_recommendation(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(params): Query<WeatherParams>,
) -> Result<ApiResponse<WeatherAdvice>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let query = params.into_query()?;
    let advice = state
        .recommendation_service
        .weather_recommendation(&query)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(ApiResponse::success(advice, request_id, elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_takes_precedence() {
        let params = WeatherParams {
            lat: Some(1.0),
            lng: Some(2.0),
            city: Some("Lahore".to_string()),
        };
        assert!(matches!(
            params.into_query().unwrap(),
            WeatherQuery::Place(city) if city == "Lahore"
        ));
    }

    #[test]
    fn test_coordinates_require_both() {
        let params = WeatherParams {
            lat: Some(1.0),
            lng: None,
            city: None,
        };
        assert!(params.into_query().is_err());

        let params = WeatherParams {
            lat: Some(31.5),
            lng: Some(74.3),
            city: None,
        };
        assert!(matches!(
            params.into_query().unwrap(),
            WeatherQuery::Coordinates { .. }
        ));
    }
}
