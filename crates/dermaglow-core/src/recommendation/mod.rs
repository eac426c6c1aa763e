//! Weather-based recommendation service.
//!
//! Composes the weather client and the LLM client: fetch current
//! conditions, render them into the weather prompt, ask for general
//! (non-personalized) skincare advice. Nothing is persisted.

use serde::Serialize;
use tracing::info;

use dermaglow_types::error::SessionError;
use dermaglow_types::weather::{WeatherQuery, WeatherReport};

use crate::llm::LlmClient;
use crate::prompt::{ChatSettings, ConsultPromptBuilder};
use crate::weather::WeatherProvider;

/// Current conditions plus the generated advice.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherAdvice {
    pub weather: WeatherReport,
    pub recommendation: String,
}

/// Orchestrates the weather-recommendation flow.
pub struct RecommendationService<W: WeatherProvider, L: LlmClient> {
    weather: W,
    llm: L,
    settings: ChatSettings,
}

impl<W: WeatherProvider, L: LlmClient> RecommendationService<W, L> {
    pub fn new(weather: W, llm: L, settings: ChatSettings) -> Self {
        Self {
            weather,
            llm,
            settings,
        }
    }

    /// Fetch current weather for the query and generate skincare advice
    /// for those conditions. Either upstream failing aborts the operation.
    pub async fn weather_recommendation(
        &self,
        query: &WeatherQuery,
    ) -> Result<WeatherAdvice, SessionError> {
        let weather = self.weather.current(query).await?;

        let request = ConsultPromptBuilder::weather_recommendation(&self.settings, &weather);
        let response = self.llm.complete(&request).await?;

        info!(city = %weather.city, condition = %weather.condition, "Weather recommendation generated");
        Ok(WeatherAdvice {
            weather,
            recommendation: response.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use dermaglow_types::llm::{CompletionRequest, CompletionResponse, LlmError};
    use dermaglow_types::weather::WeatherError;

    struct StubWeather {
        fail: bool,
    }

    impl WeatherProvider for StubWeather {
        async fn current(&self, _query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
            if self.fail {
                return Err(WeatherError::Upstream {
                    status: Some(500),
                    message: "weather backend down".to_string(),
                });
            }
            Ok(WeatherReport {
                temperature: 35,
                feels_like: 39,
                humidity: Some(55),
                uv_index: Some(8.0),
                condition: "Sunny".to_string(),
                wind_speed: 1.9,
                city: "Karachi".to_string(),
                country: "Pakistan".to_string(),
            })
        }
    }

    struct StubLlm {
        fail: bool,
    }

    impl LlmClient for StubLlm {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            if self.fail {
                return Err(LlmError::RateLimited);
            }
            Ok(CompletionResponse {
                content: "Wear SPF 50.".to_string(),
                model: "gpt-4o-mini".to_string(),
            })
        }
    }

    fn settings() -> ChatSettings {
        ChatSettings {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }

    #[tokio::test]
    async fn test_weather_recommendation_success() {
        let svc = RecommendationService::new(
            StubWeather { fail: false },
            StubLlm { fail: false },
            settings(),
        );
        let advice = svc
            .weather_recommendation(&WeatherQuery::Place("Karachi".to_string()))
            .await
            .unwrap();

        assert_eq!(advice.weather.city, "Karachi");
        assert_eq!(advice.recommendation, "Wear SPF 50.");
    }

    #[tokio::test]
    async fn test_weather_failure_is_upstream() {
        let svc = RecommendationService::new(
            StubWeather { fail: true },
            StubLlm { fail: false },
            settings(),
        );
        let err = svc
            .weather_recommendation(&WeatherQuery::Coordinates { lat: 24.8, lng: 67.0 })
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_llm_failure_is_upstream() {
        let svc = RecommendationService::new(
            StubWeather { fail: false },
            StubLlm { fail: true },
            settings(),
        );
        let err = svc
            .weather_recommendation(&WeatherQuery::Place("Karachi".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Upstream(_)));
    }
}
