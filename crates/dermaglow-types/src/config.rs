//! Application configuration types.
//!
//! Deserialized from `config.toml` in the data directory. API keys are
//! wrapped in [`SecretString`] so they never appear in Debug output or
//! logs; they may also be supplied via environment variables (handled by
//! the infra loader).

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub weather: WeatherConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Language-model provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Override for OpenAI-compatible gateways; `None` uses the provider default.
    pub base_url: Option<String>,
    /// API key; the `DERMAGLOW_OPENAI_API_KEY` env var takes precedence.
    pub api_key: Option<SecretString>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            api_key: None,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// WeatherAPI settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    /// API key; the `DERMAGLOW_WEATHER_API_KEY` env var takes precedence.
    pub api_key: Option<SecretString>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weatherapi.com/v1".to_string(),
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!((config.llm.temperature - 0.7).abs() < f64::EPSILON);
        assert!(config.llm.api_key.is_none());
        assert!(config.weather.base_url.contains("weatherapi.com"));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 3000

            [llm]
            model = "gpt-4o"
            api_key = "sk-test"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(
            config.llm.api_key.as_ref().unwrap().expose_secret(),
            "sk-test"
        );
        // Untouched section falls back wholesale.
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let config: AppConfig = toml::from_str(r#"llm = { api_key = "sk-secret" }"#).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
    }
}
