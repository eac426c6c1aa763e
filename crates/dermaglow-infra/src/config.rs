//! Configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.dermaglow/` by default,
//! `DERMAGLOW_DATA_DIR` to override) and deserializes it into [`AppConfig`].
//! Falls back to defaults when the file is missing or malformed. API keys
//! from the environment take precedence over the file.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use dermaglow_types::config::AppConfig;

/// Resolve the data directory from `DERMAGLOW_DATA_DIR`, falling back to
/// `~/.dermaglow`.
pub fn resolve_data_dir() -> PathBuf {
    std::env::var("DERMAGLOW_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".dermaglow")
        })
}

/// Database URL for the SQLite file inside the data directory.
pub fn database_url(data_dir: &Path) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join("dermaglow.db").display()
    )
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unparseable file: logs a warning and returns the default.
/// - Env vars `DERMAGLOW_OPENAI_API_KEY` / `DERMAGLOW_WEATHER_API_KEY`
///   override the file's API keys either way.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    };

    apply_key_overrides(
        &mut config,
        std::env::var("DERMAGLOW_OPENAI_API_KEY").ok(),
        std::env::var("DERMAGLOW_WEATHER_API_KEY").ok(),
    );

    config
}

/// Apply environment-supplied API keys over the file-supplied ones.
fn apply_key_overrides(
    config: &mut AppConfig,
    openai_key: Option<String>,
    weather_key: Option<String>,
) {
    if let Some(key) = openai_key {
        config.llm.api_key = Some(SecretString::from(key));
    }
    if let Some(key) = weather_key {
        config.weather.api_key = Some(SecretString::from(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [llm]
            model = "gpt-4o"
            "#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[tokio::test]
    async fn test_load_config_malformed_toml_falls_back() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "not [valid toml")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_key_overrides_take_precedence() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some(SecretString::from("from-file".to_string()));

        apply_key_overrides(
            &mut config,
            Some("from-env".to_string()),
            Some("weather-env".to_string()),
        );

        assert_eq!(
            config.llm.api_key.as_ref().unwrap().expose_secret(),
            "from-env"
        );
        assert_eq!(
            config.weather.api_key.as_ref().unwrap().expose_secret(),
            "weather-env"
        );
    }

    #[test]
    fn test_no_override_keeps_file_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some(SecretString::from("from-file".to_string()));

        apply_key_overrides(&mut config, None, None);

        assert_eq!(
            config.llm.api_key.as_ref().unwrap().expose_secret(),
            "from-file"
        );
    }

    #[test]
    fn test_database_url_shape() {
        let url = database_url(Path::new("/tmp/data"));
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("dermaglow.db"));
    }
}
