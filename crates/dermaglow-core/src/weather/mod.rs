//! Weather client port.
//!
//! One synchronous round trip per call; the caller decides what to do with
//! a failure. Caching of weather results is a frontend/local concern, not
//! this boundary's.

use dermaglow_types::weather::{WeatherError, WeatherQuery, WeatherReport};

/// Trait for current-conditions weather backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in dermaglow-infra (e.g., `WeatherApiClient`).
pub trait WeatherProvider: Send + Sync {
    /// Fetch normalized current weather for a location.
    fn current(
        &self,
        query: &WeatherQuery,
    ) -> impl std::future::Future<Output = Result<WeatherReport, WeatherError>> + Send;
}
