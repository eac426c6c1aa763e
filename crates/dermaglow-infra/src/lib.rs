//! Infrastructure layer for Dermaglow.
//!
//! Contains implementations of the ports defined in `dermaglow-core`:
//! SQLite storage for sessions, the OpenAI-compatible language-model
//! client, the WeatherAPI client, and the configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;
pub mod weather;
