//! Shared domain types for Dermaglow.
//!
//! This crate contains the core domain types used across the Dermaglow
//! consultation backend: assessments, sessions, messages, LLM and weather
//! request/response shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod assessment;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;
pub mod weather;
