//! Language-model client port.

pub mod client;

pub use client::LlmClient;
