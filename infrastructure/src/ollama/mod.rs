//! Ollama HTTP adapter
//!
//! Talks to a local Ollama server through its REST API:
//!
//! | Endpoint | Used for |
//! |----------|----------|
//! | `POST /api/generate` | One non-streaming completion per prompt |
//! | `GET /api/tags` | Connection check and model listing |
//!
//! A single [`reqwest::Client`] is shared by every request issued through
//! one [`OllamaGateway`], so a fan-out reuses the same connection pool.

mod gateway;
mod types;

pub use gateway::{OllamaConfig, OllamaGateway};
