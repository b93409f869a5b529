//! Gemini API client module
//!
//! The external generative-extraction boundary: a thin typed client for
//! the Gemini `generateContent` endpoint with structured-output support.

mod client;
mod http;
mod types;

pub use client::{API_KEY_ENV, Client};
pub use types::{Content, GenerateContentResponse, GenerationConfig, Part, UsageMetadata};
