//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for the text generation
//! backend, allowing the real Gemini client to be swapped for a mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
///
/// Each variant carries the underlying message verbatim; the HTTP boundary
/// relays it to the caller inside the error envelope.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    ApiError(String),

    #[error("{0}")]
    NetworkError(String),
}

/// Generation configuration forwarded to the provider.
///
/// The schema, when present, is opaque: it is never validated or interpreted
/// locally, only serialized into the upstream request unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// Build the configuration for an optional client-supplied output schema.
    ///
    /// A schema switches the requested output to JSON; otherwise the provider
    /// is asked for plain text and no schema field is sent at all.
    pub fn for_schema(schema: Option<serde_json::Value>) -> Self {
        match schema {
            Some(schema) => GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(schema),
            },
            None => GenerationConfig {
                response_mime_type: "text/plain".to_string(),
                response_schema: None,
            },
        }
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text for a prompt under the given configuration.
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_without_schema_requests_plain_text() {
        let config = GenerationConfig::for_schema(None);
        assert_eq!(config.response_mime_type, "text/plain");
        assert!(config.response_schema.is_none());
    }

    #[test]
    fn config_with_schema_requests_json_and_keeps_schema_verbatim() {
        let schema = json!({
            "type": "object",
            "properties": { "title": { "type": "string" } }
        });
        let config = GenerationConfig::for_schema(Some(schema.clone()));
        assert_eq!(config.response_mime_type, "application/json");
        assert_eq!(config.response_schema, Some(schema));
    }

    #[test]
    fn config_serializes_with_camel_case_wire_names() {
        let config = GenerationConfig::for_schema(None);
        let wire = serde_json::to_value(&config).unwrap();
        assert_eq!(wire, json!({ "responseMimeType": "text/plain" }));
    }
}
