//! HTTP handlers for the relay service.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::services::providers::GenerationConfig;
use crate::startup::AppState;

/// Request body for the generate endpoint.
///
/// `prompt` is an `Option` so that a JSON body without the field still parses;
/// presence is checked by the handler, which owns the error message ordering.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub response_schema: Option<serde_json::Value>,
}

/// Successful response body for the generate endpoint.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Liveness endpoint confirming the relay is up.
pub async fn health_check() -> &'static str {
    "The relay backend is running. Ready to receive requests from the interface."
}

/// Forward a prompt to the configured provider and relay its text back.
///
/// Validation order matters: a non-JSON body is reported before a missing
/// prompt, and the first failing check short-circuits. The optional
/// `responseSchema` is forwarded to the provider untouched.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RelayError> {
    let Json(request) = payload
        .map_err(|_| RelayError::BadRequest("request must be JSON".to_string()))?;

    let prompt = match request.prompt.as_deref() {
        Some(prompt) if !prompt.is_empty() => prompt,
        _ => {
            return Err(RelayError::BadRequest(
                "'prompt' field is required".to_string(),
            ))
        }
    };

    let config = GenerationConfig::for_schema(request.response_schema);

    tracing::info!(prompt_len = prompt.len(), "Forwarding prompt to provider");
    let text = state.provider.generate(prompt, &config).await?;
    tracing::info!(response_len = text.len(), "Provider response received");

    Ok(Json(GenerateResponse { text }))
}
