//! Mock provider implementation for testing.

use super::{GenerationConfig, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Canned outcome a [`MockTextProvider`] returns for every call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Reply(String),
    Fail(String),
}

/// Mock text provider that records every call it receives.
///
/// Tests assert against the recorded `(prompt, config)` pairs to verify both
/// that the provider saw exactly the forwarded configuration and that
/// rejected requests never reached it.
pub struct MockTextProvider {
    outcome: MockOutcome,
    calls: Arc<Mutex<Vec<(String, GenerationConfig)>>>,
}

impl MockTextProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Reply(text.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Fail(message.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded calls, shared with the running provider.
    pub fn calls(&self) -> Arc<Mutex<Vec<(String, GenerationConfig)>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), config.clone()));

        match &self.outcome {
            MockOutcome::Reply(text) => Ok(text.clone()),
            MockOutcome::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}
