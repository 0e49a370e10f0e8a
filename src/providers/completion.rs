use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::settings::SettingsStore;

use super::AnswerGenerator;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

fn extract_answer(response: ChatResponse) -> Result<String> {
    match response.choices.into_iter().next() {
        Some(choice) => Ok(choice.message.content),
        None => bail!("completion response contained no choices"),
    }
}

/// Chat-completion client used to explain a single insight on demand.
pub struct CompletionClient {
    http: reqwest::Client,
    settings: Arc<SettingsStore>,
}

impl CompletionClient {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl AnswerGenerator for CompletionClient {
    async fn generate(&self, question: &str) -> Result<String> {
        let providers = self.settings.providers();

        let body = serde_json::json!({
            "model": providers.completion_model,
            "messages": [{ "role": "user", "content": question }],
        });

        let mut request = self.http.post(&providers.completion_url).json(&body);
        if let Some(key) = providers.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.context("completion request failed")?;

        if !response.status().is_success() {
            bail!("completion endpoint returned {}", response.status());
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to decode completion response")?;

        let answer = extract_answer(parsed)?;
        if answer.is_empty() {
            log_warn!("completion returned an empty answer for '{question}'");
        }
        log_info!("generated {} chars for question '{question}'", answer.len());

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_first_choice_text() {
        let raw = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "Try the 50/30/20 rule." } }
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_answer(parsed).unwrap(), "Try the 50/30/20 rule.");
    }

    #[test]
    fn rejects_a_response_with_no_choices() {
        let parsed: ChatResponse = serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
        assert!(extract_answer(parsed).is_err());
    }
}
