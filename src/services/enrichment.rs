use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{error::AppResult, models::Movie};

/// Returned when no catalog movie matches the effective filters
pub const NO_MATCHES_MESSAGE: &str = "No movies found matching your preferences.";

/// Returned when the inference credential is unconfigured; candidates are
/// still delivered in full
pub const KEY_MISSING_MESSAGE: &str = "Hugging Face API key not configured.";

/// Returned when the service responds but carries no generated text
pub const DEFAULT_SUGGESTION_TEXT: &str = "Here are some movie suggestions for you.";

// Generation parameters are fixed, not user-configurable.
const MAX_NEW_TOKENS: u32 = 50;
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    temperature: f32,
}

/// The inference API answers with either a list of generations or a single
/// object; an error payload replaces both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Batch(Vec<Generation>),
    Failure { error: String },
    Single(Generation),
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
}

/// Turns a candidate list into a user-facing suggestion message via an
/// external text-generation service.
///
/// Failure handling is deliberately uneven: a missing credential or an
/// error payload degrades to a fixed or echoed message, while a transport
/// failure propagates and fails the request.
#[derive(Clone)]
pub struct SuggestionEnricher {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl SuggestionEnricher {
    pub fn new(api_key: Option<String>, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// The deterministic prompt sent to the generation service
    pub fn build_prompt(candidates: &[Movie]) -> String {
        let titles = candidates
            .iter()
            .map(|movie| movie.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Based on your preferences, I suggest the following movies: {}.",
            titles
        )
    }

    pub async fn enrich(&self, candidates: &[Movie]) -> AppResult<String> {
        if candidates.is_empty() {
            return Ok(NO_MATCHES_MESSAGE.to_string());
        }

        let Some(api_key) = self.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
            tracing::debug!("Inference API key not configured, skipping enrichment");
            return Ok(KEY_MISSING_MESSAGE.to_string());
        };

        let prompt = Self::build_prompt(candidates);

        let request = GenerateRequest {
            inputs: &prompt,
            parameters: GenerateParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        // Transport failures propagate; everything the service itself
        // reports degrades to a usable message.
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body,
                "Inference service returned an error, echoing prompt"
            );
            return Ok(prompt);
        }

        Ok(Self::normalize_response(&body, &prompt))
    }

    /// Extracts the first generated text from either accepted payload shape,
    /// falling back to the prompt on an error payload and to a canned
    /// sentence when the text field is absent.
    fn normalize_response(body: &str, prompt: &str) -> String {
        match serde_json::from_str::<GenerateResponse>(body) {
            Ok(GenerateResponse::Batch(generations)) => generations
                .into_iter()
                .next()
                .and_then(|g| g.generated_text)
                .unwrap_or_else(|| DEFAULT_SUGGESTION_TEXT.to_string()),
            Ok(GenerateResponse::Single(generation)) => generation
                .generated_text
                .unwrap_or_else(|| DEFAULT_SUGGESTION_TEXT.to_string()),
            Ok(GenerateResponse::Failure { error }) => {
                tracing::warn!(error = %error, "Inference service error payload, echoing prompt");
                prompt.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unrecognized inference payload, echoing prompt");
                prompt.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> Movie {
        Movie {
            id: "1".to_string(),
            title: title.to_string(),
            genres: vec![],
            actors: vec![],
            director: "Unknown".to_string(),
            release_year: 0,
            description: String::new(),
        }
    }

    fn enricher(api_key: Option<&str>) -> SuggestionEnricher {
        SuggestionEnricher::new(
            api_key.map(String::from),
            "http://localhost:9".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_prompt_joins_titles() {
        let candidates = vec![movie("Fargo"), movie("Heat")];
        assert_eq!(
            SuggestionEnricher::build_prompt(&candidates),
            "Based on your preferences, I suggest the following movies: Fargo, Heat."
        );
    }

    #[tokio::test]
    async fn test_empty_candidates_short_circuits() {
        // Unreachable URL proves no call is attempted.
        let message = enricher(Some("key")).enrich(&[]).await.unwrap();
        assert_eq!(message, NO_MATCHES_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let candidates = vec![movie("Fargo")];
        assert_eq!(
            enricher(None).enrich(&candidates).await.unwrap(),
            KEY_MISSING_MESSAGE
        );
        assert_eq!(
            enricher(Some("  ")).enrich(&candidates).await.unwrap(),
            KEY_MISSING_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let candidates = vec![movie("Fargo")];
        let result = enricher(Some("key")).enrich(&candidates).await;
        assert!(matches!(
            result,
            Err(crate::error::AppError::HttpClient(_))
        ));
    }

    #[test]
    fn test_normalize_batch_shape() {
        let body = r#"[{"generated_text": "Try Fargo tonight."}]"#;
        assert_eq!(
            SuggestionEnricher::normalize_response(body, "prompt"),
            "Try Fargo tonight."
        );
    }

    #[test]
    fn test_normalize_single_object_shape() {
        let body = r#"{"generated_text": "Try Heat tonight."}"#;
        assert_eq!(
            SuggestionEnricher::normalize_response(body, "prompt"),
            "Try Heat tonight."
        );
    }

    #[test]
    fn test_normalize_missing_text_uses_default() {
        assert_eq!(
            SuggestionEnricher::normalize_response("[{}]", "prompt"),
            DEFAULT_SUGGESTION_TEXT
        );
        assert_eq!(
            SuggestionEnricher::normalize_response("{}", "prompt"),
            DEFAULT_SUGGESTION_TEXT
        );
    }

    #[test]
    fn test_normalize_error_payload_echoes_prompt() {
        let body = r#"{"error": "Model gpt-neo-2.7B is currently loading"}"#;
        assert_eq!(
            SuggestionEnricher::normalize_response(body, "the prompt"),
            "the prompt"
        );
    }

    #[test]
    fn test_normalize_garbage_echoes_prompt() {
        assert_eq!(
            SuggestionEnricher::normalize_response("<html>busy</html>", "the prompt"),
            "the prompt"
        );
    }
}
