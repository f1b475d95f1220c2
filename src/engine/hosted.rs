//! Hosted summarization pipeline client
//!
//! Speaks the Hugging Face Inference API wire format:
//! `POST {endpoint}/{model_id}` with the input text and generation
//! parameters, answered by `[{"summary_text": "..."}]`.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::{GenerationParams, SummarizationEngine};
use crate::core::config::AppConfig;
use crate::core::models::Candidate;
use crate::errors::SummarizerError;

const WARMUP_TEXT: &str = "The service is loading its summarization model before accepting requests.";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Serialize)]
struct PipelineRequest<'a> {
    inputs: &'a str,
    parameters: PipelineParameters,
    options: PipelineOptions,
}

#[derive(Debug, Serialize)]
struct PipelineParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct PipelineOptions {
    wait_for_model: bool,
}

/// Summarization engine backed by a hosted model endpoint.
pub struct HostedEngine {
    client: Client,
    model_url: Url,
    model_id: String,
}

impl std::fmt::Debug for HostedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedEngine")
            .field("model_id", &self.model_id)
            .field("model_url", &self.model_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HostedEngine {
    /// Acquires the engine: builds the HTTP client and runs one warm-up
    /// generation so the model is resident before the first request.
    ///
    /// Must not be called from inside an async context; the blocking client
    /// owns its own runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Startup`] if the client cannot be built or
    /// the warm-up generation fails.
    pub fn load(config: &AppConfig) -> Result<Self, SummarizerError> {
        let engine = Self::connect(config)?;

        let started = Instant::now();
        let warmup = engine
            .generate(WARMUP_TEXT, config.params)
            .map_err(|e| SummarizerError::Startup(format!("warm-up for '{}' failed: {}", engine.model_id, e)))?;
        if warmup.is_empty() {
            return Err(SummarizerError::Startup(format!(
                "warm-up for '{}' returned no candidates",
                engine.model_id
            )));
        }

        info!(
            model_id = %engine.model_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Summarization model loaded"
        );
        Ok(engine)
    }

    /// Builds the client without the warm-up round trip.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Startup`] for an unusable token, endpoint or
    /// TLS setup.
    pub fn connect(config: &AppConfig) -> Result<Self, SummarizerError> {
        let model_url = model_url(&config.endpoint, &config.model_id)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| SummarizerError::Startup(format!("invalid API token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SummarizerError::Startup(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            model_url,
            model_id: config.model_id.clone(),
        })
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl SummarizationEngine for HostedEngine {
    fn generate(
        &self,
        text: &str,
        params: GenerationParams,
    ) -> Result<Vec<Candidate>, SummarizerError> {
        let request = build_request(text, params);
        debug!(model_id = %self.model_id, input_chars = text.chars().count(), "Calling hosted pipeline");

        let response = self.client.post(self.model_url.clone()).json(&request).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            warn!(model_id = %self.model_id, status = status.as_u16(), "Hosted pipeline returned an error status");
        }
        parse_candidates(status.as_u16(), &body)
    }
}

fn build_request(text: &str, params: GenerationParams) -> PipelineRequest<'_> {
    PipelineRequest {
        inputs: text,
        parameters: PipelineParameters {
            min_length: params.min_length(),
            max_length: params.max_length(),
            do_sample: false,
        },
        options: PipelineOptions {
            wait_for_model: true,
        },
    }
}

fn model_url(endpoint: &Url, model_id: &str) -> Result<Url, SummarizerError> {
    let model_id = model_id.trim_matches('/');
    if model_id.is_empty() {
        return Err(SummarizerError::Startup("model id is empty".to_string()));
    }
    let base = endpoint.as_str().trim_end_matches('/');
    Url::parse(&format!("{}/{}", base, model_id))
        .map_err(|e| SummarizerError::Startup(format!("invalid model url: {}", e)))
}

/// Validates a pipeline response against the `[{"summary_text": ...}]` shape.
pub(crate) fn parse_candidates(status: u16, body: &str) -> Result<Vec<Candidate>, SummarizerError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        SummarizerError::Inference(format!(
            "engine returned non-JSON response (status {}): {}: {}",
            status,
            e,
            truncate(body)
        ))
    })?;

    if let Some(message) = value.get("error") {
        let message = message
            .as_str()
            .map_or_else(|| message.to_string(), ToString::to_string);
        return Err(SummarizerError::Inference(format!(
            "engine error (status {}): {}",
            status, message
        )));
    }

    if !(200..300).contains(&status) {
        return Err(SummarizerError::Inference(format!(
            "engine returned status {}: {}",
            status,
            truncate(body)
        )));
    }

    serde_json::from_value::<Vec<Candidate>>(value).map_err(|e| {
        SummarizerError::Inference(format!("unexpected engine response shape: {}", e))
    })
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_candidate_list() {
        let body = r#"[{"summary_text": "a fox jumps"}, {"summary_text": "second"}]"#;
        let candidates = parse_candidates(200, body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].summary_text, "a fox jumps");
    }

    #[test]
    fn error_object_is_inference_failure() {
        let body = r#"{"error": "Model t5-small is currently loading", "estimated_time": 20.0}"#;
        let err = parse_candidates(503, body).unwrap_err();
        match err {
            SummarizerError::Inference(msg) => {
                assert!(msg.contains("currently loading"));
                assert!(msg.contains("503"));
            }
            other => panic!("Unexpected error type: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_inference_failure() {
        for body in [r#"[{"generated_text": "x"}]"#, r#"{"summary_text": "x"}"#, "42"] {
            let err = parse_candidates(200, body).unwrap_err();
            assert!(
                matches!(err, SummarizerError::Inference(_)),
                "body {body} should be rejected"
            );
        }
    }

    #[test]
    fn non_json_body_is_inference_failure() {
        let err = parse_candidates(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SummarizerError::Inference(_)));
    }

    #[test]
    fn non_success_status_without_error_field_fails() {
        let err = parse_candidates(500, "[]").unwrap_err();
        assert!(matches!(err, SummarizerError::Inference(_)));
    }

    #[test]
    fn request_uses_greedy_decoding_and_bounds() {
        let params = GenerationParams::new(5, 15).unwrap();
        let request = serde_json::to_value(build_request("hello", params)).unwrap();
        assert_eq!(request["inputs"], "hello");
        assert_eq!(request["parameters"]["min_length"], 5);
        assert_eq!(request["parameters"]["max_length"], 15);
        assert_eq!(request["parameters"]["do_sample"], false);
        assert_eq!(request["options"]["wait_for_model"], true);
    }

    #[test]
    fn model_url_joins_endpoint_and_model() {
        let endpoint = Url::parse("https://example.com/models/").unwrap();
        let url = model_url(&endpoint, "t5-small").unwrap();
        assert_eq!(url.as_str(), "https://example.com/models/t5-small");

        assert!(model_url(&endpoint, "/").is_err());
    }

    #[test]
    fn connect_rejects_unusable_token() {
        let config = AppConfig {
            api_token: Some("bad\ntoken".to_string()),
            ..AppConfig::default()
        };
        let err = HostedEngine::connect(&config).unwrap_err();
        assert!(matches!(err, SummarizerError::Startup(_)));
    }

    #[test]
    fn connect_targets_configured_model() {
        let config = AppConfig {
            model_id: "sshleifer/distilbart-cnn-12-6".to_string(),
            ..AppConfig::default()
        };
        let engine = HostedEngine::connect(&config).unwrap();
        assert_eq!(engine.model_id(), "sshleifer/distilbart-cnn-12-6");
        assert_eq!(
            engine.model_url.as_str(),
            "https://api-inference.huggingface.co/models/sshleifer/distilbart-cnn-12-6"
        );
    }
}
