use std::env;
use std::time::Duration;

use url::Url;

use crate::engine::GenerationParams;
use crate::errors::SummarizerError;

pub const DEFAULT_MODEL_ID: &str = "t5-small";
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MIN_LENGTH: u32 = 5;
pub const DEFAULT_MAX_LENGTH: u32 = 15;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_id: String,
    pub endpoint: Url,
    pub api_token: Option<String>,
    pub params: GenerationParams,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, SummarizerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing keys fall
    /// back to the deployment defaults; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummarizerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model_id = get("SUMMARIZER_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        let raw_endpoint = get("SUMMARIZER_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(raw_endpoint.trim())
            .map_err(|e| SummarizerError::Config(format!("SUMMARIZER_ENDPOINT: {}", e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SummarizerError::Config(format!(
                "SUMMARIZER_ENDPOINT: unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }

        let min_length = parse_or(get("SUMMARIZER_MIN_LENGTH"), "SUMMARIZER_MIN_LENGTH", DEFAULT_MIN_LENGTH)?;
        let max_length = parse_or(get("SUMMARIZER_MAX_LENGTH"), "SUMMARIZER_MAX_LENGTH", DEFAULT_MAX_LENGTH)?;
        let params = GenerationParams::new(min_length, max_length)?;

        let timeout_secs = parse_or(
            get("SUMMARIZER_TIMEOUT_SECS"),
            "SUMMARIZER_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            model_id,
            endpoint,
            api_token: get("HF_API_TOKEN"),
            params,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("static endpoint url"),
            api_token: None,
            params: GenerationParams::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, SummarizerError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| SummarizerError::Config(format!("{}: {}", key, e))),
        None => Ok(default),
    }
}
