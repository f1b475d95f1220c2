//! The summarization service: one loaded engine, reused for every request.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::core::models::first_summary;
use crate::engine::{GenerationParams, HostedEngine, SummarizationEngine};
use crate::errors::SummarizerError;

/// A Ready summarization service.
///
/// A value of this type only exists once the engine has been acquired, so
/// anything that needs a service to serve requests is gated on startup
/// having succeeded.
pub struct SummarizerService {
    engine: Arc<dyn SummarizationEngine>,
    params: GenerationParams,
}

impl std::fmt::Debug for SummarizerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerService")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl SummarizerService {
    /// Loads the hosted engine described by `config`.
    ///
    /// Blocking; call it before any async runtime is started.
    ///
    /// # Errors
    ///
    /// Returns the startup failure if the engine cannot be acquired.
    pub fn initialize(config: &AppConfig) -> Result<Self, SummarizerError> {
        info!(model_id = %config.model_id, endpoint = %config.endpoint, "Loading summarization engine");
        Self::initialize_with(config.params, || HostedEngine::load(config))
    }

    /// Acquires the engine through `load`, exactly once.
    ///
    /// # Errors
    ///
    /// Returns whatever `load` fails with; no service is produced.
    pub fn initialize_with<E, F>(params: GenerationParams, load: F) -> Result<Self, SummarizerError>
    where
        E: SummarizationEngine + 'static,
        F: FnOnce() -> Result<E, SummarizerError>,
    {
        let engine = load().map_err(|e| {
            error!("Engine startup failed: {}", e);
            e
        })?;
        Ok(Self::with_engine(Arc::new(engine), params))
    }

    /// Wraps an already-acquired engine handle.
    ///
    /// The caller may keep clones of `engine`; this is the hook tests use to
    /// inspect a mock after handing it over. Production startup goes through
    /// [`Self::initialize`], where the service holds the only handle.
    #[must_use]
    pub fn with_engine(engine: Arc<dyn SummarizationEngine>, params: GenerationParams) -> Self {
        Self { engine, params }
    }

    #[must_use]
    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Summarizes `text` with the configured length bounds. Blocking.
    ///
    /// The text goes to the engine as-is, empty or not.
    ///
    /// # Errors
    ///
    /// Propagates engine failures unchanged, and fails with
    /// [`SummarizerError::Inference`] if the engine returns no candidates.
    pub fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        run_inference(self.engine.as_ref(), text, self.params)
    }

    /// Decodes a request body (a JSON string) and summarizes it.
    ///
    /// Inference runs on the blocking pool so the runtime's worker threads
    /// stay free for other requests.
    ///
    /// # Errors
    ///
    /// [`SummarizerError::Decode`] if the body is not a JSON string, in which
    /// case the engine is never called; otherwise any inference failure.
    #[tracing::instrument(level = "info", skip(self, body), fields(body_bytes = body.len()))]
    pub async fn handle(&self, body: &str) -> Result<String, SummarizerError> {
        let text = decode_body(body)?;
        #[cfg(feature = "debug-logs")]
        info!("Decoded request text: {:?}", text);

        let engine = Arc::clone(&self.engine);
        let params = self.params;
        tokio::task::spawn_blocking(move || run_inference(engine.as_ref(), &text, params))
            .await
            .map_err(|e| SummarizerError::Inference(format!("inference task failed: {}", e)))?
    }
}

/// Decodes the request payload: the body must be a single JSON string value.
///
/// # Errors
///
/// Returns [`SummarizerError::Decode`] for invalid JSON or any non-string value.
pub fn decode_body(body: &str) -> Result<String, SummarizerError> {
    serde_json::from_str::<String>(body).map_err(|e| SummarizerError::Decode(e.to_string()))
}

fn run_inference(
    engine: &dyn SummarizationEngine,
    text: &str,
    params: GenerationParams,
) -> Result<String, SummarizerError> {
    let started = Instant::now();
    let candidates = engine.generate(text, params)?;
    let candidate_count = candidates.len();
    let summary = first_summary(candidates)
        .ok_or_else(|| SummarizerError::Inference("engine returned no candidates".to_string()))?;

    info!(
        input_chars = text.chars().count(),
        candidate_count,
        summary_chars = summary.chars().count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Summary generated"
    );
    Ok(summary)
}
