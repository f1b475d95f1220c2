//! Summarization engines
//!
//! The service talks to its model through [`SummarizationEngine`]. The
//! production engine is [`HostedEngine`]; [`MockEngine`] is an in-process
//! stand-in for tests.

pub mod hosted;
pub mod mock;

use crate::core::config::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use crate::core::models::Candidate;
use crate::errors::SummarizerError;

pub use hosted::HostedEngine;
pub use mock::MockEngine;

/// Output length bounds, in the engine's generation units (tokens).
///
/// Always satisfies `min_length <= max_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    min_length: u32,
    max_length: u32,
}

impl GenerationParams {
    pub fn new(min_length: u32, max_length: u32) -> Result<Self, SummarizerError> {
        if min_length > max_length {
            return Err(SummarizerError::Config(format!(
                "min_length ({}) exceeds max_length ({})",
                min_length, max_length
            )));
        }
        Ok(Self {
            min_length,
            max_length,
        })
    }

    #[must_use]
    pub fn min_length(&self) -> u32 {
        self.min_length
    }

    #[must_use]
    pub fn max_length(&self) -> u32 {
        self.max_length
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// A loaded summarization model.
///
/// `generate` is blocking. Implementations must tolerate concurrent calls;
/// the service does no locking around them.
pub trait SummarizationEngine: Send + Sync {
    /// Runs one generation and returns the candidates in the engine's order.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::Inference`] (or a transport error) when the
    /// engine cannot produce a result for `text`.
    fn generate(
        &self,
        text: &str,
        params: GenerationParams,
    ) -> Result<Vec<Candidate>, SummarizerError>;
}
