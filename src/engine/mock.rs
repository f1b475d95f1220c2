//! In-process engine for tests and local wiring.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GenerationParams, SummarizationEngine};
use crate::core::models::Candidate;
use crate::errors::SummarizerError;

#[derive(Debug)]
enum Behavior {
    Fixed(Vec<Candidate>),
    Fail(String),
    LeadingWords,
}

/// Scripted [`SummarizationEngine`] that records how it was called.
#[derive(Debug)]
pub struct MockEngine {
    behavior: Behavior,
    calls: AtomicUsize,
    last_params: Mutex<Option<GenerationParams>>,
    last_input: Mutex<Option<String>>,
}

impl MockEngine {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
            last_input: Mutex::new(None),
        }
    }

    /// Always returns these candidates, in order.
    #[must_use]
    pub fn with_candidates<I, S>(summaries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_behavior(Behavior::Fixed(
            summaries.into_iter().map(Candidate::new).collect(),
        ))
    }

    /// Fails every generation with an inference error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// Returns one candidate made of the input's first `max_length` words,
    /// padded with `"."` tokens up to `min_length`. One word counts as one
    /// generation unit.
    #[must_use]
    pub fn leading_words() -> Self {
        Self::with_behavior(Behavior::LeadingWords)
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn last_params(&self) -> Option<GenerationParams> {
        *self.last_params.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn last_input(&self) -> Option<String> {
        self.last_input
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl SummarizationEngine for MockEngine {
    fn generate(
        &self,
        text: &str,
        params: GenerationParams,
    ) -> Result<Vec<Candidate>, SummarizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(params);
        *self.last_input.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(text.to_string());

        match &self.behavior {
            Behavior::Fixed(candidates) => Ok(candidates.clone()),
            Behavior::Fail(message) => Err(SummarizerError::Inference(message.clone())),
            Behavior::LeadingWords => {
                let mut words: Vec<&str> = text
                    .split_whitespace()
                    .take(params.max_length() as usize)
                    .collect();
                while words.len() < params.min_length() as usize {
                    words.push(".");
                }
                Ok(vec![Candidate::new(words.join(" "))])
            }
        }
    }
}
