use serde::{Deserialize, Serialize};

/// One generation returned by the summarization engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub summary_text: String,
}

impl Candidate {
    #[must_use]
    pub fn new(summary_text: impl Into<String>) -> Self {
        Self {
            summary_text: summary_text.into(),
        }
    }
}

/// Selects the first candidate's summary text and ignores the rest.
pub fn first_summary(candidates: Vec<Candidate>) -> Option<String> {
    candidates.into_iter().next().map(|c| c.summary_text)
}
