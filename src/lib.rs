//! Summarizer - an HTTP inference microservice that turns raw text into a short summary.
//!
//! The service loads a text-summarization model once at startup and reuses it for
//! every request. Requests arrive as HTTP proxy events on AWS Lambda; the body is a
//! JSON string holding the text, and the response body is the summary itself.
//!
//! # Architecture
//!
//! - [`service::SummarizerService`] owns the engine handle and exposes `summarize`
//!   and the async `handle` entry point
//! - [`engine`] defines the engine contract plus the hosted and mock engines
//! - [`api`] adapts Lambda proxy events to the service
//!
//! # Example
//!
//! ```
//! use summarizer::engine::{GenerationParams, MockEngine};
//! use summarizer::service::SummarizerService;
//!
//! let service = SummarizerService::initialize_with(GenerationParams::default(), || {
//!     Ok(MockEngine::with_candidates(["a fox runs"]))
//! })
//! .expect("mock engine always loads");
//!
//! assert_eq!(service.summarize("The quick brown fox").unwrap(), "a fox runs");
//! ```

pub mod api;
pub mod core;
pub mod engine;
pub mod errors;
pub mod service;

pub use errors::SummarizerError;
pub use service::SummarizerService;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once, before the service
/// is initialized.
///
/// # Example
///
/// ```
/// summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
