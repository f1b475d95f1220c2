//! API Lambda handler.
//!
//! Accepts HTTP proxy events (API Gateway or a function URL), hands the body
//! to the [`SummarizerService`] and turns the outcome into a proxy response.

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::{helpers, parsing};
use crate::errors::SummarizerError;
use crate::service::SummarizerService;

/// Lambda entry point bound to a Ready service.
///
/// # Errors
///
/// Never fails at the runtime level; every failure becomes an error response.
#[tracing::instrument(level = "info", skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    service: Arc<SummarizerService>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_payload(&service, &event.payload).await)
}

/// Processes one proxy event payload and returns the proxy response.
pub async fn handle_payload(service: &SummarizerService, payload: &Value) -> Value {
    let trace_id = payload
        .get("headers")
        .and_then(|h| parsing::get_header_value(h, "X-Amzn-Trace-Id"))
        .unwrap_or("");
    info!(xray_trace_id = %trace_id, "Summarization request received");

    let body = match parsing::extract_body(payload) {
        Ok(body) => body,
        Err(e) => {
            error!("Rejected request: {}", e);
            return to_error_response(&e);
        }
    };

    match service.handle(&body).await {
        Ok(summary) => helpers::ok_text(&summary),
        Err(e) => {
            error!("Summarization request failed: {}", e);
            to_error_response(&e)
        }
    }
}

fn to_error_response(error: &SummarizerError) -> Value {
    let status = if error.is_client_error() { 400 } else { 500 };
    helpers::err_response(status, &error.to_string())
}
