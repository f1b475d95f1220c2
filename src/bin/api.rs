use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use summarizer::core::config::AppConfig;
use summarizer::service::SummarizerService;

fn main() -> Result<(), Error> {
    summarizer::setup_logging();

    // The engine loads with a blocking client, so Ready is reached before
    // the async runtime exists.
    let config = AppConfig::from_env().context("loading configuration")?;
    let service = Arc::new(SummarizerService::initialize(&config).context("starting summarizer")?);

    let handler_service = Arc::clone(&service);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    // `service` outlives the runtime; the blocking client must not drop inside it.
    runtime.block_on(lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        summarizer::api::function_handler(Arc::clone(&handler_service), event)
    })))
}
