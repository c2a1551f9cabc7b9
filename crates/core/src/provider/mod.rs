pub mod http;
#[cfg(test)]
pub mod scripted;

use crate::config::ServiceConfig;
use crate::service::AnswerService;
use anyhow::{Context, Result};
use tracing::instrument;

/// Builds the answer service described by `config`.
#[instrument(skip(config), fields(endpoint = %config.endpoint))]
pub fn get_answer_service(config: &ServiceConfig) -> Result<Box<dyn AnswerService>> {
    let service = http::HttpAnswerService::from_config(config)
        .context("Failed to initialize answer service")?;
    Ok(Box::new(service))
}
