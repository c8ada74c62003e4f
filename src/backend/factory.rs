//! Backend factory for creating the backend instance from configuration.

use anyhow::{anyhow, Result};
use std::sync::Arc;

use super::{Backend, HttpBackend};
use crate::config::Config;

/// Create the backend described by the configuration.
///
/// # Errors
/// Returns error if the server URL is empty or the HTTP client cannot be built
pub fn create_backend(config: &Config) -> Result<Arc<dyn Backend>> {
    let url = config.server.url.trim();
    if url.is_empty() {
        return Err(anyhow!("No server URL configured"));
    }

    let backend = HttpBackend::new(url, &config.server.api_key, config.ui.request_timeout())
        .map_err(|e| anyhow!("Failed to create backend for {}: {}", url, e))?;
    Ok(Arc::new(backend))
}
