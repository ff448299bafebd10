//! External movie-data providers
//!
//! Two services are involved: OMDb supplies descriptive metadata, and Watchmode
//! supplies both the catalog search (title → Watchmode ID) and the per-title
//! streaming source listing. Each capability sits behind its own trait so the
//! lookup orchestrator can be driven with test doubles stage by stage.

use crate::{
    error::{AppError, AppResult},
    models::{CatalogMatch, MovieMetadata, StreamingSource},
};
use serde::de::DeserializeOwned;

pub mod omdb;
pub mod watchmode;

pub use omdb::OmdbClient;
pub use watchmode::WatchmodeClient;

/// Looks up descriptive metadata by title
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch metadata for a title
    ///
    /// Returns `AppError::NotFound` when the provider answers with a well-formed
    /// negative response, and a transport error for anything else that fails.
    async fn fetch_metadata(&self, title: &str) -> AppResult<MovieMetadata>;
}

/// Maps a title onto the catalog's internal identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogResolver: Send + Sync {
    /// Resolve the first catalog hit for a title
    ///
    /// Returns `AppError::NoMatch` when the search result list is empty or missing.
    async fn resolve_id(&self, title: &str) -> AppResult<CatalogMatch>;
}

/// Lists raw streaming sources for a catalog identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Fetch every source row for a title; an empty list is a valid result
    async fn fetch_sources(&self, internal_id: &str) -> AppResult<Vec<StreamingSource>>;
}

/// Checks the status of a provider response and decodes its JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    provider: &'static str,
) -> AppResult<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            provider = provider,
            status = %status,
            body = %body,
            "External API request failed"
        );
        return Err(AppError::ExternalApi(format!(
            "{} API returned status {}: {}",
            provider, status, body
        )));
    }

    let response_text = response.text().await?;
    tracing::debug!(provider = provider, response = %response_text, "Raw API response");

    serde_json::from_str(&response_text).map_err(|e| {
        tracing::error!(
            provider = provider,
            error = %e,
            response = %response_text,
            "Failed to deserialize API response"
        );
        AppError::ExternalApi(format!("Failed to parse {} response: {}", provider, e))
    })
}

/// Validates a configured base URL up front; a bad one is a configuration error
pub(crate) fn validate_base_url(api_url: &str, provider: &'static str) -> AppResult<()> {
    reqwest::Url::parse(api_url)
        .map(|_| ())
        .map_err(|e| AppError::Internal(format!("Invalid {} API URL {}: {}", provider, api_url, e)))
}
