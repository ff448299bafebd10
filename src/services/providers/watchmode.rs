//! Watchmode API provider
//!
//! Provides the catalog search and the streaming source listing.
//! Watchmode knows titles by its own numeric IDs, so a title name has to be
//! resolved before sources can be listed.
//!
//! API Flow:
//! 1. Catalog Search: /search/?search_field=name → first hit's Watchmode ID
//! 2. Sources: /title/{watchmode_id}/sources/ → raw source rows

use crate::{
    error::{AppError, AppResult},
    models::{CatalogMatch, StreamingSource, WatchmodeSearchResponse},
    services::providers::{
        read_json, validate_base_url, AvailabilitySource, CatalogResolver,
    },
};
use reqwest::Client as HttpClient;

const PROVIDER: &str = "watchmode";

#[derive(Clone)]
pub struct WatchmodeClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl WatchmodeClient {
    /// Creates a new Watchmode client; `api_url` includes the version segment
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> AppResult<Self> {
        validate_base_url(&api_url, PROVIDER)?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CatalogResolver for WatchmodeClient {
    async fn resolve_id(&self, title: &str) -> AppResult<CatalogMatch> {
        let url = format!("{}/search/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("search_field", "name"),
                ("search_value", title),
            ])
            .send()
            .await?;

        let search_response: WatchmodeSearchResponse = read_json(response, PROVIDER).await?;

        let catalog_match = search_response.first_match().ok_or_else(|| {
            AppError::NoMatch(format!("No Watchmode title found for {}", title))
        })?;

        tracing::info!(
            title = %title,
            watchmode_id = %catalog_match.internal_id,
            provider = PROVIDER,
            "Catalog ID resolved"
        );

        Ok(catalog_match)
    }
}

#[async_trait::async_trait]
impl AvailabilitySource for WatchmodeClient {
    async fn fetch_sources(&self, internal_id: &str) -> AppResult<Vec<StreamingSource>> {
        let url = format!("{}/title/{}/sources/", self.api_url, internal_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        // Null rows are skipped rather than failing the listing
        let rows: Vec<Option<StreamingSource>> = read_json(response, PROVIDER).await?;
        let sources: Vec<StreamingSource> = rows.into_iter().flatten().collect();

        tracing::info!(
            watchmode_id = %internal_id,
            sources = sources.len(),
            provider = PROVIDER,
            "Sources fetched"
        );

        Ok(sources)
    }
}
