use std::sync::Arc;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        providers::{AvailabilitySource, CatalogResolver, MetadataSource, OmdbClient, WatchmodeClient},
        LookupOrchestrator,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: LookupOrchestrator,
}

impl AppState {
    /// Wraps an already-built orchestrator
    pub fn new(orchestrator: LookupOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Builds the OMDb and Watchmode clients from configuration
    ///
    /// Both clients share one HTTP connection pool.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::new();

        let omdb = OmdbClient::new(
            http_client.clone(),
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
        )?;
        let watchmode = Arc::new(WatchmodeClient::new(
            http_client,
            config.watchmode_api_key.clone(),
            config.watchmode_api_url.clone(),
        )?);

        let metadata: Arc<dyn MetadataSource> = Arc::new(omdb);
        let catalog: Arc<dyn CatalogResolver> = watchmode.clone();
        let availability: Arc<dyn AvailabilitySource> = watchmode;

        Ok(Self::new(LookupOrchestrator::new(
            metadata,
            catalog,
            availability,
        )))
    }
}
