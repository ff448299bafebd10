//! Movie lookup orchestration
//!
//! A search runs strictly in sequence:
//!
//! 1. OMDb metadata by title. Not found or failed ends the search here.
//! 2. Watchmode catalog search by the same title. Only the first hit is used;
//!    no hit (or a failed search) is reported as "no availability data".
//! 3. Watchmode source listing for that ID.
//! 4. Allow-list filtering of the listed sources.
//!
//! Every path ends in exactly one [`LookupOutcome`], delivered to the
//! presentation layer through [`OutcomeReporter`].

use crate::{
    error::{AppError, AppResult},
    models::{LookupOutcome, LookupStage, MovieMetadata, Platform},
    services::{
        availability::filter_platforms,
        providers::{AvailabilitySource, CatalogResolver, MetadataSource},
    },
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::instrument;

/// Callbacks implemented by the presentation layer
pub trait OutcomeReporter: Send + Sync {
    /// A search was accepted; the trigger should stay disabled until the outcome arrives
    fn on_search_started(&self) {}

    /// The single, final outcome of a search
    fn on_outcome(&self, outcome: LookupOutcome);
}

/// Coordinates the metadata, catalog and availability lookups for one title
#[derive(Clone)]
pub struct LookupOrchestrator {
    metadata: Arc<dyn MetadataSource>,
    catalog: Arc<dyn CatalogResolver>,
    availability: Arc<dyn AvailabilitySource>,
    allow_list: HashSet<&'static str>,
    /// One permit: a search holds it from acceptance until its outcome is reported
    gate: Arc<Semaphore>,
}

impl LookupOrchestrator {
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        catalog: Arc<dyn CatalogResolver>,
        availability: Arc<dyn AvailabilitySource>,
    ) -> Self {
        Self {
            metadata,
            catalog,
            availability,
            allow_list: Platform::allow_list(),
            gate: Arc::new(Semaphore::new(1)),
        }
    }

    /// True while a search started through [`Self::search`] is running
    pub fn is_searching(&self) -> bool {
        self.gate.available_permits() == 0
    }

    /// Runs one search and reports its outcome
    ///
    /// Rejects an empty title with `InvalidInput` and overlapping searches with
    /// `SearchInProgress`; in both cases the reporter is not called. The title
    /// is otherwise passed to the providers exactly as given. Once a
    /// search is accepted the reporter sees `on_search_started` followed by
    /// exactly one `on_outcome`.
    #[instrument(skip(self, reporter))]
    pub async fn search(&self, title: &str, reporter: &dyn OutcomeReporter) -> AppResult<()> {
        if title.is_empty() {
            return Err(AppError::InvalidInput(
                "Search title cannot be empty".to_string(),
            ));
        }

        let _permit = self.gate.clone().try_acquire_owned().map_err(|_| {
            tracing::warn!("Search rejected while another is in flight");
            AppError::SearchInProgress
        })?;

        reporter.on_search_started();
        let outcome = self.lookup(title).await;

        tracing::info!(outcome = outcome.kind(), "Search completed");
        reporter.on_outcome(outcome);

        Ok(())
    }

    /// Resolves a title to its outcome without gating or reporting
    pub async fn lookup(&self, title: &str) -> LookupOutcome {
        let metadata = match self.metadata.fetch_metadata(title).await {
            Ok(metadata) => metadata,
            Err(AppError::NotFound(reason)) => {
                tracing::info!(title = %title, reason = %reason, "Movie not found");
                return LookupOutcome::MetadataNotFound;
            }
            Err(e) => {
                tracing::error!(
                    title = %title,
                    stage = %LookupStage::Metadata,
                    error = %e,
                    "Metadata request failed"
                );
                return LookupOutcome::RequestFailed {
                    stage: LookupStage::Metadata,
                };
            }
        };

        self.lookup_availability(title, metadata).await
    }

    async fn lookup_availability(&self, title: &str, metadata: MovieMetadata) -> LookupOutcome {
        let catalog_match = match self.catalog.resolve_id(title).await {
            Ok(catalog_match) => catalog_match,
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    error = %e,
                    transport = e.is_transport(),
                    "No catalog entry, reporting no availability data"
                );
                return LookupOutcome::NoAvailabilityData { metadata };
            }
        };

        let sources = match self
            .availability
            .fetch_sources(&catalog_match.internal_id)
            .await
        {
            Ok(sources) => sources,
            Err(e) => {
                tracing::error!(
                    title = %title,
                    watchmode_id = %catalog_match.internal_id,
                    stage = %LookupStage::Availability,
                    error = %e,
                    "Availability request failed"
                );
                return LookupOutcome::RequestFailed {
                    stage: LookupStage::Availability,
                };
            }
        };

        if sources.is_empty() {
            tracing::info!(
                watchmode_id = %catalog_match.internal_id,
                "Title has no streaming sources"
            );
            return LookupOutcome::NoAvailabilityData { metadata };
        }

        let platforms: Vec<Platform> = filter_platforms(&sources, &self.allow_list)
            .iter()
            .filter_map(|name| Platform::from_name(name))
            .collect();

        tracing::info!(
            title = %title,
            watchmode_id = %catalog_match.internal_id,
            sources = sources.len(),
            platforms = platforms.len(),
            "Availability resolved"
        );

        LookupOutcome::Found {
            metadata,
            platforms,
        }
    }
}
