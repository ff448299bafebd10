use std::sync::Mutex;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::{record_outcome, RequestId},
    models::{LookupOutcome, LookupStage, MovieMetadata, Platform},
    services::OutcomeReporter,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub title: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MovieView {
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

impl From<&MovieMetadata> for MovieView {
    fn from(metadata: &MovieMetadata) -> Self {
        Self {
            title: metadata.title.clone(),
            year: metadata.year.clone(),
            poster_url: metadata.display_poster_url().to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PlatformView {
    pub name: &'static str,
    pub icon_url: &'static str,
}

impl From<Platform> for PlatformView {
    fn from(platform: Platform) -> Self {
        Self {
            name: platform.display_name(),
            icon_url: platform.icon_url(),
        }
    }
}

/// Rendered form of a [`LookupOutcome`]
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeView {
    Found {
        movie: MovieView,
        platforms: Vec<PlatformView>,
    },
    MetadataNotFound {
        message: &'static str,
    },
    NoAvailabilityData {
        movie: MovieView,
        message: &'static str,
    },
    RequestFailed {
        stage: LookupStage,
        message: &'static str,
    },
}

impl From<LookupOutcome> for OutcomeView {
    fn from(outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Found {
                metadata,
                platforms,
            } => OutcomeView::Found {
                movie: MovieView::from(&metadata),
                platforms: platforms.into_iter().map(PlatformView::from).collect(),
            },
            LookupOutcome::MetadataNotFound => OutcomeView::MetadataNotFound {
                message: "Movie not found.",
            },
            LookupOutcome::NoAvailabilityData { metadata } => OutcomeView::NoAvailabilityData {
                movie: MovieView::from(&metadata),
                message: "No streaming info available",
            },
            LookupOutcome::RequestFailed { stage } => OutcomeView::RequestFailed {
                stage,
                message: match stage {
                    LookupStage::Metadata => "Error fetching movie data.",
                    LookupStage::Availability => "Error fetching streaming data.",
                },
            },
        }
    }
}

/// Holds the outcome of a single search until the handler renders it
#[derive(Default)]
struct CapturedOutcome(Mutex<Option<LookupOutcome>>);

impl CapturedOutcome {
    fn take(&self) -> Option<LookupOutcome> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl OutcomeReporter for CapturedOutcome {
    fn on_outcome(&self, outcome: LookupOutcome) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(outcome);
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Lists the platforms the UI can display
pub async fn list_platforms() -> Json<Vec<PlatformView>> {
    Json(Platform::ALL.into_iter().map(PlatformView::from).collect())
}

/// Runs a lookup for one title
///
/// Answers 409 while another search is still in flight.
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<OutcomeView>> {
    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        "Processing search request"
    );

    let reporter = CapturedOutcome::default();
    state.orchestrator.search(&request.title, &reporter).await?;

    let outcome = reporter
        .take()
        .ok_or_else(|| AppError::Internal("Search finished without an outcome".to_string()))?;

    record_outcome(outcome.kind());
    tracing::info!(
        request_id = %request_id,
        outcome = outcome.kind(),
        "Search request completed"
    );

    Ok(Json(OutcomeView::from(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PLACEHOLDER_POSTER_URL;

    fn metadata(poster: &str) -> MovieMetadata {
        MovieMetadata {
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: poster.to_string(),
        }
    }

    #[test]
    fn test_found_view_serialization() {
        let view = OutcomeView::from(LookupOutcome::Found {
            metadata: metadata("https://img/inception.jpg"),
            platforms: vec![Platform::Netflix],
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["movie"]["title"], "Inception");
        assert_eq!(json["movie"]["year"], "2010");
        assert_eq!(json["platforms"][0]["name"], "Netflix");
        assert_eq!(json["platforms"][0]["icon_url"], Platform::Netflix.icon_url());
    }

    #[test]
    fn test_no_availability_view_uses_placeholder_poster() {
        let view = OutcomeView::from(LookupOutcome::NoAvailabilityData {
            metadata: metadata("N/A"),
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "no_availability_data");
        assert_eq!(json["movie"]["poster_url"], PLACEHOLDER_POSTER_URL);
        assert_eq!(json["message"], "No streaming info available");
    }

    #[test]
    fn test_request_failed_view_carries_stage() {
        let view = OutcomeView::from(LookupOutcome::RequestFailed {
            stage: LookupStage::Availability,
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "request_failed");
        assert_eq!(json["stage"], "availability");
    }

    #[test]
    fn test_captured_outcome_is_taken_once() {
        let captured = CapturedOutcome::default();
        captured.on_outcome(LookupOutcome::MetadataNotFound);

        assert_eq!(captured.take(), Some(LookupOutcome::MetadataNotFound));
        assert_eq!(captured.take(), None);
    }
}
