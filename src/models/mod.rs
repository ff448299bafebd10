use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod platform;

pub use platform::Platform;

/// Shown in place of a poster when OMDb has none
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450.png?text=No+Image";

/// Descriptive metadata for one movie, as returned by OMDb
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieMetadata {
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

impl MovieMetadata {
    /// Poster to render, substituting the placeholder when OMDb has none
    pub fn display_poster_url(&self) -> &str {
        let poster = self.poster_url.trim();
        if poster.is_empty() || poster.eq_ignore_ascii_case("N/A") {
            PLACEHOLDER_POSTER_URL
        } else {
            &self.poster_url
        }
    }
}

/// Watchmode's opaque identifier for a title
///
/// Only meaningful to Watchmode and only used within the lookup that resolved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatch {
    pub internal_id: String,
}

/// One raw availability row; the name may be absent or null
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StreamingSource {
    #[serde(rename = "name", default)]
    pub platform_name: Option<String>,
}

impl StreamingSource {
    pub fn named(name: &str) -> Self {
        Self {
            platform_name: Some(name.to_string()),
        }
    }
}

/// Stage of a lookup whose request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStage {
    Metadata,
    Availability,
}

impl LookupStage {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupStage::Metadata => "metadata",
            LookupStage::Availability => "availability",
        }
    }
}

impl Display for LookupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final result of one search, handed to the presentation layer exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Metadata found and availability listed; `platforms` may be empty
    Found {
        metadata: MovieMetadata,
        platforms: Vec<Platform>,
    },
    /// OMDb answered `Response: "False"`
    MetadataNotFound,
    /// Metadata found but Watchmode has nothing to show for it
    NoAvailabilityData { metadata: MovieMetadata },
    /// A request failed in a way the user should see as an error
    RequestFailed { stage: LookupStage },
}

impl LookupOutcome {
    /// Short label used in logs and in the rendered view
    pub fn kind(&self) -> &'static str {
        match self {
            LookupOutcome::Found { .. } => "found",
            LookupOutcome::MetadataNotFound => "metadata_not_found",
            LookupOutcome::NoAvailabilityData { .. } => "no_availability_data",
            LookupOutcome::RequestFailed { .. } => "request_failed",
        }
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw OMDb response for `?t=<title>`
///
/// `Response` is the literal string "True" or "False"; on "False" the other
/// fields are missing and `Error` explains why. A missing flag reads as "False".
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbResponse {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbResponse {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }

    /// Converts a successful response into metadata; `None` when OMDb said "False"
    pub fn into_metadata(self) -> Option<MovieMetadata> {
        if !self.is_success() {
            return None;
        }

        Some(MovieMetadata {
            title: self.title.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            poster_url: self.poster.unwrap_or_default(),
        })
    }
}

// ============================================================================
// Watchmode API Types
// ============================================================================

/// Watchmode `/search/` response
#[derive(Debug, Deserialize)]
pub struct WatchmodeSearchResponse {
    #[serde(default)]
    pub title_results: Option<Vec<WatchmodeTitleResult>>,
}

/// Watchmode search hit; only the id is used
#[derive(Debug, Deserialize)]
pub struct WatchmodeTitleResult {
    pub id: WatchmodeId,
}

/// Watchmode sends numeric ids, but they are treated as opaque strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WatchmodeId {
    Numeric(u64),
    Text(String),
}

impl Display for WatchmodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchmodeId::Numeric(id) => write!(f, "{}", id),
            WatchmodeId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl WatchmodeSearchResponse {
    /// First search hit, if any; no ranking against the query is done
    pub fn first_match(self) -> Option<CatalogMatch> {
        self.title_results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|result| CatalogMatch {
                internal_id: result.id.to_string(),
            })
    }
}
