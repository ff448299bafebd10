use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Streaming platforms the desktop UI knows how to display
///
/// The set is closed: raw availability rows naming any other platform are
/// dropped before they reach the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Netflix")]
    Netflix,
    #[serde(rename = "Hulu")]
    Hulu,
    #[serde(rename = "Prime Video")]
    PrimeVideo,
    #[serde(rename = "Disney+")]
    DisneyPlus,
    #[serde(rename = "MAX")]
    Max,
    #[serde(rename = "Peacock")]
    Peacock,
    #[serde(rename = "Paramount Plus")]
    ParamountPlus,
    #[serde(rename = "AppleTV")]
    AppleTv,
    #[serde(rename = "YouTube")]
    YouTube,
}

impl Platform {
    /// Every allow-listed platform, in display order
    pub const ALL: [Platform; 9] = [
        Platform::Netflix,
        Platform::Hulu,
        Platform::PrimeVideo,
        Platform::DisneyPlus,
        Platform::Max,
        Platform::Peacock,
        Platform::ParamountPlus,
        Platform::AppleTv,
        Platform::YouTube,
    ];

    /// Name exactly as Watchmode reports it in a source row
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Netflix => "Netflix",
            Platform::Hulu => "Hulu",
            Platform::PrimeVideo => "Prime Video",
            Platform::DisneyPlus => "Disney+",
            Platform::Max => "MAX",
            Platform::Peacock => "Peacock",
            Platform::ParamountPlus => "Paramount Plus",
            Platform::AppleTv => "AppleTV",
            Platform::YouTube => "YouTube",
        }
    }

    /// Logo shown next to the platform name
    pub fn icon_url(self) -> &'static str {
        match self {
            Platform::Netflix => "https://static.vecteezy.com/system/resources/thumbnails/019/956/198/small_2x/netflix-transparent-netflix-free-free-png.png",
            Platform::Hulu => "https://uxwing.com/wp-content/themes/uxwing/download/brands-and-social-media/hulu-icon.png",
            Platform::PrimeVideo => "https://seeklogo.com/images/A/amazon-prime-video-logo-6BB6062D90-seeklogo.com.png",
            Platform::DisneyPlus => "https://images.squarespace-cdn.com/content/v1/6481e2427d99a120d7205507/da199d5e-e6ce-48c6-af20-0bb874e27b80/Button_SQUARE.png",
            Platform::Max => "https://logodownload.org/wp-content/uploads/2024/03/max-logo-0.png",
            Platform::Peacock => "https://logodownload.org/wp-content/uploads/2022/12/peacock-logo-0.png",
            Platform::ParamountPlus => "https://logodownload.org/wp-content/uploads/2021/03/paramount-plus-logo-0.png",
            Platform::AppleTv => "https://logodownload.org/wp-content/uploads/2023/05/apple-tv-logo-0.png",
            Platform::YouTube => "https://static.vecteezy.com/system/resources/thumbnails/018/930/575/small_2x/youtube-logo-youtube-icon-transparent-free-png.png",
        }
    }

    /// Exact, case-sensitive lookup by Watchmode source name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.display_name() == name)
    }

    /// The allow-list as a set of names, for the availability filter
    pub fn allow_list() -> HashSet<&'static str> {
        Self::ALL.iter().map(|p| p.display_name()).collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
