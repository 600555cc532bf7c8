//! Wire types for the Twitter v1.1 `statuses/show` endpoint.
//!
//! Only the fields the importer reads are modelled; everything else in the
//! status payload is ignored by serde.

use serde::{Deserialize, Serialize};

// =====================================================
// Status
// =====================================================

/// A status as returned by `statuses/show.json?tweet_mode=extended`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: u64,
    #[serde(default)]
    pub id_str: Option<String>,
    /// e.g. "Wed Oct 10 20:19:24 +0000 2018"
    pub created_at: String,
    /// Untruncated text (present with `tweet_mode=extended`)
    #[serde(default)]
    pub full_text: Option<String>,
    /// Legacy 140-char text (compat mode only)
    #[serde(default)]
    pub text: Option<String>,
    pub user: TwitterUser,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub extended_entities: Option<ExtendedEntities>,
}

impl Status {
    /// The string form of the id (preferred over the numeric one)
    pub fn id_string(&self) -> String {
        self.id_str.clone().unwrap_or_else(|| self.id.to_string())
    }

    /// Full text when available, falling back to the compat-mode text
    pub fn body_text(&self) -> &str {
        self.full_text
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or_default()
    }

    /// Media entries in source order; empty when the status has none
    pub fn media(&self) -> &[Media] {
        self.extended_entities
            .as_ref()
            .map(|e| e.media.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterUser {
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

/// GeoJSON point; `coordinates` is `[longitude, latitude]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, rename = "type")]
    pub point_type: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Coordinates {
    /// `(longitude, latitude)` when the point is well formed
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lon, lat] => Some((*lon, *lat)),
            _ => None,
        }
    }
}

// =====================================================
// Entities
// =====================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtendedEntities {
    #[serde(default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_url_https: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}
