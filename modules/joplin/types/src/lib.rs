//! Shared types for the Joplin Data API (notes, resources, tags).

use serde::{Deserialize, Serialize};

/// Altitude sent alongside coordinates; tweets carry none.
pub const DEFAULT_ALTITUDE: &str = "0.0000";

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /notes`
///
/// Joplin rejects numeric geolocation fields, so latitude, longitude and
/// altitude are strings and omitted entirely when the post had no location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub parent_id: String,
    pub is_todo: u8,
    pub title: String,
    pub body: String,
    pub author: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<String>,
}

impl NewNote {
    /// Attach a location; altitude is fixed at [`DEFAULT_ALTITUDE`]
    pub fn with_location(mut self, longitude: f64, latitude: f64) -> Self {
        self.latitude = Some(format!("{:?}", latitude));
        self.longitude = Some(format!("{:?}", longitude));
        self.altitude = Some(DEFAULT_ALTITUDE.to_string());
        self
    }
}

/// JSON `props` part of a multipart `POST /resources`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceProps {
    pub title: String,
}

/// Body of `POST /tags/{tag_id}/notes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagNoteRequest {
    pub id: String,
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedNote {
    pub id: String,
    #[serde(default = "unknown_title")]
    pub title: String,
}

fn unknown_title() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResource {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub title: String,
}

/// One page of `GET /tags`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagPage {
    #[serde(default)]
    pub items: Vec<Tag>,
    #[serde(default)]
    pub has_more: bool,
}
