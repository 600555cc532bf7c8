//! Source side: authenticated reads of single tweets.

pub mod client;
pub mod oauth;

pub use client::TwitterClient;

use chrono::{DateTime, FixedOffset};
use twitter_types::Status;

/// Format of `created_at` in v1.1 payloads
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A tweet reduced to what the importer needs
#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub created_at: DateTime<FixedOffset>,
    pub author_name: String,
    pub author_handle: String,
    pub author_avatar: Option<String>,
    pub text: String,
    /// `(longitude, latitude)`
    pub coordinates: Option<(f64, f64)>,
    pub media_urls: Vec<String>,
}

impl Post {
    pub fn from_status(status: Status) -> Result<Self, String> {
        let created_at = DateTime::parse_from_str(&status.created_at, CREATED_AT_FORMAT)
            .map_err(|e| format!("Unparseable created_at '{}': {}", status.created_at, e))?;

        let id = status.id_string();

        let mut media_urls = Vec::new();
        for (i, media) in status.media().iter().enumerate() {
            match &media.media_url {
                Some(url) if !url.is_empty() => media_urls.push(url.clone()),
                _ => log::warn!("[TWITTER] Tweet {} media #{} has no media_url, skipping", id, i),
            }
        }

        Ok(Self {
            coordinates: status.coordinates.as_ref().and_then(|c| c.lon_lat()),
            text: status.body_text().to_string(),
            author_name: status.user.name,
            author_handle: status.user.screen_name,
            author_avatar: status.user.profile_image_url_https,
            created_at,
            media_urls,
            id,
        })
    }
}
