//! Typed HTTP client for the Joplin Data API.

use std::collections::HashMap;

use joplin_types::{CreatedNote, CreatedResource, NewNote, ResourceProps, TagNoteRequest, TagPage};
use reqwest::multipart::{Form, Part};

use super::requested_tag_ids;
use crate::config::JoplinConfig;

pub struct JoplinClient<'a> {
    config: &'a JoplinConfig,
    client: &'a reqwest::Client,
}

impl<'a> JoplinClient<'a> {
    pub fn new(config: &'a JoplinConfig, client: &'a reqwest::Client) -> Self {
        Self { config, client }
    }

    /// `{joplin_url}/{path}?token=...`
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}?token={}",
            self.config.url,
            path,
            urlencoding::encode(&self.config.token)
        )
    }

    // ── Resources ───────────────────────────────────────

    /// Download an image and store it as a resource.
    ///
    /// Failures are logged and yield `None`; the caller leaves the image out
    /// of the note instead of giving up on it.
    pub async fn upload_image(&self, filename: &str, media_url: &str) -> Option<String> {
        let bytes = match self.download(media_url).await {
            Ok(b) => b,
            Err(e) => {
                log::error!("[JOPLIN] Skipping image {}: {}", filename, e);
                return None;
            }
        };

        match self.upload_resource(filename, bytes).await {
            Ok(resource_id) => {
                log::info!("[JOPLIN] Uploaded {} as resource {}", filename, resource_id);
                Some(resource_id)
            }
            Err(e) => {
                log::error!("[JOPLIN] Skipping image {}: {}", filename, e);
                None
            }
        }
    }

    /// Unauthenticated GET of the raw image bytes
    async fn download(&self, media_url: &str) -> Result<Vec<u8>, String> {
        log::debug!("[JOPLIN] Downloading media from: {}", media_url);
        let resp = self
            .client
            .get(media_url)
            .send()
            .await
            .map_err(|e| format!("Download {} failed: {}", media_url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Download {} HTTP {}: {}", media_url, status, body));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| format!("Read {} bytes: {}", media_url, e))?;
        Ok(bytes.to_vec())
    }

    pub async fn upload_resource(&self, filename: &str, bytes: Vec<u8>) -> Result<String, String> {
        let props = serde_json::to_string(&ResourceProps {
            title: filename.to_string(),
        })
        .map_err(|e| format!("Encode resource props: {}", e))?;

        let data = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| format!("Invalid MIME type: {}", e))?;
        let props = Part::text(props)
            .mime_str("application/json")
            .map_err(|e| format!("Invalid MIME type: {}", e))?;
        let form = Form::new().part("data", data).part("props", props);

        let resp = self
            .client
            .post(self.endpoint("resources"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("Upload resource failed: {}", e))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(format!("Upload resource HTTP {}: {}", status, body));
        }

        let created: CreatedResource = serde_json::from_str(&body)
            .map_err(|e| format!("Parse resource response: {}", e))?;
        Ok(created.id)
    }

    // ── Notes ───────────────────────────────────────────

    pub async fn create_note(&self, note: &NewNote) -> Result<CreatedNote, String> {
        let resp = self
            .client
            .post(self.endpoint("notes"))
            .header("Accept", "text/plain")
            .json(note)
            .send()
            .await
            .map_err(|e| format!("Create note failed: {}", e))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(format!("Create note HTTP {}: {}", status, body));
        }

        serde_json::from_str(&body).map_err(|e| format!("Parse note response: {}", e))
    }

    // ── Tags ────────────────────────────────────────────

    /// Tag title → id. Only the first page is read.
    pub async fn list_tags(&self) -> Result<HashMap<String, String>, String> {
        let resp = self
            .client
            .get(self.endpoint("tags"))
            .send()
            .await
            .map_err(|e| format!("List tags failed: {}", e))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(format!("List tags HTTP {}: {}", status, body));
        }

        let page: TagPage =
            serde_json::from_str(&body).map_err(|e| format!("Parse tags response: {}", e))?;
        if page.has_more {
            log::warn!(
                "[JOPLIN] Tag list has more than one page; only the first {} tags are matched",
                page.items.len()
            );
        }

        Ok(page.items.into_iter().map(|t| (t.title, t.id)).collect())
    }

    pub async fn tag_note(&self, tag_id: &str, note_id: &str) -> Result<(), String> {
        let resp = self
            .client
            .post(self.endpoint(&format!("tags/{}/notes", tag_id)))
            .header("Accept", "text/plain")
            .json(&TagNoteRequest {
                id: note_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| format!("Tag note failed: {}", e))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(format!(
                "Cannot POST to tag {} for note {}: HTTP {}: {}",
                tag_id, note_id, status, body
            ));
        }
        Ok(())
    }

    /// Attach every known tag in `names` to the note; unknown names are
    /// skipped. Returns how many associations were made.
    pub async fn tag(&self, note_id: &str, names: &[String]) -> usize {
        if names.is_empty() {
            return 0;
        }

        let known = match self.list_tags().await {
            Ok(tags) => tags,
            Err(e) => {
                log::error!("[JOPLIN] Not tagging note {}: {}", note_id, e);
                return 0;
            }
        };

        let mut tagged = 0;
        for (name, tag_id) in requested_tag_ids(&known, names) {
            match self.tag_note(tag_id, note_id).await {
                Ok(()) => {
                    log::info!("[JOPLIN] Tagged note {} with '{}'", note_id, name);
                    tagged += 1;
                }
                Err(e) => log::error!("[JOPLIN] {}", e),
            }
        }
        tagged
    }
}
