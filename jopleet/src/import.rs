//! Per-URL pipeline: fetch → clean/render → upload images → create note → tag.
//!
//! Each step depends on the previous one: resource ids exist before the body
//! referencing them is rendered, and the note exists before it is tagged.

use joplin_types::CreatedNote;

use crate::config::Config;
use crate::joplin::{JoplinClient, build_note};
use crate::render::{ImageBlock, clean_text, media_filename, render_body};
use crate::twitter::TwitterClient;

/// Outcome of one successful import
#[derive(Debug)]
pub struct Imported {
    pub note: CreatedNote,
    pub images: usize,
    pub tags: usize,
}

pub struct Importer<'a> {
    config: &'a Config,
    client: &'a reqwest::Client,
}

impl<'a> Importer<'a> {
    pub fn new(config: &'a Config, client: &'a reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Import one tweet. Fetch and note-creation failures are returned;
    /// image and tag failures are logged and skipped.
    pub async fn import(&self, url: &str, tags: &[String]) -> Result<Imported, String> {
        let status_id =
            post_id_from_url(url).ok_or_else(|| format!("No status id in URL '{}'", url))?;

        let twitter = TwitterClient::new(&self.config.twitter_api_url, &self.config.twitter, self.client);
        let joplin = JoplinClient::new(&self.config.joplin, self.client);

        let post = twitter.fetch_post(status_id).await?;
        log::debug!(
            "[IMPORT] Status {} by @{} (avatar {:?}), {} media",
            post.id,
            post.author_handle,
            post.author_avatar,
            post.media_urls.len()
        );
        let text = clean_text(&post.text);

        let mut images = ImageBlock::default();
        for media_url in &post.media_urls {
            let filename = media_filename(&post.id, media_url);
            if let Some(resource_id) = joplin.upload_image(&filename, media_url).await {
                images.push(&filename, &resource_id);
            }
        }
        if images.len() < post.media_urls.len() {
            log::warn!(
                "[IMPORT] {} of {} images uploaded for status {}",
                images.len(),
                post.media_urls.len(),
                post.id
            );
        }

        let body = render_body(&post, &text, url, &images);
        let note = build_note(&self.config.joplin.parent_folder, &post, &text, body, url);
        let created = joplin.create_note(&note).await?;

        let tagged = joplin.tag(&created.id, tags).await;

        Ok(Imported {
            note: created,
            images: images.len(),
            tags: tagged,
        })
    }

    /// Import each URL in order and return how many failed.
    ///
    /// A failed URL is logged and the batch moves on, unless `fail_fast` is
    /// set, in which case the remaining URLs are skipped.
    pub async fn import_all(&self, urls: &[String], tags: &[String], fail_fast: bool) -> usize {
        let mut failed = 0;

        for (i, url) in urls.iter().enumerate() {
            match self.import(url, tags).await {
                Ok(imported) => {
                    println!("ID: {}, {}", imported.note.id, imported.note.title);
                    log::info!(
                        "[IMPORT] {} → note {} ({} images, {} tags)",
                        url,
                        imported.note.id,
                        imported.images,
                        imported.tags
                    );
                }
                Err(e) => {
                    log::error!("[IMPORT] {}: {}", url, e);
                    failed += 1;
                    if fail_fast {
                        let remaining = urls.len() - i - 1;
                        if remaining > 0 {
                            log::error!("[IMPORT] --fail-fast: skipping {} remaining URL(s)", remaining);
                        }
                        break;
                    }
                }
            }
        }

        failed
    }
}

/// Last path segment of a status URL; query and fragment are ignored
pub fn post_id_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}
