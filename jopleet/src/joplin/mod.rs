//! Destination side: notes, resources and tags in a Joplin notebook.

pub mod client;

pub use client::JoplinClient;

use std::collections::HashMap;

use joplin_types::NewNote;

use crate::render::truncate_title;
use crate::twitter::Post;

/// Assemble the note for a post; location is attached only when the tweet
/// carried coordinates.
pub fn build_note(parent_folder: &str, post: &Post, text: &str, body: String, url: &str) -> NewNote {
    let note = NewNote {
        parent_id: parent_folder.to_string(),
        is_todo: 0,
        title: truncate_title(text),
        body,
        author: post.author_handle.clone(),
        source_url: url.to_string(),
        latitude: None,
        longitude: None,
        altitude: None,
    };

    match post.coordinates {
        Some((lon, lat)) => note.with_location(lon, lat),
        None => note,
    }
}

/// Requested names that exist in `known`, paired with their ids, in
/// request order
pub fn requested_tag_ids<'a>(
    known: &'a HashMap<String, String>,
    names: &'a [String],
) -> Vec<(&'a str, &'a str)> {
    names
        .iter()
        .filter_map(|name| match known.get(name) {
            Some(id) => Some((name.as_str(), id.as_str())),
            None => {
                log::debug!("[JOPLIN] No tag named '{}', skipping", name);
                None
            }
        })
        .collect()
}
