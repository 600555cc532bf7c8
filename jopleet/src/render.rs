//! Turn a fetched tweet into a Joplin note body.
//!
//! Text cleanup (short link, HTML), title truncation, the fixed Markdown
//! template, and the block of uploaded image references.

use regex::Regex;
use std::sync::LazyLock;

use crate::twitter::Post;

pub const TITLE_MAX_CHARS: usize = 50;
pub const ELLIPSIS: &str = "...";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Twitter appends a t.co permalink to the text of tweets with media
static SHORT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://t\.co/[a-zA-Z0-9]+$").unwrap());

/// Remove a trailing `https://t.co/...` link and the whitespace before it
pub fn strip_short_link(text: &str) -> String {
    SHORT_LINK_RE
        .replace(text.trim_end(), "")
        .trim_end()
        .to_string()
}

/// Drop HTML tags and decode entities (`&amp;` and friends)
pub fn strip_html(text: &str) -> String {
    let fragment = scraper::Html::parse_fragment(text);
    fragment.root_element().text().collect()
}

/// Short link first, then markup
pub fn clean_text(raw: &str) -> String {
    strip_html(&strip_short_link(raw))
}

/// Note title: the text itself up to 50 characters, otherwise the whole
/// words that fit followed by "..."
pub fn truncate_title(text: &str) -> String {
    if text.chars().count() <= TITLE_MAX_CHARS {
        return text.to_string();
    }

    // One extra char so a word ending exactly at the limit survives
    let window: String = text.chars().take(TITLE_MAX_CHARS + 1).collect();
    let mut words: Vec<&str> = window.split(' ').collect();
    words.pop();

    format!("{}{}", words.join(" "), ELLIPSIS)
}

/// `tweet_<id>-<basename>`, unique across tweets in one run
pub fn media_filename(post_id: &str, media_url: &str) -> String {
    let basename = media_url.rsplit('/').next().unwrap_or(media_url);
    format!("tweet_{}-{}", post_id, basename)
}

/// Markdown references to uploaded resources, in upload order
#[derive(Debug, Clone, Default)]
pub struct ImageBlock {
    refs: Vec<String>,
}

impl ImageBlock {
    pub fn push(&mut self, filename: &str, resource_id: &str) {
        self.refs.push(format!("![{}](:/{})", filename, resource_id));
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn render(&self) -> String {
        self.refs.iter().map(|r| format!("{}\n\n", r)).collect()
    }
}

/// Fill the note template
pub fn render_body(post: &Post, text: &str, url: &str, images: &ImageBlock) -> String {
    let date = post.created_at.naive_utc().format(DATE_FORMAT);
    format!(
        "{text}\n\n{images}\n\n* * *\n{name} (@{handle})\n[{date}]({url})\n",
        text = text,
        images = images.render(),
        name = post.author_name,
        handle = post.author_handle,
        date = date,
        url = url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn post() -> Post {
        Post {
            id: "1323627129914421249".to_string(),
            created_at: DateTime::parse_from_rfc3339("2020-11-03T14:37:00+01:00").unwrap(),
            author_name: "Jan-Piet Mens".to_string(),
            author_handle: "jpmens".to_string(),
            author_avatar: None,
            text: "Hello world https://t.co/abc123".to_string(),
            coordinates: None,
            media_urls: vec![],
        }
    }

    #[test]
    fn test_strip_short_link() {
        assert_eq!(strip_short_link("Hello world https://t.co/abc123"), "Hello world");
        assert_eq!(strip_short_link("Hello world https://t.co/abc123\n"), "Hello world");
        assert_eq!(strip_short_link("no link here"), "no link here");
    }

    #[test]
    fn test_short_link_only_stripped_at_end() {
        let text = "see https://t.co/abc123 for details";
        assert_eq!(strip_short_link(text), text);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("Fish &amp; chips &lt;3"), "Fish & chips <3");
        assert_eq!(strip_html("<b>bold</b> move"), "bold move");
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("R&amp;D rocks https://t.co/Zz9"), "R&D rocks");
    }

    #[test]
    fn test_title_short_text_unchanged() {
        let text = "exactly fifty characters long, padded out to fifty";
        assert_eq!(text.chars().count(), 50);
        assert_eq!(truncate_title(text), text);
        assert_eq!(truncate_title("short"), "short");
    }

    #[test]
    fn test_title_truncated_at_word_boundary() {
        let text = "The quick brown fox jumps over the lazy dog and keeps on running";
        let title = truncate_title(text);
        assert_eq!(title, "The quick brown fox jumps over the lazy dog and...");

        let prefix = title.strip_suffix(ELLIPSIS).unwrap();
        assert!(text.starts_with(prefix));
        // next char in the source is a space, so no word was cut
        assert_eq!(text[prefix.len()..].chars().next(), Some(' '));
    }

    #[test]
    fn test_title_word_ending_at_limit_kept() {
        // 50 chars then a space
        let text = "aaaaaaaaa bbbbbbbbb ccccccccc ddddddddd eeeeeeeeee fff";
        assert_eq!(
            truncate_title(text),
            "aaaaaaaaa bbbbbbbbb ccccccccc ddddddddd eeeeeeeeee..."
        );
    }

    #[test]
    fn test_title_counts_chars_not_bytes() {
        let text = "ü".repeat(60);
        // no space in the window: nothing but the marker remains
        assert_eq!(truncate_title(&text), ELLIPSIS);
        assert_eq!(truncate_title(&"ü".repeat(50)), "ü".repeat(50));
    }

    #[test]
    fn test_media_filename() {
        assert_eq!(
            media_filename("42", "http://pbs.twimg.com/media/ElqG2.jpg"),
            "tweet_42-ElqG2.jpg"
        );
    }

    #[test]
    fn test_image_block_keeps_order() {
        let mut block = ImageBlock::default();
        block.push("tweet_1-a.jpg", "r1");
        block.push("tweet_1-c.jpg", "r3");
        assert!(ImageBlock::default().is_empty());
        assert!(!block.is_empty());
        assert_eq!(block.len(), 2);
        assert_eq!(
            block.render(),
            "![tweet_1-a.jpg](:/r1)\n\n![tweet_1-c.jpg](:/r3)\n\n"
        );
    }

    #[test]
    fn test_render_body() {
        let post = post();
        let text = clean_text(&post.text);
        let mut images = ImageBlock::default();
        images.push("tweet_1-a.jpg", "r1");
        let url = "https://twitter.com/jpmens/status/1323627129914421249";

        let body = render_body(&post, &text, url, &images);
        assert_eq!(
            body,
            "Hello world\n\n![tweet_1-a.jpg](:/r1)\n\n\n\n* * *\n\
             Jan-Piet Mens (@jpmens)\n\
             [2020-11-03 13:37:00](https://twitter.com/jpmens/status/1323627129914421249)\n"
        );
        assert!(!body.contains("t.co"));
    }

    #[test]
    fn test_render_body_without_images() {
        let post = post();
        let body = render_body(&post, "Hello world", "u", &ImageBlock::default());
        assert!(body.starts_with("Hello world\n\n\n\n* * *\n"));
        assert!(!body.contains("!["));
    }
}
