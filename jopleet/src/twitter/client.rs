//! Typed HTTP client for the Twitter v1.1 status API.

use super::Post;
use super::oauth::{TwitterCredentials, generate_oauth_header};
use twitter_types::Status;

pub struct TwitterClient<'a> {
    base_url: String,
    credentials: &'a TwitterCredentials,
    client: &'a reqwest::Client,
}

impl<'a> TwitterClient<'a> {
    pub fn new(
        base_url: &str,
        credentials: &'a TwitterCredentials,
        client: &'a reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
        }
    }

    /// Fetch one tweet with full text and expanded entities
    pub async fn fetch_post(&self, status_id: &str) -> Result<Post, String> {
        let url = format!("{}/statuses/show.json", self.base_url);
        let params = [
            ("id", status_id),
            ("include_entities", "true"),
            ("tweet_mode", "extended"),
        ];
        let auth_header = generate_oauth_header("GET", &url, self.credentials, &params);

        log::info!("[TWITTER] Fetching status {}", status_id);
        let resp = self
            .client
            .get(&url)
            .query(&params)
            .header("Authorization", auth_header)
            .send()
            .await
            .map_err(|e| format!("Fetch status {} failed: {}", status_id, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| format!("Read status {} response: {}", status_id, e))?;

        if !status.is_success() {
            return Err(format!("Fetch status {} HTTP {}: {}", status_id, status, body));
        }

        let parsed: Status = serde_json::from_str(&body)
            .map_err(|e| format!("Parse status {} response: {}", status_id, e))?;

        Post::from_status(parsed)
    }
}
