//! HTTP client construction.
//!
//! One client per run, passed by reference to every component. Each call
//! consumes its response body before returning so the connection goes back
//! to the pool at the end of the call.

use reqwest::Client;

pub fn build_client() -> Result<Client, String> {
    Client::builder()
        .user_agent(concat!("jopleet/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}
