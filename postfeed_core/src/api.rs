use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{Comment, Post};

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Read-only access to the post collection.
///
/// Implementations must be shareable across worker threads: the detail
/// fetch issues the post and comment reads concurrently.
pub trait DataSource: Send + Sync {
    /// Fetches the entire collection in server order.
    fn list_posts(&self) -> Result<Vec<Post>, FetchError>;

    /// Fails with [`FetchError::NotFound`] when no post has `id`.
    fn get_post(&self, id: u64) -> Result<Post, FetchError>;

    /// Returns an empty list for a post without comments.
    fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, FetchError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = sanitize_base_url(base_url.into())?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json()?)
    }

    fn url(&self, path: &str) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|err| FetchError::Unavailable(format!("invalid URL {raw}: {err}")))
    }
}

impl DataSource for ApiClient {
    fn list_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.get_json("/posts")
    }

    fn get_post(&self, id: u64) -> Result<Post, FetchError> {
        self.get_json(&format!("/posts/{id}"))
    }

    fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, FetchError> {
        self.get_json(&format!("/posts/{post_id}/comments"))
    }
}

fn sanitize_base_url(mut base: String) -> Result<String> {
    base = base.trim().to_string();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    let _ = Url::parse(&base).context("invalid base URL")?;
    Ok(base)
}
