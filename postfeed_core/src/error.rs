use thiserror::Error;

pub const POSTS_LOAD_FAILED: &str = "Failed to load posts.";
pub const DETAIL_LOAD_FAILED: &str = "Failed to load data. Please try again.";
pub const COMMENTS_LOAD_FAILED: &str = "Failed to load comments.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}
