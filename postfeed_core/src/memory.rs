use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::DataSource;
use crate::error::FetchError;
use crate::models::{Comment, Post};

/// A [`DataSource`] over a fixed in-memory collection.
///
/// Each operation can be switched to fail, which is how the controllers'
/// error paths are exercised without a network.
#[derive(Debug, Default)]
pub struct MemorySource {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    fail_posts: bool,
    fail_post: bool,
    fail_comments: bool,
    list_calls: AtomicUsize,
}

impl MemorySource {
    pub fn new(posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        Self {
            posts,
            comments,
            ..Default::default()
        }
    }

    pub fn failing_posts(mut self) -> Self {
        self.fail_posts = true;
        self
    }

    pub fn failing_post(mut self) -> Self {
        self.fail_post = true;
        self
    }

    pub fn failing_comments(mut self) -> Self {
        self.fail_comments = true;
        self
    }

    /// Number of `list_posts` calls served so far, failed ones included.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl DataSource for MemorySource {
    fn list_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_posts {
            return Err(FetchError::Unavailable("posts listing disabled".into()));
        }
        Ok(self.posts.clone())
    }

    fn get_post(&self, id: u64) -> Result<Post, FetchError> {
        if self.fail_post {
            return Err(FetchError::Unavailable(format!("post {id} disabled")));
        }
        self.posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("/posts/{id}")))
    }

    fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, FetchError> {
        if self.fail_comments {
            return Err(FetchError::Unavailable(format!(
                "comments for post {post_id} disabled"
            )));
        }
        Ok(self
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }
}
