use tracing::{debug, error};

use crate::api::DataSource;
use crate::error::{FetchError, COMMENTS_LOAD_FAILED};
use crate::models::Comment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentsTicket {
    pub post_id: u64,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentsState {
    Loading,
    Ready(Vec<Comment>),
    Failed(String),
}

/// Loads the comments of a single post for the quick-view modal.
#[derive(Debug, Default)]
pub struct CommentsController {
    open: Option<(u64, CommentsState)>,
    generation: u64,
}

impl CommentsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, post_id: u64) -> CommentsTicket {
        self.generation += 1;
        self.open = Some((post_id, CommentsState::Loading));
        CommentsTicket {
            post_id,
            generation: self.generation,
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn complete(
        &mut self,
        ticket: CommentsTicket,
        result: Result<Vec<Comment>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation || self.open.is_none() {
            debug!(post_id = ticket.post_id, "discarding stale comments response");
            return false;
        }
        let state = match result {
            Ok(comments) => CommentsState::Ready(comments),
            Err(err) => {
                error!(post_id = ticket.post_id, error = %err, "failed to load comments");
                CommentsState::Failed(COMMENTS_LOAD_FAILED.to_string())
            }
        };
        self.open = Some((ticket.post_id, state));
        true
    }

    pub fn load(&mut self, source: &dyn DataSource, post_id: u64) {
        let ticket = self.open(post_id);
        self.complete(ticket, source.list_comments(post_id));
    }

    pub fn post_id(&self) -> Option<u64> {
        self.open.as_ref().map(|(post_id, _)| *post_id)
    }

    pub fn state(&self) -> Option<&CommentsState> {
        self.open.as_ref().map(|(_, state)| state)
    }
}
