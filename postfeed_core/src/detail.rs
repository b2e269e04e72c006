use std::thread;

use tracing::{debug, error, info};

use crate::api::DataSource;
use crate::error::{FetchError, DETAIL_LOAD_FAILED};
use crate::models::{Comment, Post};
use crate::translation::Translator;

/// Identifies one detail request. Completions are matched against the
/// controller's latest generation so a slow response for an earlier
/// identifier never replaces a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub post_id: u64,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailData {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub translated_post: Post,
    pub translated_comments: Vec<Comment>,
}

#[derive(Debug, Default)]
enum DetailState {
    #[default]
    Idle,
    Loading,
    Ready(DetailData),
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailView<'a> {
    Idle,
    Loading,
    NotFound,
    Failed(&'a str),
    Ready {
        post: &'a Post,
        comments: &'a [Comment],
        is_translated: bool,
    },
}

#[derive(Debug, Default)]
pub struct DetailController {
    post_id: Option<u64>,
    generation: u64,
    state: DetailState,
    translated: bool,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load for `post_id` unless that identifier is already loading
    /// or loaded. A failed or missing post is fetched again.
    pub fn request(&mut self, post_id: u64) -> Option<DetailTicket> {
        let current = matches!(self.state, DetailState::Loading | DetailState::Ready(_));
        if self.post_id == Some(post_id) && current {
            return None;
        }
        Some(self.start(post_id))
    }

    /// Re-fetches the current identifier from scratch.
    pub fn reload(&mut self) -> Option<DetailTicket> {
        self.post_id.map(|post_id| self.start(post_id))
    }

    fn start(&mut self, post_id: u64) -> DetailTicket {
        self.generation += 1;
        self.post_id = Some(post_id);
        self.state = DetailState::Loading;
        DetailTicket {
            post_id,
            generation: self.generation,
        }
    }

    /// Applies a fetch result. Returns false when the ticket is stale and the
    /// result was discarded.
    pub fn complete(
        &mut self,
        ticket: DetailTicket,
        result: Result<(Post, Vec<Comment>), FetchError>,
        translator: &dyn Translator,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                post_id = ticket.post_id,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale detail response"
            );
            return false;
        }
        self.state = match result {
            Ok((post, comments)) => {
                info!(post_id = post.id, comments = comments.len(), "post detail loaded");
                let translated_post = translator.translate_post(&post);
                let translated_comments = comments
                    .iter()
                    .map(|comment| translator.translate_comment(comment))
                    .collect();
                DetailState::Ready(DetailData {
                    post,
                    comments,
                    translated_post,
                    translated_comments,
                })
            }
            Err(err) if err.is_not_found() => {
                info!(post_id = ticket.post_id, "post not found");
                DetailState::NotFound
            }
            Err(err) => {
                error!(post_id = ticket.post_id, error = %err, "failed to load post detail");
                DetailState::Failed(DETAIL_LOAD_FAILED.to_string())
            }
        };
        true
    }

    /// Requests, fetches and completes in one call.
    pub fn load(&mut self, source: &dyn DataSource, post_id: u64, translator: &dyn Translator) {
        if let Some(ticket) = self.request(post_id) {
            let result = fetch_detail(source, post_id);
            self.complete(ticket, result, translator);
        }
    }

    pub fn toggle_translation(&mut self) {
        self.translated = !self.translated;
    }

    pub fn is_translated(&self) -> bool {
        self.translated
    }

    pub fn post_id(&self) -> Option<u64> {
        self.post_id
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    pub fn data(&self) -> Option<&DetailData> {
        match &self.state {
            DetailState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn view(&self) -> DetailView<'_> {
        match &self.state {
            DetailState::Idle => DetailView::Idle,
            DetailState::Loading => DetailView::Loading,
            DetailState::NotFound => DetailView::NotFound,
            DetailState::Failed(message) => DetailView::Failed(message),
            DetailState::Ready(data) if self.translated => DetailView::Ready {
                post: &data.translated_post,
                comments: &data.translated_comments,
                is_translated: true,
            },
            DetailState::Ready(data) => DetailView::Ready {
                post: &data.post,
                comments: &data.comments,
                is_translated: false,
            },
        }
    }
}

/// Fetches a post and its comments concurrently. Nothing is returned unless
/// both reads succeed; a missing post wins over any comment failure.
pub fn fetch_detail(
    source: &dyn DataSource,
    post_id: u64,
) -> Result<(Post, Vec<Comment>), FetchError> {
    let (post, comments) = thread::scope(|scope| {
        let comments = scope.spawn(|| source.list_comments(post_id));
        let post = source.get_post(post_id);
        let comments = comments.join().unwrap_or_else(|_| {
            Err(FetchError::Unavailable(format!(
                "comments fetch for post {post_id} panicked"
            )))
        });
        (post, comments)
    });
    Ok((post?, comments?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::PhraseTable;
    use pretty_assertions::assert_eq;

    fn post(id: u64) -> Post {
        Post {
            id,
            user_id: 1,
            title: "quia est".into(),
            body: "et dolor".into(),
        }
    }

    #[test]
    fn stale_completion_is_discarded() {
        let table = PhraseTable::builtin();
        let mut detail = DetailController::new();
        let first = detail.request(1).expect("first ticket");
        let second = detail.request(2).expect("second ticket");

        assert!(detail.complete(second, Ok((post(2), Vec::new())), &table));
        assert!(!detail.complete(first, Ok((post(1), Vec::new())), &table));
        assert_eq!(detail.data().map(|data| data.post.id), Some(2));
    }

    #[test]
    fn same_identifier_is_not_refetched() {
        let mut detail = DetailController::new();
        assert!(detail.request(3).is_some());
        assert!(detail.request(3).is_none());
        let reload = detail.reload().expect("reload ticket");
        assert_eq!(reload.generation, 2);
    }

    #[test]
    fn failed_identifier_is_fetched_again() {
        let table = PhraseTable::builtin();
        let mut detail = DetailController::new();
        let ticket = detail.request(8).expect("ticket");
        detail.complete(ticket, Err(FetchError::NotFound("/posts/8".into())), &table);
        assert_eq!(detail.view(), DetailView::NotFound);
        assert!(detail.request(8).is_some());
    }

    #[test]
    fn toggle_swaps_views_without_touching_data() {
        let table = PhraseTable::builtin();
        let mut detail = DetailController::new();
        let ticket = detail.request(1).expect("ticket");
        detail.complete(ticket, Ok((post(1), Vec::new())), &table);
        let before = detail.data().cloned();

        detail.toggle_translation();
        match detail.view() {
            DetailView::Ready { post, is_translated, .. } => {
                assert!(is_translated);
                assert_eq!(post.title, "потому что есть");
            }
            other => panic!("unexpected view {other:?}"),
        }

        detail.toggle_translation();
        match detail.view() {
            DetailView::Ready { post, is_translated, .. } => {
                assert!(!is_translated);
                assert_eq!(post.title, "quia est");
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert_eq!(detail.data().cloned(), before);
    }

    #[test]
    fn generic_failure_hides_details() {
        let table = PhraseTable::builtin();
        let mut detail = DetailController::new();
        let ticket = detail.request(1).expect("ticket");
        detail.complete(
            ticket,
            Err(FetchError::Status {
                status: 502,
                url: "http://example.test/posts/1".into(),
            }),
            &table,
        );
        assert_eq!(detail.view(), DetailView::Failed(DETAIL_LOAD_FAILED));
    }
}
