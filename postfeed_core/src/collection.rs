use tracing::{error, info};

use crate::api::DataSource;
use crate::error::{FetchError, POSTS_LOAD_FAILED};
use crate::models::Post;

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What the rendering surface needs for one frame of the feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionView<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub items: &'a [Post],
    pub has_more: bool,
}

/// Owns the fetched posts and derives the filtered, paginated feed.
///
/// The filtered sequence is rebuilt from scratch whenever the post set or the
/// query changes, and the exposed items are always a prefix of it:
/// `items().len() == min(page * page_size, filtered_len)`.
#[derive(Debug)]
pub struct CollectionController {
    page_size: usize,
    phase: Phase,
    error: Option<String>,
    all_posts: Vec<Post>,
    query: String,
    filtered: Vec<Post>,
    page: usize,
    visible: usize,
    revision: u64,
}

impl Default for CollectionController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CollectionController {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            phase: Phase::Idle,
            error: None,
            all_posts: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
            page: 1,
            visible: 0,
            revision: 0,
        }
    }

    /// Fetches the collection once and materializes the first page.
    pub fn initialize(&mut self, source: &dyn DataSource) {
        if self.begin_initialize() {
            self.finish_initialize(source.list_posts());
        }
    }

    /// Marks the initial fetch as in flight. Returns false when a fetch was
    /// already started for this controller, in which case the caller must not
    /// issue another one.
    pub fn begin_initialize(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Loading;
        self.error = None;
        true
    }

    pub fn finish_initialize(&mut self, result: Result<Vec<Post>, FetchError>) {
        match result {
            Ok(posts) => {
                info!(count = posts.len(), "post collection loaded");
                self.all_posts = posts;
                self.phase = Phase::Ready;
            }
            Err(err) => {
                error!(error = %err, "failed to load post collection");
                self.all_posts.clear();
                self.error = Some(POSTS_LOAD_FAILED.to_string());
                self.phase = Phase::Failed;
            }
        }
        self.refilter();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
    }

    /// Materializes the next page. Returns whether the prefix grew.
    pub fn load_more(&mut self) -> bool {
        if self.is_loading() || !self.has_more() {
            return false;
        }
        self.page += 1;
        self.rematerialize();
        true
    }

    pub fn items(&self) -> &[Post] {
        &self.filtered[..self.visible]
    }

    pub fn has_more(&self) -> bool {
        self.filtered.len() > self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_len(&self) -> usize {
        self.all_posts.len()
    }

    /// Bumped every time the exposed prefix is grown or reset.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> CollectionView<'_> {
        CollectionView {
            loading: self.is_loading(),
            error: self.error(),
            items: self.items(),
            has_more: self.has_more(),
        }
    }

    // Filter first, then paginate from page one.
    fn refilter(&mut self) {
        self.filtered = self
            .all_posts
            .iter()
            .filter(|post| matches_query(post, &self.query))
            .cloned()
            .collect();
        self.page = 1;
        self.rematerialize();
    }

    fn rematerialize(&mut self) {
        self.visible = self
            .page
            .saturating_mul(self.page_size)
            .min(self.filtered.len());
        self.revision += 1;
    }
}

/// Case-insensitive substring match against title or body. The empty query
/// matches everything.
pub fn matches_query(post: &Post, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    post.title.to_lowercase().contains(&needle) || post.body.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn posts(count: u64) -> Vec<Post> {
        (1..=count)
            .map(|id| Post {
                id,
                user_id: (id - 1) / 10 + 1,
                title: if id % 7 == 0 {
                    format!("Quia title {id}")
                } else {
                    format!("title {id}")
                },
                body: format!("body {id}"),
            })
            .collect()
    }

    fn ready(count: u64) -> CollectionController {
        let mut controller = CollectionController::new(12);
        assert!(controller.begin_initialize());
        controller.finish_initialize(Ok(posts(count)));
        controller
    }

    fn ids(controller: &CollectionController) -> Vec<u64> {
        controller.items().iter().map(|post| post.id).collect()
    }

    #[test]
    fn matches_title_or_body_ignoring_case() {
        let post = Post {
            id: 1,
            user_id: 1,
            title: "Sunt Aut Facere".into(),
            body: "quia et suscipit".into(),
        };
        assert!(matches_query(&post, ""));
        assert!(matches_query(&post, "aut fa"));
        assert!(matches_query(&post, "QUIA"));
        assert!(!matches_query(&post, "dolorem"));
    }

    #[test]
    fn loading_blocks_pagination() {
        let mut controller = CollectionController::new(12);
        assert!(controller.begin_initialize());
        assert!(controller.is_loading());
        assert!(!controller.load_more());
        assert!(!controller.begin_initialize());
    }

    #[test]
    fn failure_is_terminal_and_empty() {
        let mut controller = CollectionController::new(12);
        controller.begin_initialize();
        controller.finish_initialize(Err(FetchError::Unavailable("down".into())));
        assert_eq!(controller.phase(), Phase::Failed);
        assert_eq!(controller.error(), Some(POSTS_LOAD_FAILED));
        assert!(controller.items().is_empty());
        assert!(!controller.has_more());
        assert!(!controller.begin_initialize());
    }

    #[test]
    fn search_resets_to_first_page() {
        let mut controller = ready(100);
        for _ in 0..4 {
            controller.load_more();
        }
        assert_eq!(controller.items().len(), 60);

        controller.set_search_query("quia");
        assert_eq!(controller.page(), 1);
        assert_eq!(ids(&controller), vec![7, 14, 21, 28, 35, 42, 49, 56, 63, 70, 77, 84]);
        assert!(controller.has_more());

        controller.set_search_query("");
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.items().len(), 12);
        assert_eq!(controller.filtered_len(), 100);
    }

    #[test]
    fn page_size_is_at_least_one() {
        let mut controller = CollectionController::new(0);
        controller.begin_initialize();
        controller.finish_initialize(Ok(posts(3)));
        assert_eq!(controller.page_size(), 1);
        assert_eq!(ids(&controller), vec![1]);
    }

    #[test]
    fn revision_tracks_prefix_changes() {
        let mut controller = ready(30);
        let initial = controller.revision();
        assert!(controller.load_more());
        assert_eq!(controller.revision(), initial + 1);
        controller.set_search_query("title 1");
        assert_eq!(controller.revision(), initial + 2);
        controller.set_search_query("title 1");
        assert_eq!(controller.revision(), initial + 2);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let controller = ready(5);
        let view = controller.snapshot();
        assert!(!view.loading);
        assert_eq!(view.error, None);
        assert_eq!(view.items.len(), 5);
        assert!(!view.has_more);
    }
}
