use postfeed_core::{Sentinel, VisibilityObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Feed,
    Post(u64),
}

/// Remembers which card the feed renderer should test for visibility.
#[derive(Debug, Default)]
pub struct FeedSentinel {
    watched: Option<Sentinel>,
}

impl FeedSentinel {
    pub fn is_watching(&self, post_id: u64) -> bool {
        self.watched.is_some_and(|sentinel| sentinel.item_id == post_id)
    }
}

impl VisibilityObserver for FeedSentinel {
    fn observe(&mut self, sentinel: Sentinel) {
        self.watched = Some(sentinel);
    }

    fn detach(&mut self) {
        self.watched = None;
    }
}
