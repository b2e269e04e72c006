use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::collection::CollectionController;

pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);

/// The last rendered item of one materialization of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    pub item_id: u64,
    pub revision: u64,
}

/// Visibility detection provided by the rendering surface.
///
/// The surface reports visibility of the observed sentinel back through
/// [`ScrollTrigger::notify_visible`], at least once per transition and
/// possibly many times.
pub trait VisibilityObserver {
    fn observe(&mut self, sentinel: Sentinel);
    fn detach(&mut self);
}

/// Calls `load_more` on the collection when the last rendered item becomes
/// visible, coalescing bursts of visibility signals into one call.
#[derive(Debug)]
pub struct ScrollTrigger<O> {
    observer: O,
    current: Option<Sentinel>,
    pending: Option<Pending>,
    debounce: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Instant,
    revision: u64,
}

impl<O: VisibilityObserver> ScrollTrigger<O> {
    pub fn new(observer: O, debounce: Duration) -> Self {
        Self {
            observer,
            current: None,
            pending: None,
            debounce,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn sentinel(&self) -> Option<Sentinel> {
        self.current
    }

    /// Re-attaches observation to the collection's last item if it changed.
    /// There is nothing to observe while loading or when no page is left.
    pub fn sync(&mut self, collection: &CollectionController) {
        let next = if collection.is_loading() || !collection.has_more() {
            None
        } else {
            collection.items().last().map(|post| Sentinel {
                item_id: post.id,
                revision: collection.revision(),
            })
        };
        if next == self.current {
            return;
        }
        self.pending = None;
        if self.current.take().is_some() {
            self.observer.detach();
        }
        if let Some(sentinel) = next {
            trace!(item_id = sentinel.item_id, revision = sentinel.revision, "observing sentinel");
            self.observer.observe(sentinel);
            self.current = Some(sentinel);
        }
    }

    /// Records that the observed sentinel is visible. Signals that arrive
    /// while a call is already pending are folded into it.
    pub fn notify_visible(&mut self, now: Instant) {
        let Some(sentinel) = self.current else {
            return;
        };
        if self.pending.is_some() {
            return;
        }
        self.pending = Some(Pending {
            due: now + self.debounce,
            revision: sentinel.revision,
        });
    }

    /// Fires the pending call once its delay has elapsed. A call scheduled
    /// against an older materialization is dropped instead.
    pub fn poll(&mut self, now: Instant, collection: &mut CollectionController) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        self.pending = None;
        if pending.revision != collection.revision() {
            debug!(
                scheduled = pending.revision,
                current = collection.revision(),
                "dropping stale load-more"
            );
            return false;
        }
        if collection.is_loading() || !collection.has_more() {
            return false;
        }
        let grew = collection.load_more();
        self.sync(collection);
        grew
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|pending| pending.due.saturating_duration_since(now))
    }
}
