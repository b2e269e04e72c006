use log::debug;

use super::state::ViewState;
use super::tasks;
use super::PostfeedApp;

impl PostfeedApp {
    pub(super) fn spawn_load_posts(&mut self) {
        if !self.feed.begin_initialize() {
            return;
        }
        tasks::load_posts(self.source.clone(), self.tx.clone());
    }

    pub(super) fn spawn_load_detail(&mut self, post_id: u64) {
        match self.detail.request(post_id) {
            Some(ticket) => tasks::load_detail(self.source.clone(), self.tx.clone(), ticket),
            None => debug!("post {post_id} already loaded"),
        }
    }

    pub(super) fn spawn_reload_detail(&mut self) {
        if let Some(ticket) = self.detail.reload() {
            tasks::load_detail(self.source.clone(), self.tx.clone(), ticket);
        }
    }

    pub(super) fn spawn_open_comments(&mut self, post_id: u64) {
        let ticket = self.comments.open(post_id);
        tasks::load_comments(self.source.clone(), self.tx.clone(), ticket);
    }

    pub(super) fn open_post(&mut self, post_id: u64) {
        self.view = ViewState::Post(post_id);
        self.spawn_load_detail(post_id);
    }

    pub(super) fn show_feed(&mut self) {
        self.view = ViewState::Feed;
    }
}
