use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use log::error;
use postfeed_core::comments::CommentsTicket;
use postfeed_core::detail::{fetch_detail, DetailTicket};
use postfeed_core::DataSource;

use super::messages::AppMessage;

pub fn load_posts(source: Arc<dyn DataSource>, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let result = source.list_posts();
        if tx.send(AppMessage::PostsLoaded(result)).is_err() {
            error!("failed to send PostsLoaded message");
        }
    });
}

pub fn load_detail(source: Arc<dyn DataSource>, tx: Sender<AppMessage>, ticket: DetailTicket) {
    thread::spawn(move || {
        let result = fetch_detail(source.as_ref(), ticket.post_id);
        if tx.send(AppMessage::DetailLoaded { ticket, result }).is_err() {
            error!("failed to send DetailLoaded message");
        }
    });
}

pub fn load_comments(source: Arc<dyn DataSource>, tx: Sender<AppMessage>, ticket: CommentsTicket) {
    thread::spawn(move || {
        let result = source.list_comments(ticket.post_id);
        if tx.send(AppMessage::CommentsLoaded { ticket, result }).is_err() {
            error!("failed to send CommentsLoaded message");
        }
    });
}
