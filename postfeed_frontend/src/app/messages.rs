use log::debug;
use postfeed_core::comments::CommentsTicket;
use postfeed_core::detail::DetailTicket;
use postfeed_core::{Comment, FetchError, Post};

use super::PostfeedApp;

pub enum AppMessage {
    PostsLoaded(Result<Vec<Post>, FetchError>),
    DetailLoaded {
        ticket: DetailTicket,
        result: Result<(Post, Vec<Comment>), FetchError>,
    },
    CommentsLoaded {
        ticket: CommentsTicket,
        result: Result<Vec<Comment>, FetchError>,
    },
}

pub(super) fn process_messages(app: &mut PostfeedApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::PostsLoaded(result) => {
                app.feed.finish_initialize(result);
                app.trigger.sync(&app.feed);
            }
            AppMessage::DetailLoaded { ticket, result } => {
                if !app.detail.complete(ticket, result, app.translator.as_ref()) {
                    debug!("ignored detail for post {} (superseded)", ticket.post_id);
                }
            }
            AppMessage::CommentsLoaded { ticket, result } => {
                if !app.comments.complete(ticket, result) {
                    debug!("ignored comments for post {} (modal moved on)", ticket.post_id);
                }
            }
        }
    }
}
