use eframe::egui::{self, Color32, Context, RichText};
use postfeed_core::comments::CommentsState;

use super::super::PostfeedApp;
use super::post::render_comment;

impl PostfeedApp {
    pub(crate) fn render_comments_window(&mut self, ctx: &Context) {
        let Some(post_id) = self.comments.post_id() else {
            return;
        };
        let mut open = true;
        egui::Window::new(format!("Comments on #{post_id}"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(520.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                    match self.comments.state() {
                        Some(CommentsState::Loading) => {
                            ui.horizontal(|ui| {
                                ui.add(egui::Spinner::new());
                                ui.label("Loading comments…");
                            });
                        }
                        Some(CommentsState::Failed(message)) => {
                            ui.colored_label(Color32::LIGHT_RED, message);
                        }
                        Some(CommentsState::Ready(comments)) if comments.is_empty() => {
                            ui.label(RichText::new("No comments yet.").weak());
                        }
                        Some(CommentsState::Ready(comments)) => {
                            for comment in comments {
                                render_comment(ui, comment);
                            }
                        }
                        None => {}
                    }
                });
            });
        if !open {
            self.comments.close();
        }
    }
}
