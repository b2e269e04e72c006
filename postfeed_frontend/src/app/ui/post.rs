use eframe::egui::{self, Color32, RichText};
use postfeed_core::{Comment, DetailView};

use super::super::PostfeedApp;
use super::skeleton;

enum PostAction {
    Back,
    Navigate(u64),
    ToggleTranslation,
    Reload,
}

impl PostfeedApp {
    pub(crate) fn render_post(&mut self, ui: &mut egui::Ui) {
        let mut action: Option<PostAction> = None;
        let current = self.detail.post_id();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.detail.view() {
                DetailView::Idle => {}
                DetailView::Loading => skeleton::page(ui),
                DetailView::Failed(message) => {
                    let message = RichText::new(message).color(Color32::LIGHT_RED);
                    render_dead_end(ui, message, &mut action);
                    ui.vertical_centered(|ui| {
                        if ui.button("Try again").clicked() {
                            action = Some(PostAction::Reload);
                        }
                    });
                }
                DetailView::NotFound => {
                    render_dead_end(ui, RichText::new("Post not found."), &mut action);
                }
                DetailView::Ready { post, comments, is_translated } => {
                    ui.horizontal(|ui| {
                        if ui.button("← Back to list").clicked() {
                            action = Some(PostAction::Back);
                        }
                        if let Some(id) = current {
                            if id > 1 && ui.button("‹ Previous").clicked() {
                                action = Some(PostAction::Navigate(id - 1));
                            }
                            if ui.button("Next ›").clicked() {
                                action = Some(PostAction::Navigate(id + 1));
                            }
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let label = if is_translated {
                                "Show original"
                            } else {
                                "Translate to Russian"
                            };
                            if ui.button(label).clicked() {
                                action = Some(PostAction::ToggleTranslation);
                            }
                        });
                    });
                    ui.add_space(12.0);

                    egui::Frame::group(ui.style())
                        .fill(ui.visuals().extreme_bg_color)
                        .inner_margin(egui::vec2(16.0, 12.0))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.heading(RichText::new(&post.title).size(26.0).strong());
                            ui.add_space(8.0);
                            ui.label(RichText::new(&post.body).size(15.0).color(Color32::GRAY));
                        });

                    ui.add_space(24.0);
                    ui.heading(format!("Comments ({})", comments.len()));
                    ui.add_space(8.0);
                    if comments.is_empty() {
                        ui.label(RichText::new("No comments yet.").weak());
                    }
                    for comment in comments {
                        render_comment(ui, comment);
                    }
                }
            });

        match action {
            Some(PostAction::Back) => self.show_feed(),
            Some(PostAction::Navigate(post_id)) => self.open_post(post_id),
            Some(PostAction::ToggleTranslation) => self.detail.toggle_translation(),
            Some(PostAction::Reload) => self.spawn_reload_detail(),
            None => {}
        }
    }
}

fn render_dead_end(ui: &mut egui::Ui, message: RichText, action: &mut Option<PostAction>) {
    ui.add_space(ui.available_height() / 3.0);
    ui.vertical_centered(|ui| {
        ui.label(message.size(18.0));
        ui.add_space(12.0);
        if ui.button("← Back to list").clicked() {
            *action = Some(PostAction::Back);
        }
    });
}

pub(super) fn render_comment(ui: &mut egui::Ui, comment: &Comment) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&comment.name).strong());
            ui.label(RichText::new(&comment.email).small().weak());
            ui.add_space(4.0);
            ui.label(&comment.body);
        });
    ui.add_space(6.0);
}
