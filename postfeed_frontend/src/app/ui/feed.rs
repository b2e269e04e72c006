use std::time::Instant;

use eframe::egui::{self, Color32, RichText};
use postfeed_core::Post;

use super::super::PostfeedApp;
use super::skeleton;

const SKELETON_CARDS: usize = 12;

enum CardAction {
    Open(u64),
    Comments(u64),
}

impl PostfeedApp {
    pub(crate) fn render_feed(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| ui.heading("Post search"));
        ui.add_space(6.0);
        let search = ui.add(
            egui::TextEdit::singleline(&mut self.search_input)
                .hint_text("Search titles and bodies…")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            self.feed.set_search_query(self.search_input.clone());
            self.trigger.sync(&self.feed);
        }
        ui.add_space(8.0);

        let mut action: Option<CardAction> = None;
        let mut sentinel_visible = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let view = self.feed.snapshot();
                if view.loading && view.items.is_empty() {
                    for _ in 0..SKELETON_CARDS {
                        skeleton::card(ui);
                    }
                    return;
                }

                for post in view.items {
                    let rect = render_card(ui, post, &mut action);
                    if self.trigger.observer().is_watching(post.id) && ui.is_rect_visible(rect) {
                        sentinel_visible = true;
                    }
                }

                if view.loading && !view.items.is_empty() {
                    ui.vertical_centered(|ui| ui.label("Loading…"));
                }
                if let Some(err) = view.error {
                    ui.vertical_centered(|ui| ui.colored_label(Color32::LIGHT_RED, err));
                } else if !view.loading && !view.items.is_empty() && !view.has_more {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("You've seen all posts.").weak())
                    });
                } else if !view.loading && view.items.is_empty() {
                    ui.vertical_centered(|ui| ui.label(RichText::new("Nothing found.").weak()));
                }
            });

        if sentinel_visible {
            self.trigger.notify_visible(Instant::now());
        }
        match action {
            Some(CardAction::Open(post_id)) => self.open_post(post_id),
            Some(CardAction::Comments(post_id)) => self.spawn_open_comments(post_id),
            None => {}
        }
    }
}

fn render_card(ui: &mut egui::Ui, post: &Post, action: &mut Option<CardAction>) -> egui::Rect {
    let response = egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&post.title).strong().size(16.0));
            ui.add_space(4.0);
            ui.label(RichText::new(preview(&post.body)).color(Color32::GRAY));
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let meta = format!("#{} · user {}", post.id, post.user_id);
                ui.label(RichText::new(meta).small().weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.link("Read more →").clicked() {
                        *action = Some(CardAction::Open(post.id));
                    }
                    if ui.small_button("Comments").clicked() {
                        *action = Some(CardAction::Comments(post.id));
                    }
                });
            });
        })
        .response;
    ui.add_space(8.0);
    response.rect
}

// Keeps cards roughly even in height, like a four-line clamp.
fn preview(body: &str) -> String {
    const MAX_CHARS: usize = 180;
    let flat = body.replace('\n', " ");
    if flat.chars().count() <= MAX_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(MAX_CHARS).collect();
    cut.push('…');
    cut
}
