use eframe::egui::{self, Color32, Sense};

const BAR_HEIGHT: f32 = 14.0;

fn bar(ui: &mut egui::Ui, fraction: f32, height: f32) {
    let width = ui.available_width() * fraction;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
    let shade = pulse(ui);
    ui.painter().rect_filled(rect, 4.0, shade);
    ui.add_space(6.0);
}

fn pulse(ui: &egui::Ui) -> Color32 {
    let t = ui.input(|input| input.time);
    let level = 60.0 + 20.0 * ((t * 2.0).sin() as f32 + 1.0) / 2.0;
    let level = level as u8;
    ui.ctx().request_repaint();
    Color32::from_rgb(level, level, level + 8)
}

/// Placeholder shaped like a feed card.
pub fn card(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            bar(ui, 0.75, BAR_HEIGHT + 6.0);
            bar(ui, 1.0, BAR_HEIGHT);
            bar(ui, 1.0, BAR_HEIGHT);
            bar(ui, 0.85, BAR_HEIGHT);
        });
    ui.add_space(8.0);
}

/// Full-page placeholder for the post view.
pub fn page(ui: &mut egui::Ui) {
    bar(ui, 0.2, 28.0);
    ui.add_space(12.0);
    bar(ui, 0.8, 36.0);
    for _ in 0..4 {
        bar(ui, 1.0, BAR_HEIGHT + 4.0);
    }
    ui.add_space(24.0);
    bar(ui, 0.3, 28.0);
    for _ in 0..3 {
        card(ui);
    }
}
