use eframe::egui::{self, Color32, Frame, RichText, Ui};
use knowledge_map::knowledge::extract_text;

use super::super::render_utils::source_fill;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_reader(&mut self, ui: &mut Ui) {
        if ui.button("← Back to map").clicked() {
            self.close_reader();
            return;
        }
        ui.add_space(8.0);

        let Some(article) = self.opened.and_then(|index| self.articles.get(index)) else {
            ui.label("The selected article is no longer available.");
            return;
        };

        ui.heading(article.display_title());
        ui.horizontal_wrapped(|ui| {
            let source = article.source();
            Frame::new()
                .fill(source_fill(source))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(6, 2))
                .show(ui, |ui| {
                    ui.label(RichText::new(source.label()).small().color(Color32::WHITE));
                });

            if let Some(url) = article.url.as_deref().filter(|url| !url.is_empty()) {
                ui.hyperlink(url);
            }
        });

        let tags = article.tag_names().collect::<Vec<_>>();
        if !tags.is_empty() {
            ui.small(format!("tags: {}", tags.join(", ")));
        }

        ui.separator();

        let text = extract_text(article.body());
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if text.trim().is_empty() {
                    ui.weak("This article has no body text.");
                } else {
                    ui.label(text);
                }
            });
    }
}
