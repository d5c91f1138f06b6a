use eframe::egui::{self, Align, Align2, Color32, Context, Frame, Layout, RichText, Ui, Vec2, vec2};
use knowledge_map::knowledge::{Article, extract_interests};
use knowledge_map::store::{SearchPeriod, SearchQuery};

use super::super::{ViewMode, ViewModel, ViewRequests};

const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(15, 23, 42, 230);
const PANEL_STROKE: Color32 = Color32::from_rgb(51, 65, 85);
const CHIP_FILL: Color32 = Color32::from_rgb(49, 46, 129);
const CHIP_TEXT: Color32 = Color32::from_rgb(199, 210, 254);

impl ViewModel {
    pub(in crate::app) fn new(
        articles: Vec<Article>,
        query: SearchQuery,
        load_error: Option<String>,
    ) -> Self {
        let interests = extract_interests(&articles);

        Self {
            articles,
            articles_revision: 0,
            draft_query: query.clone(),
            query,
            load_error,
            interests,
            graph_cache: None,
            search: String::new(),
            search_match_cache: None,
            pan: Vec2::ZERO,
            panning: false,
            hovered: None,
            view_mode: ViewMode::Graph,
            opened: None,
        }
    }

    /// Swaps in a freshly loaded article set. Indices into the old set are
    /// invalid afterwards, so hover and reader state are cleared.
    pub(in crate::app) fn replace_articles(
        &mut self,
        articles: Vec<Article>,
        query: SearchQuery,
        load_error: Option<String>,
    ) {
        self.interests = extract_interests(&articles);
        self.articles = articles;
        self.articles_revision = self.articles_revision.wrapping_add(1);
        self.query = query;
        self.load_error = load_error;
        self.search_match_cache = None;
        self.hovered = None;
        self.panning = false;
        if self.view_mode == ViewMode::Reader {
            self.view_mode = ViewMode::Graph;
        }
        self.opened = None;
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        store_label: &str,
        is_loading: bool,
        requests: &mut ViewRequests,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_top_bar(ui, store_label, is_loading, requests));

        egui::CentralPanel::default()
            .frame(Frame::central_panel(&ctx.style()).fill(Color32::from_rgb(11, 17, 32)))
            .show(ctx, |ui| match self.view_mode {
                ViewMode::Graph => self.draw_graph(ui),
                ViewMode::Reader => self.draw_reader(ui),
            });
    }

    fn draw_top_bar(
        &mut self,
        ui: &mut Ui,
        store_label: &str,
        is_loading: bool,
        requests: &mut ViewRequests,
    ) {
        ui.horizontal(|ui| {
            ui.heading("Knowledge map");
            ui.separator();
            ui.label(format!("store: {store_label}"));
            ui.label(format!("articles: {}", self.articles.len()));
            if !self.query.is_unrestricted() {
                ui.label(format!(
                    "scope: \"{}\" / {}",
                    self.query.keyword.trim(),
                    self.query.period.label()
                ));
            }

            if ui.button("Reload").clicked() {
                requests.load = Some(self.query.clone());
            }
            if ui.button("Reset view").clicked() {
                self.pan = Vec2::ZERO;
            }
            if is_loading {
                ui.spinner();
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.search)
                        .hint_text("highlight titles")
                        .desired_width(180.0),
                )
                .on_hover_text("Fuzzy-highlight nodes whose title matches, without changing the map.");
            });
        });

        ui.horizontal(|ui| {
            ui.label("Scope");
            let submitted = ui
                .add(
                    egui::TextEdit::singleline(&mut self.draft_query.keyword)
                        .hint_text("keyword in title or body")
                        .desired_width(220.0),
                )
                .lost_focus()
                && ui.input(|input| input.key_pressed(egui::Key::Enter));

            egui::ComboBox::from_id_salt("period")
                .selected_text(self.draft_query.period.label())
                .show_ui(ui, |ui| {
                    for period in SearchPeriod::ALL {
                        ui.selectable_value(&mut self.draft_query.period, period, period.label());
                    }
                });

            if ui.button("Apply").clicked() || submitted {
                requests.load = Some(self.draft_query.clone());
            }
            if ui.button("Clear").clicked() {
                self.draft_query = SearchQuery::default();
                requests.load = Some(SearchQuery::default());
            }
        });

        if let Some(error) = &self.load_error {
            ui.horizontal(|ui| {
                ui.colored_label(
                    Color32::from_rgb(248, 113, 113),
                    format!("Failed to load articles: {error}"),
                );
                if ui.button("Retry").clicked() {
                    requests.load = Some(self.query.clone());
                }
            });
        }
        ui.add_space(2.0);
    }

    pub(in crate::app) fn draw_interest_overlay(&self, ui: &Ui, rect: egui::Rect) {
        if self.interests.is_empty() {
            return;
        }

        egui::Area::new(ui.make_persistent_id("interests"))
            .fixed_pos(rect.left_top() + vec2(16.0, 16.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ui.ctx(), |ui| {
                overlay_frame().show(ui, |ui| {
                    ui.set_max_width(260.0);
                    ui.label(RichText::new("Your interests").strong().color(Color32::from_gray(220)));
                    ui.add_space(4.0);
                    ui.horizontal_wrapped(|ui| {
                        for interest in &self.interests {
                            chip(ui, &format!("{} ×{}", interest.word, interest.count));
                        }
                    });
                });
            });
    }

    pub(in crate::app) fn draw_stats_overlay(&self, ui: &Ui, rect: egui::Rect) {
        let (edge_count, isolated) = self
            .graph_cache
            .as_ref()
            .map(|cache| (cache.graph.edges.len(), cache.graph.isolated_count()))
            .unwrap_or((0, 0));

        egui::Area::new(ui.make_persistent_id("stats"))
            .pivot(Align2::RIGHT_BOTTOM)
            .fixed_pos(rect.right_bottom() - vec2(16.0, 16.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ui.ctx(), |ui| {
                overlay_frame().show(ui, |ui| {
                    ui.label(RichText::new("Stats").strong().color(Color32::from_gray(220)));
                    egui::Grid::new("stats_grid").num_columns(2).show(ui, |ui| {
                        ui.label("Articles");
                        ui.monospace(self.articles.len().to_string());
                        ui.end_row();
                        ui.label("Links");
                        ui.monospace(edge_count.to_string());
                        ui.end_row();
                        ui.label("Isolated");
                        ui.monospace(isolated.to_string());
                        ui.end_row();
                    });
                    ui.separator();
                    for hint in [
                        "Hover a node to see its title",
                        "Hover a link to see shared topics",
                        "Click a node to open the article",
                        "Drag the background to pan",
                    ] {
                        ui.small(hint);
                    }
                });
            });
    }
}

fn overlay_frame() -> Frame {
    Frame::new()
        .fill(PANEL_FILL)
        .stroke(egui::Stroke::new(1.0, PANEL_STROKE))
        .corner_radius(8.0)
        .inner_margin(12.0)
}

fn chip(ui: &mut Ui, text: &str) {
    Frame::new()
        .fill(CHIP_FILL)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(CHIP_TEXT));
        });
}
