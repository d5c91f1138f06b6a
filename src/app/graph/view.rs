use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2, vec2};
use knowledge_map::knowledge::Dimensions;

use crate::util::{format_percent, truncate_chars};

use super::super::render_utils::{
    blend_color, draw_background, layout_to_screen, source_fill, source_stroke, with_alpha,
};
use super::super::{GraphCache, ViewModel};
use super::interaction::{HoverTarget, NODE_RADIUS, hit_test};

const TOOLTIP_TITLE_CHARS: usize = 40;
const HALO_RADIUS: f32 = 28.0;
const HALO_RADIUS_HOVERED: f32 = 32.0;
const EDGE_WIDTH_SCALE: f64 = 8.0;
const HIGHLIGHTED_EDGE_WIDTH: f32 = 2.0;
const EDGE_COLOR: Color32 = Color32::from_rgb(99, 102, 241);
const EDGE_HIGHLIGHT: Color32 = Color32::from_rgb(165, 180, 252);
const MATCH_RING: Color32 = Color32::from_rgb(250, 204, 21);

/// Screen-space geometry of the current graph for one frame.
struct Projection {
    nodes: Vec<Pos2>,
    /// Endpoint node indices per edge; `None` when an endpoint id is unknown.
    endpoints: Vec<Option<(usize, usize)>>,
    segments: Vec<Option<(Pos2, Pos2)>>,
}

impl Projection {
    fn new(cache: &GraphCache, rect: Rect, pan: Vec2) -> Self {
        let nodes = cache
            .graph
            .nodes
            .iter()
            .map(|node| layout_to_screen(rect, pan, node.x, node.y))
            .collect::<Vec<_>>();

        let endpoints = cache
            .graph
            .edges
            .iter()
            .map(|edge| {
                let from = cache.index_by_id.get(&edge.from)?;
                let to = cache.index_by_id.get(&edge.to)?;
                Some((*from, *to))
            })
            .collect::<Vec<_>>();

        let segments = endpoints
            .iter()
            .map(|pair| pair.map(|(from, to)| (nodes[from], nodes[to])))
            .collect();

        Self {
            nodes,
            endpoints,
            segments,
        }
    }

    fn hit(&self, pointer: Pos2) -> Option<HoverTarget> {
        hit_test(&self.nodes, &self.segments, pointer)
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let dimensions = Dimensions::new(rect.width() as f64, rect.height() as f64);

        self.ensure_graph(dimensions);
        let title_matches = self.cached_title_matches();

        let Some(cache) = self.graph_cache.as_ref() else {
            return;
        };

        if response.drag_started_by(egui::PointerButton::Primary) {
            let press_origin = ui.input(|input| input.pointer.press_origin());
            let press_over_target = press_origin
                .is_some_and(|origin| Projection::new(cache, rect, self.pan).hit(origin).is_some());
            self.handle_graph_pan(&response, press_over_target);
        } else {
            self.handle_graph_pan(&response, false);
        }

        let Some(cache) = self.graph_cache.as_ref() else {
            return;
        };
        let projection = Projection::new(cache, rect, self.pan);

        let hovered = if self.panning {
            None
        } else {
            response
                .hover_pos()
                .filter(|pointer| rect.contains(*pointer))
                .and_then(|pointer| projection.hit(pointer))
        };

        draw_background(&painter, rect, self.pan, dimensions);

        if cache.graph.is_empty() {
            let message = if self.load_error.is_some() {
                "No articles could be loaded."
            } else {
                "No saved articles yet."
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                message,
                FontId::proportional(16.0),
                Color32::from_gray(150),
            );
        }

        for (index, edge) in cache.graph.edges.iter().enumerate() {
            let (Some((from, to)), Some((start, end))) =
                (projection.endpoints[index], projection.segments[index])
            else {
                continue;
            };

            let highlighted = hovered.is_some_and(|target| target.highlights_edge(index, from, to));
            let stroke = if highlighted {
                Stroke::new(HIGHLIGHTED_EDGE_WIDTH, EDGE_HIGHLIGHT)
            } else {
                Stroke::new(
                    (edge.strength * EDGE_WIDTH_SCALE).max(1.0) as f32,
                    with_alpha(EDGE_COLOR, 0.35 + edge.strength as f32 * 0.5),
                )
            };
            painter.line_segment([start, end], stroke);
        }

        let hovered_node = hovered.and_then(HoverTarget::node);
        for (index, node) in cache.graph.nodes.iter().enumerate() {
            let position = projection.nodes[index];
            let is_hovered = hovered_node == Some(index);
            let fill = source_fill(node.source);
            let stroke = source_stroke(node.source);

            if node.connections > 0 {
                let (radius, alpha) = if is_hovered {
                    (HALO_RADIUS_HOVERED, 0.45)
                } else {
                    (HALO_RADIUS, 0.2)
                };
                painter.circle_filled(position, radius, with_alpha(fill, alpha));
            }

            let disc = if is_hovered {
                blend_color(fill, Color32::WHITE, 0.25)
            } else {
                fill
            };
            painter.circle_filled(position, NODE_RADIUS, disc);
            painter.circle_stroke(
                position,
                NODE_RADIUS,
                Stroke::new(if is_hovered { 3.0 } else { 2.0 }, stroke),
            );

            if title_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&node.article))
            {
                painter.circle_stroke(position, NODE_RADIUS + 4.0, Stroke::new(2.0, MATCH_RING));
            }
        }

        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        } else if self.panning {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        }

        match hovered {
            Some(HoverTarget::Node(index)) => {
                let node = &cache.graph.nodes[index];
                let title = self
                    .articles
                    .get(node.article)
                    .map(|article| article.display_title())
                    .unwrap_or("Untitled");
                let anchor = projection.nodes[index] + vec2(NODE_RADIUS + 8.0, -NODE_RADIUS);
                show_tooltip(ui, "node_tooltip", anchor, |ui| {
                    ui.label(RichText::new(truncate_chars(title, TOOLTIP_TITLE_CHARS)).strong());
                    ui.small(format!("links: {} | click to open", node.connections));
                });
            }
            Some(HoverTarget::Edge(index)) => {
                let edge = &cache.graph.edges[index];
                if let Some((start, end)) = projection.segments[index] {
                    let anchor = start + (end - start) * 0.5;
                    show_tooltip(ui, "edge_tooltip", anchor, |ui| {
                        ui.label(RichText::new(edge.keywords.join(", ")).strong());
                        ui.small(format!("similarity {}", format_percent(edge.strength)));
                    });
                }
            }
            None => {}
        }

        let clicked_article = if response.clicked_by(egui::PointerButton::Primary) {
            hovered
                .and_then(HoverTarget::node)
                .map(|index| cache.graph.nodes[index].article)
        } else {
            None
        };

        self.hovered = hovered;
        self.draw_interest_overlay(ui, rect);
        self.draw_stats_overlay(ui, rect);

        if let Some(article) = clicked_article {
            self.open_article(article);
        }
    }
}

fn show_tooltip(ui: &Ui, id: &str, anchor: Pos2, add_contents: impl FnOnce(&mut Ui)) {
    egui::Area::new(ui.make_persistent_id(id))
        .fixed_pos(anchor)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(280.0);
                add_contents(ui);
            });
        });
}
