use eframe::egui::{self, Pos2};
use tracing::info;

use super::super::render_utils::distance_to_segment;
use super::super::{ViewMode, ViewModel};

pub(in crate::app) const NODE_RADIUS: f32 = 20.0;
/// Half of the 10 px invisible stroke that makes thin edges hoverable.
pub(in crate::app) const EDGE_HIT_HALF_WIDTH: f32 = 5.0;

/// Interactive element under the pointer; indices point into the current
/// graph's `nodes` or `edges`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum HoverTarget {
    Node(usize),
    Edge(usize),
}

impl HoverTarget {
    pub(in crate::app) fn node(self) -> Option<usize> {
        match self {
            Self::Node(index) => Some(index),
            Self::Edge(_) => None,
        }
    }

    /// A hovered node lights up all of its edges; a hovered edge only itself.
    pub(in crate::app) fn highlights_edge(self, edge_index: usize, from: usize, to: usize) -> bool {
        match self {
            Self::Node(node) => node == from || node == to,
            Self::Edge(edge) => edge == edge_index,
        }
    }
}

/// Nodes are drawn above edges and later items above earlier ones, so the
/// search runs topmost-first and nodes win over edges.
pub(in crate::app) fn hit_test(
    node_positions: &[Pos2],
    edge_segments: &[Option<(Pos2, Pos2)>],
    pointer: Pos2,
) -> Option<HoverTarget> {
    let node = node_positions
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(index, position)| {
            let distance = position.distance(pointer);
            (distance <= NODE_RADIUS).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((index, _)) = node {
        return Some(HoverTarget::Node(index));
    }

    edge_segments
        .iter()
        .enumerate()
        .rev()
        .find(|(_, segment)| {
            segment.is_some_and(|(start, end)| {
                distance_to_segment(pointer, start, end) <= EDGE_HIT_HALF_WIDTH
            })
        })
        .map(|(index, _)| HoverTarget::Edge(index))
}

impl ViewModel {
    /// Primary-button drags pan the canvas, unless the press landed on a node
    /// or an edge.
    pub(in crate::app) fn handle_graph_pan(
        &mut self,
        response: &egui::Response,
        press_over_target: bool,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            self.panning = !press_over_target;
        }

        if self.panning && response.dragged_by(egui::PointerButton::Primary) {
            self.pan += response.drag_delta();
        }

        if response.drag_stopped() {
            self.panning = false;
        }
    }

    pub(in crate::app) fn open_article(&mut self, article: usize) {
        let Some(selected) = self.articles.get(article) else {
            return;
        };

        info!(title = selected.display_title(), "opening article from map");
        self.opened = Some(article);
        self.view_mode = ViewMode::Reader;
        self.hovered = None;
        self.panning = false;
    }

    pub(in crate::app) fn close_reader(&mut self) {
        self.view_mode = ViewMode::Graph;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn nodes_take_precedence_over_edges() {
        let nodes = [pos2(0.0, 0.0), pos2(100.0, 0.0)];
        let edges = [Some((nodes[0], nodes[1]))];

        assert_eq!(
            hit_test(&nodes, &edges, pos2(12.0, 3.0)),
            Some(HoverTarget::Node(0))
        );
        assert_eq!(
            hit_test(&nodes, &edges, pos2(50.0, 4.0)),
            Some(HoverTarget::Edge(0))
        );
        assert_eq!(hit_test(&nodes, &edges, pos2(50.0, 6.0)), None);
    }

    #[test]
    fn stacked_nodes_resolve_to_the_topmost() {
        let nodes = [pos2(10.0, 10.0), pos2(10.0, 10.0), pos2(10.0, 10.0)];
        assert_eq!(
            hit_test(&nodes, &[], pos2(10.0, 10.0)),
            Some(HoverTarget::Node(2))
        );
    }

    #[test]
    fn missing_segments_are_skipped() {
        let edges = [None, Some((pos2(0.0, 0.0), pos2(0.0, 100.0)))];
        assert_eq!(
            hit_test(&[], &edges, pos2(3.0, 50.0)),
            Some(HoverTarget::Edge(1))
        );
    }

    #[test]
    fn hovered_node_highlights_incident_edges_only() {
        let hover = HoverTarget::Node(2);
        assert!(hover.highlights_edge(0, 2, 5));
        assert!(hover.highlights_edge(1, 7, 2));
        assert!(!hover.highlights_edge(2, 3, 4));

        let hover = HoverTarget::Edge(1);
        assert!(hover.highlights_edge(1, 3, 4));
        assert!(!hover.highlights_edge(0, 3, 4));
        assert_eq!(hover.node(), None);
    }
}
