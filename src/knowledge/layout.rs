use std::collections::HashMap;
use std::f64::consts::TAU;
use std::time::Instant;

use tracing::debug;

use super::article::Article;
use super::keywords::KeywordSet;
use super::source::ArticleSource;

/// Edges are only drawn for pairs strictly above this similarity.
pub const SIMILARITY_THRESHOLD: f64 = 0.15;
/// Shared keywords kept on an edge for display.
pub const EDGE_KEYWORD_LIMIT: usize = 3;
/// Concentric rings available to the spider-web layout.
pub const MAX_LAYERS: usize = 5;
/// Ring spacing as a fraction of the smaller viewport side.
pub const LAYER_SPACING: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn base_size(self) -> f64 {
        self.width.min(self.height)
    }

    pub fn layer_radius(self, layer: usize) -> f64 {
        layer as f64 * LAYER_SPACING * self.base_size()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    /// Index of the article in the slice passed to [`generate_graph`].
    pub article: usize,
    pub x: f64,
    pub y: f64,
    pub source: ArticleSource,
    pub layer: usize,
    pub connections: usize,
}

/// Undirected link between two related articles. `from`/`to` follow scan order.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub strength: f64,
    pub keywords: Vec<String>,
}

impl Edge {
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// Nodes are listed in rank order (most connected first).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KnowledgeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl KnowledgeGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    pub fn incident_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.touches(id))
    }

    pub fn isolated_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| self.incident_edges(&node.id).next().is_none())
            .count()
    }
}

/// Builds the similarity graph for one render pass and lays it out as a
/// spider web: the best-connected articles sit at the centre, the rest on
/// concentric rings.
pub fn generate_graph(articles: &[Article], dimensions: Dimensions) -> KnowledgeGraph {
    if articles.is_empty() {
        return KnowledgeGraph::default();
    }

    let started = Instant::now();
    let ids = articles
        .iter()
        .enumerate()
        .map(|(position, article)| article.graph_id(position))
        .collect::<Vec<_>>();
    let keyword_sets = articles.iter().map(Article::keywords).collect::<Vec<_>>();

    let edges = connect(&ids, &keyword_sets);

    let mut connection_count: HashMap<&str, usize> =
        ids.iter().map(|id| (id.as_str(), 0)).collect();
    for edge in &edges {
        for endpoint in [&edge.from, &edge.to] {
            if let Some(count) = connection_count.get_mut(endpoint.as_str()) {
                *count += 1;
            }
        }
    }
    let connections_of = |index: usize| connection_count.get(ids[index].as_str()).copied().unwrap_or(0);

    // `sort_by` is stable, so equally connected articles keep input order.
    let mut ranked = (0..articles.len()).collect::<Vec<_>>();
    ranked.sort_by(|a, b| connections_of(*b).cmp(&connections_of(*a)));

    let nodes = ranked
        .iter()
        .zip(spider_web_positions(ranked.len(), dimensions))
        .map(|(&index, placement)| Node {
            id: ids[index].clone(),
            article: index,
            x: placement.x,
            y: placement.y,
            source: articles[index].source(),
            layer: placement.layer,
            connections: connections_of(index),
        })
        .collect::<Vec<_>>();

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "generated knowledge graph"
    );

    KnowledgeGraph { nodes, edges }
}

fn connect(ids: &[String], keyword_sets: &[KeywordSet]) -> Vec<Edge> {
    let mut edges = Vec::new();

    for i in 0..keyword_sets.len() {
        for j in (i + 1)..keyword_sets.len() {
            let shared = keyword_sets[i].shared_with(&keyword_sets[j]);
            if shared.is_empty() {
                continue;
            }

            let strength = keyword_sets[i].similarity(&keyword_sets[j]);
            if strength > SIMILARITY_THRESHOLD {
                edges.push(Edge {
                    from: ids[i].clone(),
                    to: ids[j].clone(),
                    strength,
                    keywords: shared
                        .into_iter()
                        .take(EDGE_KEYWORD_LIMIT)
                        .map(str::to_owned)
                        .collect(),
                });
            }
        }
    }

    edges
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    x: f64,
    y: f64,
    layer: usize,
}

pub(super) fn layer_count(node_count: usize) -> usize {
    MAX_LAYERS.min((node_count as f64).sqrt().ceil() as usize)
}

/// Positions for `count` ranked nodes. Rank 0 is pinned to the centre; every
/// ring divides the full circle evenly among its own nodes.
fn spider_web_positions(count: usize, dimensions: Dimensions) -> Vec<Placement> {
    if count == 0 {
        return Vec::new();
    }

    let (center_x, center_y) = dimensions.center();
    let per_layer = count.div_ceil(layer_count(count));

    (0..count)
        .map(|rank| {
            let layer = rank / per_layer;
            let position = rank % per_layer;
            let total_in_layer = per_layer.min(count - layer * per_layer);

            if layer == 0 && position == 0 {
                return Placement {
                    x: center_x,
                    y: center_y,
                    layer,
                };
            }

            let radius = dimensions.layer_radius(layer);
            let angle = (position as f64 / total_in_layer as f64) * TAU;
            Placement {
                x: center_x + radius * angle.cos(),
                y: center_y + radius * angle.sin(),
                layer,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::article::ArticleId;
    use super::*;

    fn article(id: i64, body: &str) -> Article {
        Article {
            id: Some(ArticleId::Number(id)),
            rendered_body: Some(format!("<p>{body}</p>")),
            ..Article::default()
        }
    }

    fn layer_sizes(graph: &KnowledgeGraph) -> Vec<usize> {
        let mut sizes = Vec::new();
        for node in &graph.nodes {
            if sizes.len() <= node.layer {
                sizes.resize(node.layer + 1, 0);
            }
            sizes[node.layer] += 1;
        }
        sizes
    }

    fn viewport() -> Dimensions {
        Dimensions::new(800.0, 600.0)
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        assert_eq!(generate_graph(&[], viewport()), KnowledgeGraph::default());
    }

    #[test]
    fn links_only_related_articles() {
        let articles = vec![
            article(1, "rust and docker"),
            article(2, "docker with rust"),
            article(3, "baking bread"),
        ];

        let graph = generate_graph(&articles, viewport());

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 1);
        let edge = &graph.edges[0];
        assert_eq!((edge.from.as_str(), edge.to.as_str()), ("1", "2"));
        assert_eq!(edge.strength, 1.0);
        assert_eq!(edge.keywords, vec!["docker".to_owned(), "rust".to_owned()]);
        assert_eq!(graph.incident_edges("3").count(), 0);
        assert_eq!(graph.isolated_count(), 1);
    }

    #[test]
    fn most_connected_article_takes_the_centre() {
        let articles = vec![
            article(1, "baking bread"),
            article(2, "rust"),
            article(3, "rust docker"),
            article(4, "docker"),
        ];

        let graph = generate_graph(&articles, viewport());

        let ranked = graph
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node.connections))
            .collect::<Vec<_>>();
        assert_eq!(ranked, vec![("3", 2), ("2", 1), ("4", 1), ("1", 0)]);
        assert_eq!((graph.nodes[0].x, graph.nodes[0].y), (400.0, 300.0));
        assert_eq!(graph.nodes[0].article, 2);
    }

    #[test]
    fn ten_articles_fill_four_rings_of_three() {
        let articles = (1..=10).map(|id| article(id, "")).collect::<Vec<_>>();

        let graph = generate_graph(&articles, viewport());

        assert_eq!(layer_count(10), 4);
        assert_eq!(layer_sizes(&graph), vec![3, 3, 3, 1]);
        let order = graph.nodes.iter().map(|node| node.article).collect::<Vec<_>>();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn rings_use_layer_index_times_spacing() {
        let articles = (1..=10).map(|id| article(id, "")).collect::<Vec<_>>();
        let dimensions = viewport();

        let graph = generate_graph(&articles, dimensions);

        let (cx, cy) = dimensions.center();
        for node in &graph.nodes {
            let distance = ((node.x - cx).powi(2) + (node.y - cy).powi(2)).sqrt();
            let expected = node.layer as f64 * 0.15 * 600.0;
            assert!(
                (distance - expected).abs() < 1e-9,
                "node {} at {distance}, expected {expected}",
                node.id
            );
        }

        // Second ring: three nodes a third of a turn apart, first at angle 0.
        let ring = graph
            .nodes
            .iter()
            .filter(|node| node.layer == 1)
            .collect::<Vec<_>>();
        assert!((ring[0].x - (cx + 90.0)).abs() < 1e-9);
        assert!((ring[0].y - cy).abs() < 1e-9);
        let angle = (ring[1].y - cy).atan2(ring[1].x - cx);
        assert!((angle - TAU / 3.0).abs() < 1e-9);
    }

    #[test]
    fn weak_overlap_stays_below_threshold() {
        let crowded = (0..49)
            .map(|index| format!("server{index}"))
            .collect::<Vec<_>>()
            .join(" ");
        let articles = vec![article(1, "rust"), article(2, &format!("rust {crowded}"))];

        let graph = generate_graph(&articles, viewport());

        // 1 / sqrt(1 * 50) ≈ 0.141
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn edge_keywords_are_capped_shared_subset() {
        let body = "rust docker python kubernetes linux";
        let articles = vec![article(1, body), article(2, body)];

        let graph = generate_graph(&articles, viewport());

        let a = articles[0].keywords();
        let b = articles[1].keywords();
        let edge = &graph.edges[0];
        assert_eq!(edge.keywords.len(), EDGE_KEYWORD_LIMIT);
        assert!(edge.keywords.iter().all(|keyword| a.contains(keyword) && b.contains(keyword)));
    }

    #[test]
    fn single_article_sits_at_centre() {
        let graph = generate_graph(&[article(9, "rust")], Dimensions::new(300.0, 200.0));
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!((graph.nodes[0].x, graph.nodes[0].y), (150.0, 100.0));
        assert_eq!(graph.nodes[0].layer, 0);
    }
}
