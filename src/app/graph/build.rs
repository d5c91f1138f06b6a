use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use knowledge_map::knowledge::{Dimensions, generate_graph};

use super::super::{GraphCache, SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

impl ViewModel {
    /// Recomputes the layout when the article set or the canvas size changed
    /// since the last pass.
    pub(in crate::app) fn ensure_graph(&mut self, dimensions: Dimensions) {
        if let Some(cache) = &self.graph_cache
            && cache.articles_revision == self.articles_revision
            && cache.dimensions == dimensions
        {
            return;
        }

        let graph = generate_graph(&self.articles, dimensions);
        let mut index_by_id = HashMap::with_capacity(graph.nodes.len());
        for (index, node) in graph.nodes.iter().enumerate() {
            index_by_id.entry(node.id.clone()).or_insert(index);
        }

        self.hovered = None;
        self.graph_cache = Some(GraphCache {
            articles_revision: self.articles_revision,
            dimensions,
            graph,
            index_by_id,
        });
    }

    /// Article indices whose title fuzzy-matches the highlight box.
    pub(in crate::app) fn cached_title_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.articles_revision == self.articles_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .articles
            .iter()
            .enumerate()
            .filter_map(|(index, article)| {
                fuzzy_match_score(&matcher, article.display_title(), query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            articles_revision: self.articles_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }
}
