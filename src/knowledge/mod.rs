mod article;
mod dictionary;
mod keywords;
mod layout;
mod similarity;
mod source;
mod text;

pub use article::{Article, ArticleId, ArticleTag};
pub use keywords::{KeywordSet, extract_keywords};
pub use layout::{
    Dimensions, EDGE_KEYWORD_LIMIT, Edge, KnowledgeGraph, MAX_LAYERS, Node, SIMILARITY_THRESHOLD,
    generate_graph,
};
pub use similarity::{Interest, extract_interests, similarity};
pub use source::ArticleSource;
pub use text::extract_text;
