use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::keywords::KeywordSet;
use super::source::ArticleSource;
use super::text::extract_text;

/// Backend identifiers are numeric for saved rows and platform items, but
/// Dev.to slugs and hand-written snapshots may use strings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl ArticleId {
    /// Zero and the empty string are treated like a missing id.
    fn is_blank(&self) -> bool {
        match self {
            Self::Number(value) => *value == 0,
            Self::Text(value) => value.is_empty(),
        }
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ArticleTag {
    Named { name: String },
    Plain(String),
}

impl ArticleTag {
    pub fn name(&self) -> &str {
        match self {
            Self::Named { name } => name,
            Self::Plain(name) => name,
        }
    }
}

/// Read-only article record as served by the article store.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<ArticleId>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "renderedBody")]
    pub rendered_body: Option<String>,
    #[serde(default, alias = "bodyHtml")]
    pub body_html: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<ArticleTag>>,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Save time as sent by the backend, RFC 3339 or a zone-less local time.
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl Article {
    /// Identity used by the graph: `id`, then `url`, then the position in the
    /// input slice.
    pub fn graph_id(&self, position: usize) -> String {
        if let Some(id) = self.id.as_ref().filter(|id| !id.is_blank()) {
            return id.to_string();
        }

        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => position.to_string(),
        }
    }

    pub fn body(&self) -> &str {
        [self.rendered_body.as_deref(), self.body_html.as_deref()]
            .into_iter()
            .flatten()
            .find(|body| !body.is_empty())
            .unwrap_or("")
    }

    /// Plain body text followed by the title; the input to keyword extraction.
    pub fn document_text(&self) -> String {
        let mut text = extract_text(self.body());
        text.push(' ');
        text.push_str(self.title.as_deref().unwrap_or(""));
        text
    }

    pub fn keywords(&self) -> KeywordSet {
        KeywordSet::from_text(&self.document_text())
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled",
        }
    }

    pub fn source(&self) -> ArticleSource {
        ArticleSource::classify(self.url.as_deref())
    }

    /// Parsed `created_at`. Zone-less timestamps are read as UTC; anything
    /// unparseable counts as unknown.
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().flatten().map(ArticleTag::name)
    }
}
