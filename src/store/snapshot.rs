use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::knowledge::Article;

use super::client::decode_articles;
use super::error::StoreError;
use super::{ArticleStore, SearchQuery};

/// Articles read from a JSON export of `/api/articles`. The file is re-read on
/// every load so edits show up on reload.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArticleStore for SnapshotStore {
    fn fetch_articles(&self) -> Result<Vec<Article>, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let articles = decode_articles(&self.path.display().to_string(), &raw)?;

        info!(path = %self.path.display(), count = articles.len(), "loaded snapshot");
        Ok(articles)
    }

    /// Filtering happens locally with the backend's rules: the keyword is a
    /// case-insensitive substring of title or body, and a period keeps only
    /// articles created after its cutoff.
    fn search_articles(&self, query: &SearchQuery) -> Result<Vec<Article>, StoreError> {
        let articles = self.fetch_articles()?;
        Ok(filter_articles(articles, query, Utc::now()))
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}

fn filter_articles(articles: Vec<Article>, query: &SearchQuery, now: DateTime<Utc>) -> Vec<Article> {
    let keyword = query.keyword.trim().to_lowercase();
    let cutoff = query.period.cutoff(now);

    articles
        .into_iter()
        .filter(|article| keyword.is_empty() || mentions(article, &keyword))
        .filter(|article| {
            cutoff.is_none_or(|cutoff| {
                article
                    .creation_time()
                    .is_some_and(|created| created > cutoff)
            })
        })
        .collect()
}

fn mentions(article: &Article, keyword: &str) -> bool {
    [article.title.as_deref(), Some(article.body())]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(keyword))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::store::SearchPeriod;

    fn write_snapshot(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "knowledge-map-{name}-{}.json",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).expect("temp file");
        file.write_all(contents.as_bytes()).expect("write snapshot");
        path
    }

    #[test]
    fn loads_and_filters_by_keyword() {
        let path = write_snapshot(
            "filter",
            r#"[
                {"id": 1, "title": "Rust async", "rendered_body": "<p>tokio</p>"},
                {"id": 2, "title": "Cooking", "rendered_body": "<p>RUST remover</p>"},
                {"id": 3, "title": "Go", "rendered_body": "<p>goroutines</p>"}
            ]"#,
        );
        let store = SnapshotStore::new(&path);

        assert_eq!(store.fetch_articles().expect("snapshot loads").len(), 3);

        let query = SearchQuery {
            keyword: " rust ".to_owned(),
            period: SearchPeriod::All,
        };
        let found = store.search_articles(&query).expect("search works");
        assert_eq!(found.len(), 2);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn periods_keep_recent_articles_only() {
        let raw = r#"[
            {"id": 1, "title": "rust today", "createdAt": "2025-06-30T08:00:00"},
            {"id": 2, "title": "rust last month", "createdAt": "2025-06-10T08:00:00"},
            {"id": 3, "title": "rust last year", "createdAt": "2024-06-30T08:00:00"},
            {"id": 4, "title": "rust undated"}
        ]"#;
        let articles = decode_articles("test", raw).expect("valid rows");
        let now = DateTime::parse_from_rfc3339("2025-07-01T00:00:00Z")
            .expect("valid stamp")
            .with_timezone(&Utc);
        let ids = |period: SearchPeriod| {
            let query = SearchQuery {
                keyword: "rust".to_owned(),
                period,
            };
            filter_articles(articles.clone(), &query, now)
                .iter()
                .map(|article| article.graph_id(0))
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(SearchPeriod::All), vec!["1", "2", "3", "4"]);
        assert_eq!(ids(SearchPeriod::Week), vec!["1"]);
        assert_eq!(ids(SearchPeriod::Month), vec!["1", "2"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let store = SnapshotStore::new("/definitely/not/here.json");
        let error = store.fetch_articles().expect_err("file is missing");
        assert!(matches!(error, StoreError::Io { .. }));
    }
}
