use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use tracing::{debug, info};

use crate::knowledge::Article;

use super::error::StoreError;
use super::{ArticleStore, SearchQuery};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_SORT: &str = "rel";

/// Blocking client for the article backend's REST API.
#[derive(Clone, Debug)]
pub struct ArticleClient {
    base_url: String,
    http: Client,
}

impl ArticleClient {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(StoreError::Client)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn load(&self, url: String, request: RequestBuilder) -> Result<Vec<Article>, StoreError> {
        debug!(%url, "requesting articles");

        let response = request.send().map_err(|source| StoreError::Http {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status { url, status });
        }

        let body = response.text().map_err(|source| StoreError::Http {
            url: url.clone(),
            source,
        })?;
        let articles = decode_articles(&url, &body)?;

        info!(%url, count = articles.len(), "loaded articles");
        Ok(articles)
    }
}

impl ArticleStore for ArticleClient {
    fn fetch_articles(&self) -> Result<Vec<Article>, StoreError> {
        let url = self.endpoint("api/articles");
        let request = self.http.get(&url);
        self.load(url, request)
    }

    fn search_articles(&self, query: &SearchQuery) -> Result<Vec<Article>, StoreError> {
        let url = self.endpoint("api/articles/search");
        let request = self.http.get(&url).query(&[
            ("keyword", query.keyword.trim()),
            ("sort", DEFAULT_SORT),
            ("period", query.period.as_param()),
        ]);
        self.load(url, request)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Parses a JSON array of articles. A `null` body counts as an empty list.
pub(super) fn decode_articles(origin: &str, body: &str) -> Result<Vec<Article>, StoreError> {
    let articles: Option<Vec<Article>> =
        serde_json::from_str(body).map_err(|source| StoreError::Decode {
            origin: origin.to_owned(),
            source,
        })?;
    Ok(articles.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slashes() {
        let client = ArticleClient::new("http://localhost:8080/").expect("client builds");
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(
            client.endpoint("/api/articles"),
            "http://localhost:8080/api/articles"
        );
    }

    #[test]
    fn decodes_article_arrays_and_null() {
        let articles = decode_articles("test", r#"[{"id": 1, "title": "a"}, {"url": "u"}]"#)
            .expect("valid array");
        assert_eq!(articles.len(), 2);

        let none = decode_articles("test", "null").expect("null is accepted");
        assert!(none.is_empty());
    }

    #[test]
    fn reports_malformed_payloads() {
        let error = decode_articles("http://x/api/articles", "{\"oops\": true}")
            .expect_err("object is not an article list");
        assert!(matches!(error, StoreError::Decode { .. }));
        assert!(error.to_string().contains("http://x/api/articles"));
    }
}
