/// Origin platform of an article, inferred from its URL. Used for visual
/// grouping only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArticleSource {
    Database,
    Qiita,
    Dev,
}

impl ArticleSource {
    /// Anything that is not recognisably Qiita or Dev.to, including articles
    /// without a URL, is grouped with the local database.
    pub fn classify(url: Option<&str>) -> Self {
        match url {
            Some(url) if url.contains("qiita.com") => Self::Qiita,
            Some(url) if url.contains("dev.to") => Self::Dev,
            _ => Self::Database,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Database => "DB",
            Self::Qiita => "Qiita",
            Self::Dev => "Dev.to",
        }
    }
}
