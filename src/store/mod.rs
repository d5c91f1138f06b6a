//! Clients for the article store that supplies the graph's input snapshot.

mod client;
mod error;
mod snapshot;

use chrono::{DateTime, Months, TimeDelta, Utc};

use crate::knowledge::Article;

pub use client::{ArticleClient, DEFAULT_API_URL};
pub use error::StoreError;
pub use snapshot::SnapshotStore;

/// Source of saved articles. Implementations block; callers run them off the
/// UI thread.
pub trait ArticleStore: Send + Sync {
    /// Every saved article.
    fn fetch_articles(&self) -> Result<Vec<Article>, StoreError>;

    /// Saved articles whose title or body mention `query.keyword`.
    fn search_articles(&self, query: &SearchQuery) -> Result<Vec<Article>, StoreError>;

    /// Short human-readable origin, shown in the viewer header.
    fn describe(&self) -> String;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchPeriod {
    #[default]
    All,
    Week,
    Month,
}

impl SearchPeriod {
    pub const ALL: [Self; 3] = [Self::All, Self::Week, Self::Month];

    pub fn as_param(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Oldest creation time still inside the period, or `None` for no limit.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::All => None,
            Self::Week => Some(now - TimeDelta::weeks(1)),
            Self::Month => now.checked_sub_months(Months::new(1)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::Week => "Past week",
            Self::Month => "Past month",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub period: SearchPeriod,
}

impl SearchQuery {
    /// A query with no keyword and no period restriction selects everything.
    pub fn is_unrestricted(&self) -> bool {
        self.keyword.trim().is_empty() && self.period == SearchPeriod::All
    }
}
