use std::collections::HashMap;

use super::article::Article;
use super::keywords::{KeywordSet, length_weight};

/// Interests kept for the corpus-wide panel.
pub const MAX_INTERESTS: usize = 10;

/// A keyword shared by a stable share of the corpus. `count` is the number of
/// articles mentioning it, not the number of mentions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interest {
    pub word: String,
    pub count: usize,
}

impl KeywordSet {
    /// Cosine similarity of binary keyword-presence vectors:
    /// `|A ∩ B| / sqrt(|A| * |B|)`, and 0 when either set is empty.
    pub fn similarity(&self, other: &KeywordSet) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        let shared = self.iter().filter(|keyword| other.contains(keyword)).count();
        shared as f64 / ((self.len() * other.len()) as f64).sqrt()
    }
}

pub fn similarity(a: &Article, b: &Article) -> f64 {
    a.keywords().similarity(&b.keywords())
}

/// Minimum number of articles a keyword must appear in to count as an interest.
pub(super) fn min_support(article_count: usize) -> usize {
    article_count.div_ceil(4).max(2)
}

pub fn extract_interests(articles: &[Article]) -> Vec<Interest> {
    let keyword_sets = articles.iter().map(Article::keywords).collect::<Vec<_>>();
    interests_from_sets(&keyword_sets)
}

pub(super) fn interests_from_sets(keyword_sets: &[KeywordSet]) -> Vec<Interest> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut document_frequency: HashMap<&str, usize> = HashMap::new();

    for set in keyword_sets {
        for keyword in set.iter() {
            let count = document_frequency.entry(keyword).or_insert_with(|| {
                first_seen.push(keyword);
                0
            });
            *count += 1;
        }
    }

    let support = min_support(keyword_sets.len());
    let mut ranked = first_seen
        .into_iter()
        .filter_map(|word| {
            let count = document_frequency.get(word).copied().unwrap_or(0);
            (count >= support).then(|| (word, count, count as f64 * length_weight(word)))
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.2.total_cmp(&a.2));
    ranked
        .into_iter()
        .take(MAX_INTERESTS)
        .map(|(word, count, _score)| Interest {
            word: word.to_owned(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn article(title: &str, body: &str) -> Article {
        Article {
            title: Some(title.to_owned()),
            rendered_body: Some(body.to_owned()),
            ..Article::default()
        }
    }

    #[test]
    fn identical_sets_are_fully_similar() {
        let a = KeywordSet::from_ranked(["rust", "docker", "sql"]);
        let b = KeywordSet::from_ranked(["sql", "rust", "docker"]);
        assert_eq!(a.similarity(&b), 1.0);
    }

    #[test]
    fn uses_geometric_mean_not_union() {
        let a = KeywordSet::from_ranked(["rust", "docker"]);
        let b = KeywordSet::from_ranked(["rust", "sql", "aws", "linux", "git", "react", "vue", "php"]);
        // 1 / sqrt(2 * 8) = 0.25; a union denominator would give 1/9.
        assert!((a.similarity(&b) - 0.25).abs() < 1e-12);
        assert_eq!(a.similarity(&b), b.similarity(&a));
    }

    #[test]
    fn empty_or_disjoint_sets_score_zero() {
        let empty = KeywordSet::default();
        let a = KeywordSet::from_ranked(["rust"]);
        let b = KeywordSet::from_ranked(["python"]);
        assert_eq!(empty.similarity(&a), 0.0);
        assert_eq!(a.similarity(&empty), 0.0);
        assert_eq!(a.similarity(&b), 0.0);
    }

    #[test]
    fn article_similarity_reads_body_and_title() {
        let a = article("Rust in Docker", "<p>Shipping a rust service</p>");
        let b = article("Docker tips", "<p>More <b>rust</b></p>");
        let c = article("Cooking", "<p>pasta</p>");

        assert_eq!(similarity(&a, &b), 1.0);
        assert_eq!(similarity(&a, &c), 0.0);
    }

    #[test]
    fn min_support_has_floor_of_two() {
        assert_eq!(min_support(0), 2);
        assert_eq!(min_support(4), 2);
        assert_eq!(min_support(9), 3);
        assert_eq!(min_support(20), 5);
    }

    #[test]
    fn interests_require_document_support() {
        let articles = vec![
            article("rust", "docker docker docker docker"),
            article("rust", "kubernetes"),
            article("python", ""),
            article("rust and python", ""),
        ];

        let interests = extract_interests(&articles);

        assert_eq!(
            interests,
            vec![
                Interest {
                    word: "rust".to_owned(),
                    count: 3,
                },
                Interest {
                    word: "python".to_owned(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn interests_keep_top_ten_by_weighted_frequency() {
        let body = "rust python java kotlin swift ruby php docker linux azure react angular";
        let articles = vec![article("", body), article("", body)];

        let interests = extract_interests(&articles);

        assert_eq!(interests.len(), MAX_INTERESTS);
        assert_eq!(interests[0].word, "angular");
        assert!(interests.iter().all(|interest| interest.count == 2));
    }

    #[test]
    fn no_articles_no_interests() {
        assert!(extract_interests(&[]).is_empty());
    }
}
