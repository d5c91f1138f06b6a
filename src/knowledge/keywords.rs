use std::collections::HashSet;
use std::sync::OnceLock;

use regex::bytes::Regex;

use super::dictionary::{GENERIC_EN_STOPWORDS, TECH_SIGNALS, TECH_TERM_ALIASES};

/// Upper bound on keywords kept per article.
pub const MAX_KEYWORDS: usize = 50;

/// Flat score for technical-looking tokens that are not in the dictionary.
const HEURISTIC_SCORE: f64 = 0.8;

/// ASCII word boundaries: non-ASCII letters (kana, kanji) count as separators
/// so that "rustで" still yields "rust".
const TOKEN_PATTERN: &str = r"(?-u:\b)[a-z][a-z0-9+#.\-]{3,}(?-u:\b)";

enum AliasMatcher {
    Substring(&'static str),
    WordBounded(Regex),
}

impl AliasMatcher {
    fn compile(alias: &'static str) -> Self {
        if has_cjk(alias) {
            return Self::Substring(alias);
        }

        let pattern = format!(r"(?-u:\b){}(?-u:\b)", regex::escape(alias));
        Self::WordBounded(Regex::new(&pattern).expect("escaped alias is a valid pattern"))
    }

    fn count(&self, text: &str) -> usize {
        match self {
            Self::Substring(alias) => text.matches(alias).count(),
            Self::WordBounded(regex) => regex.find_iter(text.as_bytes()).count(),
        }
    }
}

struct DictionaryEntry {
    canonical: &'static str,
    aliases: Vec<AliasMatcher>,
}

fn dictionary() -> &'static [DictionaryEntry] {
    static ENTRIES: OnceLock<Vec<DictionaryEntry>> = OnceLock::new();
    ENTRIES.get_or_init(|| {
        TECH_TERM_ALIASES
            .iter()
            .map(|&(canonical, aliases)| DictionaryEntry {
                canonical,
                aliases: aliases.iter().copied().map(AliasMatcher::compile).collect(),
            })
            .collect()
    })
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

fn has_cjk(term: &str) -> bool {
    term.chars()
        .any(|ch| matches!(ch, '\u{3040}'..='\u{30ff}' | '\u{4e00}'..='\u{9fff}'))
}

/// `1 + ln(len + 1)`: longer, more specific keywords weigh more.
pub(super) fn length_weight(word: &str) -> f64 {
    1.0 + ((word.chars().count() + 1) as f64).ln()
}

/// Ranked canonical keywords found in `text`, best first, at most
/// [`MAX_KEYWORDS`].
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase();
    let mut scored: Vec<(String, f64)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for entry in dictionary() {
        let occurrences = entry
            .aliases
            .iter()
            .map(|alias| alias.count(&normalized))
            .sum::<usize>();
        if occurrences > 0 {
            let score = occurrences as f64 * length_weight(entry.canonical);
            seen.insert(entry.canonical.to_owned());
            scored.push((entry.canonical.to_owned(), score));
        }
    }

    for found in token_regex().find_iter(normalized.as_bytes()) {
        let Ok(token) = std::str::from_utf8(found.as_bytes()) else {
            continue;
        };
        if GENERIC_EN_STOPWORDS.contains(&token) {
            continue;
        }
        if !TECH_SIGNALS.iter().any(|signal| token.contains(signal)) {
            continue;
        }
        if seen.insert(token.to_owned()) {
            scored.push((token.to_owned(), HEURISTIC_SCORE));
        }
    }

    // Stable: equal scores keep dictionary order, then first-seen token order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(MAX_KEYWORDS);
    scored.into_iter().map(|(keyword, _)| keyword).collect()
}

/// Unique keywords of one article. Iteration follows extraction rank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordSet {
    ranked: Vec<String>,
    members: HashSet<String>,
}

impl KeywordSet {
    pub fn from_text(text: &str) -> Self {
        Self::from_ranked(extract_keywords(text))
    }

    /// Keeps the first occurrence of each keyword, up to [`MAX_KEYWORDS`].
    pub fn from_ranked<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for keyword in keywords {
            if set.ranked.len() >= MAX_KEYWORDS {
                break;
            }
            let keyword = keyword.into();
            if set.members.insert(keyword.clone()) {
                set.ranked.push(keyword);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.members.contains(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(String::as_str)
    }

    /// Keywords present in both sets, in this set's rank order.
    pub fn shared_with<'a>(&'a self, other: &KeywordSet) -> Vec<&'a str> {
        self.iter().filter(|keyword| other.contains(keyword)).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }

    #[test]
    fn matches_aliases_case_insensitively() {
        let keywords = extract_keywords("TypeScript and JavaScript");
        assert!(keywords.contains(&"typescript".to_owned()));
        assert!(keywords.contains(&"javascript".to_owned()));
    }

    #[test]
    fn word_boundaries_keep_java_out_of_javascript() {
        let keywords = extract_keywords("javascript everywhere");
        assert_eq!(keywords, vec!["javascript".to_owned()]);
    }

    #[test]
    fn ranks_by_weighted_occurrences() {
        let keywords = extract_keywords("rust rust rust docker");
        assert_eq!(keywords, vec!["rust".to_owned(), "docker".to_owned()]);
    }

    #[test]
    fn japanese_aliases_match_as_substrings() {
        let keywords = extract_keywords("Go言語でDockerコンテナを設計する");
        assert_eq!(
            keywords,
            vec![
                "docker".to_owned(),
                "architecture".to_owned(),
                "golang".to_owned()
            ]
        );
    }

    #[test]
    fn english_terms_next_to_japanese_text_still_match() {
        let keywords = extract_keywords("Rustで書いたKubernetesの話");
        assert!(keywords.contains(&"rust".to_owned()));
        assert!(keywords.contains(&"kubernetes".to_owned()));
    }

    #[test]
    fn symbol_suffixed_aliases_need_a_following_word_character() {
        assert!(extract_keywords("modern c++ tips").is_empty());
        assert_eq!(extract_keywords("cpp tips"), vec!["c++".to_owned()]);
    }

    #[test]
    fn heuristic_tokens_need_a_tech_signal() {
        let keywords = extract_keywords("the oauth2 middleware and apicache layer");
        assert_eq!(keywords, vec!["oauth2".to_owned(), "apicache".to_owned()]);
    }

    #[test]
    fn heuristic_tokens_do_not_duplicate_dictionary_hits() {
        let keywords = extract_keywords("fastapi fastapi");
        assert_eq!(keywords, vec!["fastapi".to_owned()]);
    }

    #[test]
    fn caps_at_fifty_keeping_first_seen_ties() {
        let text = (0..80)
            .map(|index| format!("server{index}"))
            .collect::<Vec<_>>()
            .join(" ");

        let keywords = extract_keywords(&text);

        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords.first().map(String::as_str), Some("server0"));
        assert_eq!(keywords.last().map(String::as_str), Some("server49"));
    }

    #[test]
    fn keyword_set_collapses_duplicates_in_rank_order() {
        let set = KeywordSet::from_ranked(["rust", "docker", "rust", "sql"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["rust", "docker", "sql"]);

        let other = KeywordSet::from_ranked(["sql", "rust"]);
        assert_eq!(set.shared_with(&other), vec!["rust", "sql"]);
    }
}
