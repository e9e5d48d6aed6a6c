//! Job description keywords: pulls content words out of a JD and checks which ones the resume covers.
//!
//! Reported next to the ATS score; it never feeds into it.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

use crate::scoring::truncated_percent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdCoverage {
    pub keywords: Vec<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub score: u8, // 0 – 100
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("static pattern"))
}

fn english_stopwords() -> &'static HashSet<String> {
    static STOPWORDS: OnceLock<HashSet<String>> = OnceLock::new();
    STOPWORDS.get_or_init(|| {
        get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_string().to_lowercase())
            .collect()
    })
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    word_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|t| t.chars().all(char::is_alphanumeric))
}

/// Lower-cased, stopword-free, de-duplicated JD tokens in first-seen order.
pub fn extract_jd_keywords(jd_text: &str) -> Vec<String> {
    let stopwords = english_stopwords();
    let mut seen = HashSet::new();

    tokenize(jd_text)
        .filter(|t| !stopwords.contains(t))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Splits `keywords` by whether each appears as a whole word in `resume_text`.
pub fn jd_coverage(keywords: &[String], resume_text: &str) -> JdCoverage {
    let resume_words: HashSet<String> = tokenize(resume_text).collect();

    let (matched, missing): (Vec<String>, Vec<String>) = keywords
        .iter()
        .cloned()
        .partition(|k| resume_words.contains(k));

    let score = truncated_percent(matched.len(), keywords.len());
    JdCoverage {
        keywords: keywords.to_vec(),
        matched,
        missing,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = r#"
        Backend Engineer
        We are looking for an engineer with strong Python and SQL skills.
        Experience with Docker and Kubernetes is a plus. Python, python, PYTHON!
    "#;

    #[test]
    fn test_drops_stopwords() {
        let keywords = extract_jd_keywords(JD);
        for stopword in ["we", "are", "for", "an", "with", "and", "is", "a"] {
            assert!(
                !keywords.contains(&stopword.to_string()),
                "stopword '{stopword}' leaked"
            );
        }
        assert!(keywords.contains(&"python".to_string()));
        assert!(keywords.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_dedupes_preserving_first_occurrence() {
        let keywords = extract_jd_keywords(JD);
        assert_eq!(keywords.iter().filter(|k| *k == "python").count(), 1);
        assert_eq!(keywords.first().map(String::as_str), Some("backend"));
    }

    #[test]
    fn test_drops_non_alphanumeric_tokens() {
        let keywords = extract_jd_keywords("snake_case identifiers and rust");
        assert!(!keywords.contains(&"snake_case".to_string()));
        assert!(keywords.contains(&"rust".to_string()));
    }

    #[test]
    fn test_empty_jd() {
        assert!(extract_jd_keywords("").is_empty());
        let coverage = jd_coverage(&[], "python developer");
        assert_eq!(coverage.score, 0);
        assert!(coverage.matched.is_empty());
    }

    #[test]
    fn test_coverage_splits_keywords() {
        let keywords = vec![
            "python".to_string(),
            "docker".to_string(),
            "kubernetes".to_string(),
            "sql".to_string(),
        ];
        let coverage = jd_coverage(&keywords, "Shipped Python services on Docker; pythonic SQLite");
        assert_eq!(coverage.matched, vec!["python", "docker"]);
        assert_eq!(coverage.missing, vec!["kubernetes", "sql"]);
        assert_eq!(coverage.score, 50);
    }
}
