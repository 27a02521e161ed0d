// ============================================================
// Layer 4 — Answer Normalizer
// ============================================================
// Canonicalizes an answer string before it is compared.
//
// Steps (applied in order):
//   1. Lower-case (full Unicode lower-casing)
//   2. Strip ASCII punctuation  !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
//   3. Replace standalone articles (a / an / the) with a space
//   4. Collapse runs of whitespace into single spaces, trim ends
//
// Punctuation goes before article removal: "th'e" must lose its
// article on the first pass, otherwise normalize(normalize(s))
// would differ from normalize(s).
//
// Two marker rules run before normalization:
//   - "<|endoftext|>" is removed from predictions
//   - the ground-truth sentinel "no_passages_used" becomes ""
//
// Reference: Rust Book §8 (Strings in Rust)
//            regex crate documentation (Unicode word boundaries)

use anyhow::{Context, Result};
use regex::Regex;

/// End-of-text marker a generator may leave at the end of an answer
pub const END_OF_TEXT: &str = "<|endoftext|>";

/// Ground-truth value meaning "the dataset has no answer here"
pub const NO_ANSWER_SENTINEL: &str = "no_passages_used";

/// Owns the compiled article pattern. Build one per evaluation
/// and pass it to whatever needs to normalize.
#[derive(Debug, Clone)]
pub struct Normalizer {
    articles: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        let articles = Regex::new(r"\b(a|an|the)\b")
            .context("Cannot compile article pattern")?;
        Ok(Self { articles })
    }

    /// Normalize an answer for comparison. Idempotent.
    pub fn normalize(&self, text: &str) -> String {
        // ── Step 1: lower-case ────────────────────────────────────────────────
        let lower = text.to_lowercase();

        // ── Step 2: punctuation ───────────────────────────────────────────────
        let no_punc: String = lower
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        // ── Step 3: articles ──────────────────────────────────────────────────
        let no_articles = self.articles.replace_all(&no_punc, " ");

        // ── Step 4: whitespace ────────────────────────────────────────────────
        no_articles.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Remove end-of-text markers from a raw prediction.
    pub fn clean_prediction(&self, prediction: &str) -> String {
        prediction.replace(END_OF_TEXT, "").trim().to_string()
    }

    /// Map the no-answer sentinel to the empty string.
    pub fn clean_ground_truth<'a>(&self, answer: &'a str) -> &'a str {
        let answer = answer.trim();
        if answer == NO_ANSWER_SENTINEL {
            ""
        } else {
            answer
        }
    }
}

/// Split a normalized answer into its whitespace tokens.
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn norm() -> Normalizer {
        Normalizer::new().unwrap()
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(norm().normalize("The Cat!"), "cat");
    }

    #[test]
    fn test_removes_only_standalone_articles() {
        assert_eq!(norm().normalize("an apple and a theory"), "apple and theory");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(norm().normalize("  Paris,\t\nFrance  "), "paris france");
    }

    #[test]
    fn test_underscores_are_punctuation() {
        assert_eq!(norm().normalize("no_passages_used"), "nopassagesused");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let n = norm();
        let samples = [
            "",
            "The Cat!",
            "the.",
            "th'e quick-brown fox",
            "a-an-the",
            "A  B\tC",
            "Ünïcödé ÀND the ΣΊΣΥΦΟΣ",
            "<|endoftext|>",
            "...",
            "an",
            "thé the théâtre",
        ];
        for s in samples {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_clean_prediction_strips_end_of_text() {
        assert_eq!(norm().clean_prediction("Paris<|endoftext|>\n"), "Paris");
        assert_eq!(norm().clean_prediction("<|endoftext|>"), "");
    }

    #[test]
    fn test_clean_ground_truth_maps_sentinel_to_empty() {
        let n = norm();
        assert_eq!(n.clean_ground_truth("no_passages_used"), "");
        assert_eq!(n.clean_ground_truth(" Paris "), "Paris");
    }

    #[test]
    fn test_tokens_split_on_whitespace() {
        assert_eq!(tokens("paris france"), vec!["paris", "france"]);
        assert!(tokens("").is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn prop_normalize_is_idempotent(s in "\\PC*") {
            let n = norm();
            let once = n.normalize(&s);
            prop_assert_eq!(n.normalize(&once), once);
        }

        #[test]
        fn prop_articles_and_punctuation_never_survive(s in "[ a-zA-Z.,!'-]{0,40}") {
            let out = norm().normalize(&s);
            prop_assert!(!out.chars().any(|c| c.is_ascii_punctuation()));
            prop_assert!(!out.split(' ').any(|t| t == "a" || t == "an" || t == "the"));
        }
    }
}
