//! Constraint rubric for free-text writing.
//!
//! Scoring steps, applied in order:
//!
//! 1. Blank text scores 0.
//! 2. More than `max_words` words scores 0 ("Exceeded word limit").
//! 3. Start at 1.0 and subtract `0.7 * missing / required` for required tokens.
//! 4. More than `max_sentences` sentences subtracts 0.2.
//! 5. Fewer than `min_words` words halves the score.
//! 6. A coherence estimate below `min_coherence` multiplies by 0.6.
//! 7. Clamp to `[0, 1]` with a floor of 0.05 for any submitted text.

use std::collections::HashSet;

use crate::model::{ItemResult, WritingConstraints, WritingItem};

const MISSING_TOKEN_WEIGHT: f64 = 0.7;
const SENTENCE_PENALTY: f64 = 0.2;
const UNDER_LENGTH_FACTOR: f64 = 0.5;
const INCOHERENT_FACTOR: f64 = 0.6;
const CREDIT_FLOOR: f64 = 0.05;

/// Words with surrounding punctuation stripped.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Segments ending in `.`, `!` or `?` (or end of text) that contain a word.
pub fn sentence_count(text: &str) -> usize {
    text.split(&['.', '!', '?'][..])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
}

/// Case-insensitive match that must start on a word boundary. Trailing
/// letters are allowed so inflected forms count.
pub fn contains_token(text: &str, token: &str) -> bool {
    let haystack = text.to_lowercase();
    let needle = token.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystack.match_indices(&needle).any(|(pos, _)| {
        haystack[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Heuristic coherence in `[0, 1]`: the mean of a sentence-length score,
/// a lexical-diversity score, and the share of words containing letters.
pub fn coherence(text: &str) -> f64 {
    let words = words(text);
    if words.is_empty() {
        return 0.0;
    }
    let total = words.len() as f64;

    let avg_len = total / sentence_count(text).max(1) as f64;
    let length_score = if avg_len < 4.0 {
        avg_len / 4.0
    } else if avg_len > 30.0 {
        30.0 / avg_len
    } else {
        1.0
    };

    let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let diversity_score = (unique.len() as f64 / total / 0.4).min(1.0);

    let alphabetic = words
        .iter()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .count() as f64;
    let alpha_score = alphabetic / total;

    (length_score + diversity_score + alpha_score) / 3.0
}

/// Score free text against its constraints.
pub fn grade_text(item_id: &str, constraints: &WritingConstraints, text: &str) -> ItemResult {
    let word_list = words(text);
    if word_list.is_empty() {
        return ItemResult::new(item_id, 0.0, "No answer submitted.");
    }
    let word_count = word_list.len();
    if word_count > constraints.max_words {
        return ItemResult::new(
            item_id,
            0.0,
            format!(
                "Exceeded word limit ({word_count} words, limit {}).",
                constraints.max_words
            ),
        );
    }

    let mut score: f64 = 1.0;
    let mut notes: Vec<String> = Vec::new();

    let missing: Vec<&str> = constraints
        .required_tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !contains_token(text, t))
        .collect();
    if !missing.is_empty() && !constraints.required_tokens.is_empty() {
        score -= MISSING_TOKEN_WEIGHT * missing.len() as f64
            / constraints.required_tokens.len() as f64;
        notes.push(format!("Missing required words: {}.", missing.join(", ")));
    }

    let sentences = sentence_count(text);
    if sentences > constraints.max_sentences {
        score -= SENTENCE_PENALTY;
        notes.push(format!(
            "Too many sentences ({sentences}, limit {}).",
            constraints.max_sentences
        ));
    }

    if word_count < constraints.min_words {
        score *= UNDER_LENGTH_FACTOR;
        notes.push(format!(
            "Too short ({word_count} words, minimum {}).",
            constraints.min_words
        ));
    }

    let c = coherence(text);
    if c < constraints.min_coherence {
        score *= INCOHERENT_FACTOR;
        notes.push(format!("Low coherence ({c:.2})."));
    }

    let score = score.clamp(CREDIT_FLOOR, 1.0);
    let feedback = if notes.is_empty() {
        "All constraints satisfied.".to_string()
    } else {
        notes.join(" ")
    };
    ItemResult::new(item_id, score, feedback)
}

pub fn grade_writing(item: &WritingItem, text: &str) -> ItemResult {
    grade_text(&item.id, &item.constraints, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> WritingConstraints {
        WritingConstraints {
            required_tokens: vec!["harvest".into(), "compost".into(), "sunlight".into()],
            max_words: 60,
            max_sentences: 4,
            min_words: 15,
            min_coherence: 0.55,
        }
    }

    const GOOD: &str = "I think the harvest matters because it shapes how people plan their days. \
        Many neighbors noticed the compost during the spring season. \
        Later the sunlight helped everyone decide what to do next.";

    #[test]
    fn satisfying_text_scores_full() {
        let out = grade_text("w", &constraints(), GOOD);
        assert_eq!(out.correctness, 1.0, "{}", out.feedback);
        assert_eq!(out.feedback, "All constraints satisfied.");
    }

    #[test]
    fn blank_is_unanswered() {
        let out = grade_text("w", &constraints(), "   ");
        assert_eq!(out.correctness, 0.0);
        assert_eq!(out.feedback, "No answer submitted.");
    }

    #[test]
    fn word_limit_zeroes_score() {
        let long = "harvest compost sunlight ".repeat(30);
        let out = grade_text("w", &constraints(), &long);
        assert_eq!(out.correctness, 0.0);
        assert!(out.feedback.starts_with("Exceeded word limit"));
    }

    #[test]
    fn missing_tokens_are_listed_and_penalized() {
        let text = GOOD.replace("compost", "garden");
        let out = grade_text("w", &constraints(), &text);
        assert!((out.correctness - (1.0 - 0.7 / 3.0)).abs() < 1e-9);
        assert!(out.feedback.contains("compost"));
    }

    #[test]
    fn short_or_incoherent_text_keeps_some_credit() {
        let out = grade_text("w", &constraints(), "harvest harvest harvest.");
        assert!(out.correctness > 0.0);
        assert!(out.correctness < 0.5);
    }

    #[test]
    fn token_matching_respects_word_start() {
        assert!(contains_token("Harvests were large", "harvest"));
        assert!(contains_token("the HARVEST.", "harvest"));
        assert!(!contains_token("a preharvest check", "harvest"));
    }

    #[test]
    fn counts() {
        assert_eq!(words("Hello, world!  It's fine."), vec!["Hello", "world", "It's", "fine"]);
        assert_eq!(sentence_count("One. Two! Three? ..."), 3);
        assert_eq!(sentence_count("no terminal punctuation"), 1);
    }

    #[test]
    fn coherence_prefers_varied_prose() {
        assert!(coherence(GOOD) > 0.9);
        assert!(coherence(&"42 ".repeat(20)) < 0.55);
    }
}
