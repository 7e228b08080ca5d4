//! Text metrics
//!
//! Pure, total functions over arbitrary strings. None of them fail; degenerate input
//! (empty text, no sentences) yields a defined sentinel instead.

use crate::lexicon::{AD_COPY_WE_THRESHOLD, DEFAULT_EMOJI_RANGES, Lexicon};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
static SENTENCE_SPLIT_REGEX: OnceLock<Regex> = OnceLock::new();
static WE_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"\w+").expect("Invalid regex pattern"))
}

fn sentence_split_regex() -> &'static Regex {
    SENTENCE_SPLIT_REGEX.get_or_init(|| Regex::new(r"[.!?]+").expect("Invalid regex pattern"))
}

fn we_regex() -> &'static Regex {
    WE_REGEX.get_or_init(|| Regex::new(r"\bwe\b").expect("Invalid regex pattern"))
}

/// Counts maximal runs of word characters (Unicode alphanumerics and `_`).
pub fn count_words(text: &str) -> usize {
    word_regex().find_iter(text).count()
}

/// Splits on runs of `.`, `!` and `?`, trimming each fragment and dropping empty ones.
/// Fragments keep their left-to-right order.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_split_regex()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Mean word count per sentence, or `0.0` when the text has no sentences.
pub fn average_sentence_length(text: &str) -> f64 {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return 0.0;
    }
    let words: usize = sentences.iter().map(|s| count_words(s)).sum();
    words as f64 / sentences.len() as f64
}

/// Counts characters falling in [`DEFAULT_EMOJI_RANGES`].
pub fn count_emojis(text: &str) -> usize {
    count_emojis_in(text, DEFAULT_EMOJI_RANGES)
}

/// Counts characters falling in any of the given inclusive ranges.
pub fn count_emojis_in(text: &str, ranges: &[(char, char)]) -> usize {
    let in_ranges = |c: &char| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(c));
    text.chars().filter(in_ranges).count()
}

/// Case-insensitive substring check against every non-empty phrase.
pub fn contains_any<S: AsRef<str>>(text: &str, phrases: &[S]) -> bool {
    let lower = text.to_lowercase();
    phrases
        .iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .any(|p| !p.is_empty() && lower.contains(&p))
}

/// Trims, lowercases and de-duplicates keywords, dropping blank entries. First occurrence wins.
pub fn distinct_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

/// Number of distinct keywords that appear at least once in the text (case-insensitive).
pub fn count_keyword_hits<S: AsRef<str>>(text: &str, keywords: &[S]) -> usize {
    let lower = text.to_lowercase();
    distinct_keywords(keywords)
        .iter()
        .filter(|k| lower.contains(k.as_str()))
        .count()
}

/// Counts `!` characters.
pub fn count_exclamation_marks(text: &str) -> usize {
    text.matches('!').count()
}

/// True when the text ends with a question, or asks the reader something using one of the
/// lexicon's question phrases.
pub fn has_audience_question<S: AsRef<str>>(text: &str, question_phrases: &[S]) -> bool {
    if text.contains('?') && contains_any(text, question_phrases) {
        return true;
    }
    text.trim().ends_with('?')
}

/// Approximate promotional-tone detector using the default lexicon.
///
/// Fires on any known promotional phrase, or on three or more standalone "we" combined
/// with a commercial signal word. False positives and negatives are expected.
pub fn looks_like_ad_copy(text: &str) -> bool {
    looks_like_ad_copy_with(text, &Lexicon::default())
}

pub fn looks_like_ad_copy_with(text: &str, lexicon: &Lexicon) -> bool {
    if contains_any(text, &lexicon.ad_copy_phrases) {
        return true;
    }
    let lower = text.to_lowercase();
    we_regex().find_iter(&lower).count() >= AD_COPY_WE_THRESHOLD
        && contains_any(&lower, &lexicon.ad_copy_signal_words)
}
