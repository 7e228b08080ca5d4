//! Fixed phrase and code-point tables used by the heuristics.
//!
//! The defaults are process-wide constants. A [`Lexicon`] copies them into owned vectors so a
//! scorer can be given different tables without touching global state.

use serde::{Deserialize, Serialize};

/// Call-to-action phrases that earn the structure bonus.
pub const DEFAULT_CTA_PHRASES: &[&str] = &[
    "book a demo",
    "book your demo",
    "try it",
    "dm me",
    "contact us",
    "start a trial",
];

/// Phrases that mark a question as addressed to the reader.
pub const DEFAULT_QUESTION_PHRASES: &[&str] = &[
    "what do you think",
    "how do you",
    "curious how others",
    "curious if",
    "would love to hear",
];

/// Promotional phrases and buzzwords that flag text as ad copy on their own.
pub const DEFAULT_AD_COPY_PHRASES: &[&str] = &[
    "book a demo",
    "request a demo",
    "schedule a demo",
    "sign up today",
    "get started today",
    "limited time offer",
    "try it free",
    "start your free trial",
    "unlock",
    "supercharge",
    "game-changer",
    "revolutionary",
    "cutting-edge",
    "next-level",
    "boost your",
    "transform your",
    "drive predictable growth",
];

/// Commercial words that, combined with heavy use of "we", flag text as ad copy.
pub const DEFAULT_AD_COPY_SIGNAL_WORDS: &[&str] = &["offer", "customers", "pricing", "upgrade"];

/// Minimum number of standalone "we" tokens for the signal-word rule to apply.
pub const AD_COPY_WE_THRESHOLD: usize = 3;

/// Inclusive code-point ranges counted as emoji:
///
/// - U+1F300..=U+1F5FF Miscellaneous Symbols and Pictographs
/// - U+1F600..=U+1F64F Emoticons
/// - U+1F680..=U+1F6FF Transport and Map Symbols
/// - U+1F700..=U+1F77F Alchemical Symbols
/// - U+1F780..=U+1F7FF Geometric Shapes Extended
/// - U+1F900..=U+1F9FF Supplemental Symbols and Pictographs
pub const DEFAULT_EMOJI_RANGES: &[(char, char)] = &[
    ('\u{1F300}', '\u{1F6FF}'),
    ('\u{1F700}', '\u{1F77F}'),
    ('\u{1F780}', '\u{1F7FF}'),
    ('\u{1F900}', '\u{1F9FF}'),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub cta_phrases: Vec<String>,
    pub question_phrases: Vec<String>,
    pub ad_copy_phrases: Vec<String>,
    pub ad_copy_signal_words: Vec<String>,
    pub emoji_ranges: Vec<(char, char)>,
}

fn owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            cta_phrases: owned(DEFAULT_CTA_PHRASES),
            question_phrases: owned(DEFAULT_QUESTION_PHRASES),
            ad_copy_phrases: owned(DEFAULT_AD_COPY_PHRASES),
            ad_copy_signal_words: owned(DEFAULT_AD_COPY_SIGNAL_WORDS),
            emoji_ranges: DEFAULT_EMOJI_RANGES.to_vec(),
        }
    }
}

impl Lexicon {
    #[must_use]
    pub fn with_cta_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cta_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_ad_copy_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ad_copy_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_emoji_ranges(mut self, ranges: Vec<(char, char)>) -> Self {
        self.emoji_ranges = ranges;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lexicon_mirrors_constant_tables() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.cta_phrases.len(), DEFAULT_CTA_PHRASES.len());
        assert!(lexicon.ad_copy_phrases.iter().any(|p| p == "game-changer"));
        assert_eq!(lexicon.emoji_ranges, DEFAULT_EMOJI_RANGES);
    }

    #[test]
    fn builders_replace_tables() {
        let lexicon = Lexicon::default()
            .with_cta_phrases(["reply below"])
            .with_ad_copy_phrases(["world-class"])
            .with_emoji_ranges(vec![('\u{2700}', '\u{27BF}')]);
        assert_eq!(lexicon.cta_phrases, vec!["reply below".to_string()]);
        assert_eq!(lexicon.ad_copy_phrases, vec!["world-class".to_string()]);
        assert_eq!(lexicon.emoji_ranges, vec![('\u{2700}', '\u{27BF}')]);
    }
}
