//! Heuristic scoring
//!
//! Six independent sub-scores on a 0-5 integer scale, computed without any model call.
//! Every scorer is total over arbitrary input, including the empty string.

use crate::lexicon::Lexicon;
use crate::text::{
    average_sentence_length, contains_any, count_emojis_in, count_exclamation_marks,
    count_keyword_hits, count_words, distinct_keywords, has_audience_question,
    looks_like_ad_copy_with,
};
use qolab_core::Constraints;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Highest value any single sub-score can take.
pub const MAX_SUB_SCORE: u8 = 5;
/// Highest possible heuristic total (six sub-scores at [`MAX_SUB_SCORE`]).
pub const MAX_HEURISTIC_TOTAL: u8 = 6 * MAX_SUB_SCORE;

const HOOK_WORD_RANGE: std::ops::RangeInclusive<usize> = 5..=35;
const HOOK_POINTS: u8 = 3;
const ENGAGEMENT_POINTS: u8 = 2;

/// Ratio floors for the length-fit score when the text falls outside the target range.
const LENGTH_RATIO_FLOORS: &[(f64, u8)] = &[(0.8, 4), (0.6, 3), (0.4, 2), (0.2, 1)];
const KEYWORD_COVERAGE_FLOORS: &[(f64, u8)] = &[(0.8, 5), (0.6, 4), (0.4, 3), (0.2, 2)];
/// Words-per-sentence ceilings; shorter sentences read more easily.
const CLARITY_CEILINGS: &[(f64, u8)] = &[(20.0, 5), (25.0, 4), (30.0, 3), (35.0, 2), (45.0, 1)];
const DISTINCT_TRIGRAM_FLOORS: &[(f64, u8)] = &[(0.9, 5), (0.8, 4), (0.7, 3), (0.6, 2), (0.4, 1)];

const BANNED_PHRASE_PENALTY: i32 = 2;
const EMOJI_PENALTY: i32 = 1;
const EXCLAMATION_PENALTY: i32 = 1;
const FIRST_PERSON_PENALTY: i32 = 1;
const AD_COPY_PENALTY: i32 = 2;

fn score_at_or_above(value: f64, floors: &[(f64, u8)]) -> u8 {
    floors
        .iter()
        .find(|(floor, _)| value >= *floor)
        .map_or(0, |(_, score)| *score)
}

fn score_at_or_below(value: f64, ceilings: &[(f64, u8)]) -> u8 {
    ceilings
        .iter()
        .find(|(ceiling, _)| value <= *ceiling)
        .map_or(0, |(_, score)| *score)
}

/// The six heuristic sub-scores and their total.
///
/// Only constructed whole: either by [`HeuristicScorer::evaluate`] or by deserialising a
/// record whose sub-scores are in range and whose total matches their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHeuristicScoreSet")]
pub struct HeuristicScoreSet {
    length_fit: u8,
    structure: u8,
    keyword_coverage: u8,
    clarity: u8,
    repetition: u8,
    brand_voice: u8,
    total_heuristics: u8,
}

#[derive(Deserialize)]
struct RawHeuristicScoreSet {
    length_fit: u8,
    structure: u8,
    keyword_coverage: u8,
    clarity: u8,
    repetition: u8,
    brand_voice: u8,
    total_heuristics: u8,
}

impl TryFrom<RawHeuristicScoreSet> for HeuristicScoreSet {
    type Error = String;

    fn try_from(raw: RawHeuristicScoreSet) -> Result<Self, Self::Error> {
        let parts = [
            ("length_fit", raw.length_fit),
            ("structure", raw.structure),
            ("keyword_coverage", raw.keyword_coverage),
            ("clarity", raw.clarity),
            ("repetition", raw.repetition),
            ("brand_voice", raw.brand_voice),
        ];
        if let Some((name, value)) = parts.iter().find(|(_, v)| *v > MAX_SUB_SCORE) {
            return Err(format!("{name} = {value} is outside 0..={MAX_SUB_SCORE}"));
        }
        let set = Self::from_parts(
            raw.length_fit,
            raw.structure,
            raw.keyword_coverage,
            raw.clarity,
            raw.repetition,
            raw.brand_voice,
        );
        if set.total_heuristics != raw.total_heuristics {
            return Err(format!(
                "total_heuristics = {} does not equal the sub-score sum {}",
                raw.total_heuristics, set.total_heuristics
            ));
        }
        Ok(set)
    }
}

impl HeuristicScoreSet {
    fn from_parts(
        length_fit: u8,
        structure: u8,
        keyword_coverage: u8,
        clarity: u8,
        repetition: u8,
        brand_voice: u8,
    ) -> Self {
        let total_heuristics =
            length_fit + structure + keyword_coverage + clarity + repetition + brand_voice;
        Self {
            length_fit,
            structure,
            keyword_coverage,
            clarity,
            repetition,
            brand_voice,
            total_heuristics,
        }
    }

    pub fn length_fit(&self) -> u8 {
        self.length_fit
    }

    pub fn structure(&self) -> u8 {
        self.structure
    }

    pub fn keyword_coverage(&self) -> u8 {
        self.keyword_coverage
    }

    pub fn clarity(&self) -> u8 {
        self.clarity
    }

    pub fn repetition(&self) -> u8 {
        self.repetition
    }

    pub fn brand_voice(&self) -> u8 {
        self.brand_voice
    }

    pub fn total(&self) -> u8 {
        self.total_heuristics
    }

    /// Named sub-scores in a fixed order, without the total.
    pub fn breakdown(&self) -> [(&'static str, u8); 6] {
        [
            ("length_fit", self.length_fit),
            ("structure", self.structure),
            ("keyword_coverage", self.keyword_coverage),
            ("clarity", self.clarity),
            ("repetition", self.repetition),
            ("brand_voice", self.brand_voice),
        ]
    }
}

/// Runs the six heuristics with a configurable [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    lexicon: Lexicon,
}

impl HeuristicScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// 5 inside `[min_words, max_words]`; otherwise graded by how far the count falls short
    /// of `min_words` (or overshoots `max_words`). Empty text outside the range scores 0.
    pub fn length_fit(&self, text: &str, min_words: usize, max_words: usize) -> u8 {
        let words = count_words(text);
        if (min_words..=max_words).contains(&words) {
            return MAX_SUB_SCORE;
        }
        if words == 0 {
            return 0;
        }
        let ratio = if words < min_words {
            words as f64 / min_words.max(1) as f64
        } else {
            max_words as f64 / words as f64
        };
        score_at_or_above(ratio, LENGTH_RATIO_FLOORS)
    }

    /// Hook length plus an audience question or call to action. Bullets are not scored.
    ///
    /// The hook is the text up to the second `.`; `!` and `?` do not end it.
    pub fn structure(&self, text: &str) -> u8 {
        let mut score = 0;
        let hook = text.split('.').take(2).collect::<Vec<_>>().join(".");
        if HOOK_WORD_RANGE.contains(&count_words(&hook)) {
            score += HOOK_POINTS;
        }
        if has_audience_question(text, &self.lexicon.question_phrases)
            || contains_any(text, &self.lexicon.cta_phrases)
        {
            score += ENGAGEMENT_POINTS;
        }
        score.min(MAX_SUB_SCORE)
    }

    /// Share of distinct, non-blank keywords that appear in the text.
    pub fn keyword_coverage<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> u8 {
        let distinct = distinct_keywords(keywords);
        if distinct.is_empty() {
            return 0;
        }
        let coverage = count_keyword_hits(text, &distinct) as f64 / distinct.len() as f64;
        match score_at_or_above(coverage, KEYWORD_COVERAGE_FLOORS) {
            0 if coverage > 0.0 => 1,
            score => score,
        }
    }

    pub fn clarity(&self, text: &str) -> u8 {
        let avg_len = average_sentence_length(text);
        if avg_len == 0.0 {
            return 0;
        }
        score_at_or_below(avg_len, CLARITY_CEILINGS)
    }

    /// Ratio of distinct to total word trigrams over lowercase whitespace tokens.
    pub fn repetition(&self, text: &str) -> u8 {
        let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        if words.len() < 3 {
            return MAX_SUB_SCORE;
        }
        let trigrams: Vec<&[String]> = words.windows(3).collect();
        let distinct: HashSet<&[String]> = trigrams.iter().copied().collect();
        let ratio = distinct.len() as f64 / trigrams.len() as f64;
        score_at_or_above(ratio, DISTINCT_TRIGRAM_FLOORS)
    }

    /// Starts at 5 and subtracts every triggered penalty, flooring the sum at 0.
    pub fn brand_voice(&self, text: &str, constraints: &Constraints) -> u8 {
        let mut score = i32::from(MAX_SUB_SCORE);
        if contains_any(text, &constraints.banned_phrases) {
            score -= BANNED_PHRASE_PENALTY;
        }
        if count_emojis_in(text, &self.lexicon.emoji_ranges) > constraints.max_emojis {
            score -= EMOJI_PENALTY;
        }
        if count_exclamation_marks(text) > constraints.max_exclamation_marks {
            score -= EXCLAMATION_PENALTY;
        }
        if constraints.prefer_first_person && !has_first_person(text) {
            score -= FIRST_PERSON_PENALTY;
        }
        if constraints.avoid_salesy_ad_copy && looks_like_ad_copy_with(text, &self.lexicon) {
            score -= AD_COPY_PENALTY;
        }
        u8::try_from(score.max(0)).unwrap_or(0)
    }

    pub fn evaluate<S: AsRef<str>>(
        &self,
        text: &str,
        constraints: &Constraints,
        keywords: &[S],
    ) -> HeuristicScoreSet {
        let scores = HeuristicScoreSet::from_parts(
            self.length_fit(text, constraints.min_words, constraints.max_words),
            self.structure(text),
            self.keyword_coverage(text, keywords),
            self.clarity(text),
            self.repetition(text),
            self.brand_voice(text, constraints),
        );
        tracing::debug!(
            length_fit = scores.length_fit,
            structure = scores.structure,
            keyword_coverage = scores.keyword_coverage,
            clarity = scores.clarity,
            repetition = scores.repetition,
            brand_voice = scores.brand_voice,
            total = scores.total_heuristics,
            "Heuristic scores computed"
        );
        scores
    }
}

/// Space-padded, case-insensitive check for the standalone words "i" or "my".
fn has_first_person(text: &str) -> bool {
    let padded = format!(" {} ", text.to_lowercase());
    padded.contains(" i ") || padded.contains(" my ")
}

pub fn score_length_fit(text: &str, min_words: usize, max_words: usize) -> u8 {
    HeuristicScorer::default().length_fit(text, min_words, max_words)
}

pub fn score_structure<S: AsRef<str>>(text: &str, cta_phrases: &[S]) -> u8 {
    scorer_with_cta(cta_phrases).structure(text)
}

pub fn score_keyword_coverage<S: AsRef<str>>(text: &str, keywords: &[S]) -> u8 {
    HeuristicScorer::default().keyword_coverage(text, keywords)
}

pub fn score_clarity(text: &str) -> u8 {
    HeuristicScorer::default().clarity(text)
}

pub fn score_repetition(text: &str) -> u8 {
    HeuristicScorer::default().repetition(text)
}

pub fn score_brand_voice(text: &str, constraints: &Constraints) -> u8 {
    HeuristicScorer::default().brand_voice(text, constraints)
}

/// Scores `text` on all six heuristics using the default lexicon with the given CTA phrases.
pub fn evaluate_heuristics<K, C>(
    text: &str,
    constraints: &Constraints,
    keywords: &[K],
    cta_phrases: &[C],
) -> HeuristicScoreSet
where
    K: AsRef<str>,
    C: AsRef<str>,
{
    scorer_with_cta(cta_phrases).evaluate(text, constraints, keywords)
}

fn scorer_with_cta<S: AsRef<str>>(cta_phrases: &[S]) -> HeuristicScorer {
    let cta_phrases = cta_phrases.iter().map(|p| p.as_ref().to_string());
    HeuristicScorer::new(Lexicon::default().with_cta_phrases(cta_phrases))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qolab_model::generate_dry_run;
    use crate::lexicon::DEFAULT_CTA_PHRASES;

    fn repeat_word(count: usize) -> String {
        "word ".repeat(count)
    }

    #[test]
    fn length_fit_within_bounds() {
        assert_eq!(score_length_fit(&repeat_word(100), 90, 110), 5);
    }

    #[test]
    fn length_fit_at_range_edges() {
        assert_eq!(score_length_fit(&repeat_word(90), 90, 110), 5);
        assert_eq!(score_length_fit(&repeat_word(110), 90, 110), 5);
    }

    #[test]
    fn length_fit_too_short() {
        // 40 / 90 ≈ 0.44
        assert_eq!(score_length_fit(&repeat_word(40), 90, 110), 2);
    }

    #[test]
    fn length_fit_too_long() {
        // 110 / 200 = 0.55
        assert_eq!(score_length_fit(&repeat_word(200), 90, 110), 2);
        // 110 / 120 ≈ 0.92
        assert_eq!(score_length_fit(&repeat_word(120), 90, 110), 4);
    }

    #[test]
    fn length_fit_empty_text() {
        assert_eq!(score_length_fit("", 90, 110), 0);
        assert_eq!(score_length_fit("", 0, 10), 5);
        assert_eq!(score_length_fit(&repeat_word(10), 90, 110), 0);
    }

    #[test]
    fn structure_hook_and_cta() {
        let text =
            "Hook sentence here.\n\n- Bullet one\n- Bullet two\n\nBook a demo to learn more.";
        assert_eq!(score_structure(text, &["book a demo"]), 5);
    }

    #[test]
    fn structure_hook_only() {
        let text = "I spent last quarter rebuilding our forecast. It was humbling.";
        assert_eq!(score_structure::<&str>(text, &[]), 3);
    }

    #[test]
    fn structure_question_without_hook() {
        assert_eq!(score_structure::<&str>("Thoughts?", &[]), 2);
        assert_eq!(score_structure::<&str>("", &[]), 0);
    }

    #[test]
    fn structure_hook_ends_at_periods_only() {
        let text = format!(
            "Big launch today for our team! Everyone should see this now! {}.",
            repeat_word(40)
        );
        assert_eq!(score_structure::<&str>(&text, &[]), 0);

        let shouting = generate_dry_run("linkedin_b2b_saas", "Direct & minimal", 1.0);
        assert_eq!(score_structure(&shouting, DEFAULT_CTA_PHRASES), 2);

        let variant = "Problem -> Solution -> Proof";
        let proof = generate_dry_run("linkedin_b2b_saas", variant, 0.7);
        assert_eq!(score_structure(&proof, DEFAULT_CTA_PHRASES), 2);
    }

    #[test]
    fn structure_long_hook_misses_bonus() {
        let text = format!("{}.", repeat_word(40));
        assert_eq!(score_structure::<&str>(&text, &[]), 0);
    }

    #[test]
    fn keyword_coverage_thresholds() {
        let keywords = ["forecast", "pipeline", "revenue", "churn", "board"];
        let coverage = |text: &str| score_keyword_coverage(text, &keywords);
        assert_eq!(coverage("forecast pipeline revenue churn"), 5);
        assert_eq!(coverage("forecast pipeline revenue"), 4);
        assert_eq!(coverage("forecast pipeline"), 3);
        assert_eq!(coverage("forecast"), 2);
        assert_eq!(coverage("nothing relevant"), 0);
    }

    #[test]
    fn keyword_coverage_small_share_scores_one() {
        let keywords: Vec<String> = (0..10).map(|i| format!("kw{i}")).collect();
        assert_eq!(score_keyword_coverage("kw0 only", &keywords), 1);
    }

    #[test]
    fn keyword_coverage_empty_list() {
        assert_eq!(score_keyword_coverage::<&str>("anything", &[]), 0);
        assert_eq!(score_keyword_coverage("anything", &["  ", ""]), 0);
    }

    #[test]
    fn clarity_prefers_short_sentences() {
        assert_eq!(score_clarity(""), 0);
        assert_eq!(score_clarity("Short and sweet."), 5);
        assert_eq!(score_clarity(&format!("{}.", repeat_word(25))), 4);
        assert_eq!(score_clarity(&format!("{}.", repeat_word(44))), 1);
        assert_eq!(score_clarity(&format!("{}.", repeat_word(46))), 0);
    }

    #[test]
    fn repetition_short_text_is_clean() {
        assert_eq!(score_repetition(""), 5);
        assert_eq!(score_repetition("word word"), 5);
    }

    #[test]
    fn repetition_penalises_loops() {
        assert_eq!(score_repetition(&repeat_word(50)), 0);
        let varied = "the quick brown fox jumps over the lazy dog";
        assert_eq!(score_repetition(varied), 5);
    }

    #[test]
    fn brand_voice_banned_phrase_and_punctuation() {
        let constraints = Constraints {
            banned_phrases: vec!["game-changer".to_string(), "revolutionary".to_string()],
            ..Constraints::with_word_range(1, 100)
        };
        let text = "This is a revolutionary game-changer!!!";
        assert_eq!(score_brand_voice(text, &constraints), 2);

        let with_emoji = "This is a revolutionary game-changer!!! \u{1F680}";
        assert_eq!(score_brand_voice(with_emoji, &constraints), 1);
    }

    #[test]
    fn brand_voice_floors_at_zero() {
        let constraints = Constraints {
            banned_phrases: vec!["unlock".to_string()],
            prefer_first_person: true,
            avoid_salesy_ad_copy: true,
            ..Constraints::with_word_range(1, 100)
        };
        let text = "Unlock growth!!! \u{1F680}";
        assert_eq!(score_brand_voice(text, &constraints), 0);
    }

    #[test]
    fn brand_voice_first_person_preference() {
        let constraints = Constraints {
            prefer_first_person: true,
            ..Constraints::with_word_range(1, 100)
        };
        let voice = |text: &str| score_brand_voice(text, &constraints);
        assert_eq!(voice("I rebuilt the forecast"), 5);
        assert_eq!(voice("Honestly my team did"), 5);
        assert_eq!(voice("The team rebuilt it"), 4);
    }

    #[test]
    fn custom_lexicon_drives_emoji_and_ad_copy_penalties() {
        let lexicon = Lexicon::default()
            .with_emoji_ranges(vec![('\u{2700}', '\u{27BF}')])
            .with_ad_copy_phrases(["world-class"]);
        let scorer = HeuristicScorer::new(lexicon);
        assert_eq!(scorer.lexicon().ad_copy_phrases, vec!["world-class"]);

        let constraints = Constraints {
            avoid_salesy_ad_copy: true,
            ..Constraints::with_word_range(1, 100)
        };
        let text = "A world-class launch \u{2764}";
        assert_eq!(score_brand_voice(text, &constraints), 5);
        assert_eq!(scorer.brand_voice(text, &constraints), 2);
    }

    #[test]
    fn evaluate_heuristics_total_is_sum() {
        let constraints = Constraints::with_word_range(5, 50);
        let text = "I rebuilt our revenue forecast last quarter. What would you change?";
        let scores = evaluate_heuristics(text, &constraints, &["forecast"], &["book a demo"]);
        let sum: u8 = scores.breakdown().iter().map(|(_, v)| v).sum();
        assert_eq!(scores.total(), sum);
        assert_eq!(scores.length_fit(), 5);
        assert_eq!(scores.structure(), 5);
        assert_eq!(scores.keyword_coverage(), 5);
    }

    #[test]
    fn score_set_round_trips_and_rejects_tampering() {
        let scores = evaluate_heuristics::<&str, &str>(
            "Short post.",
            &Constraints::with_word_range(1, 10),
            &[],
            &[],
        );
        let json = serde_json::to_value(scores).unwrap();
        let back: HeuristicScoreSet = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, scores);

        let mut tampered = json.clone();
        tampered["total_heuristics"] = serde_json::json!(30);
        let result: Result<HeuristicScoreSet, _> = serde_json::from_value(tampered);
        assert!(result.is_err());

        let mut out_of_range = json;
        out_of_range["clarity"] = serde_json::json!(9);
        let result: Result<HeuristicScoreSet, _> = serde_json::from_value(out_of_range);
        assert!(result.is_err());
    }
}
