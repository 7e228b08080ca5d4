//! Case, constraint and prompt-suite configuration.
//!
//! Everything here is loaded once from JSON and validated at load time; the scoring
//! code downstream reads the typed fields without re-checking them.

use crate::{QolabError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

fn default_max_exclamation_marks() -> usize {
    1
}

/// Writing constraints for a case. `min_words` and `max_words` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_words: usize,
    pub max_words: usize,
    #[serde(default)]
    pub banned_phrases: Vec<String>,
    #[serde(default)]
    pub max_emojis: usize,
    #[serde(default = "default_max_exclamation_marks")]
    pub max_exclamation_marks: usize,
    #[serde(default)]
    pub prefer_first_person: bool,
    #[serde(default)]
    pub avoid_salesy_ad_copy: bool,
    #[serde(default)]
    pub prefer_question_ending: bool,
    #[serde(default)]
    pub no_fabricated_metrics: bool,
    /// Unrecognised keys, kept so they still reach prompt rendering.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Constraints {
    /// Constraints with only a word range set; every other option takes its default.
    pub fn with_word_range(min_words: usize, max_words: usize) -> Self {
        Self {
            min_words,
            max_words,
            banned_phrases: Vec::new(),
            max_emojis: 0,
            max_exclamation_marks: default_max_exclamation_marks(),
            prefer_first_person: false,
            avoid_salesy_ad_copy: false,
            prefer_question_ending: false,
            no_fabricated_metrics: false,
            extra: BTreeMap::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_words > self.max_words {
            return Err(QolabError::Config(format!(
                "min_words ({}) must not exceed max_words ({})",
                self.min_words, self.max_words
            )));
        }
        Ok(())
    }

    /// Parses constraints from an untyped JSON value, failing loudly on missing required fields.
    pub fn from_value(value: Value) -> Result<Self> {
        let constraints: Constraints = serde_json::from_value(value)
            .map_err(|e| QolabError::Config(format!("invalid constraints: {e}")))?;
        constraints.validate()?;
        Ok(constraints)
    }

    /// Compact JSON rendering used inside prompts.
    pub fn to_prompt_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A writing task plus the constraints every generated sample is checked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    pub name: String,
    pub task: String,
    pub audience: String,
    pub tone: String,
    pub constraints: Constraints,
    #[serde(default)]
    pub keywords_file: String,
}

impl CaseConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let case: CaseConfig = serde_json::from_str(&content).map_err(|e| {
            QolabError::Config(format!("invalid case file {}: {}", path.display(), e))
        })?;
        case.constraints.validate()?;
        Ok(case)
    }

    /// Reads the keyword list referenced by `keywords_file`; an empty path means no keywords.
    pub fn load_keywords(&self) -> Result<Vec<String>> {
        if self.keywords_file.trim().is_empty() {
            return Ok(Vec::new());
        }
        load_keywords(&self.keywords_file)
    }

    /// Context block handed to the judge.
    pub fn description(&self) -> String {
        format!(
            "Task: {}\nAudience: {}\nTone: {}\nConstraints: {}",
            self.task,
            self.audience,
            self.tone,
            self.constraints.to_prompt_string()
        )
    }

    /// Lowercase, underscore-separated form of the case name.
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "_")
    }
}

/// One keyword per line; blank lines are skipped and surrounding whitespace trimmed.
pub fn load_keywords(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptVariant {
    pub name: String,
    pub system_prompt: String,
    pub user_prompt_template: String,
}

impl PromptVariant {
    /// Substitutes `{name}`, `{task}`, `{audience}`, `{tone}` and `{constraints}`.
    /// Any other braces are left untouched.
    pub fn render_user_prompt(&self, case: &CaseConfig) -> String {
        self.user_prompt_template
            .replace("{name}", &case.name)
            .replace("{task}", &case.task)
            .replace("{audience}", &case.audience)
            .replace("{tone}", &case.tone)
            .replace("{constraints}", &case.constraints.to_prompt_string())
    }

    pub fn full_prompt(&self, user_prompt: &str) -> String {
        format!("SYSTEM:\n{}\n\nUSER:\n{}", self.system_prompt, user_prompt)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSuite {
    pub variants: Vec<PromptVariant>,
}

impl PromptSuite {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            QolabError::Config(format!("invalid suite file {}: {}", path.display(), e))
        })
    }
}
