use crate::{QolabError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Instructions and category definitions handed to the judge.
///
/// Only `instructions` are placed in the judge prompt; `categories` document what each
/// score means for whoever maintains the rubric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JudgeRubric {
    pub instructions: Vec<String>,
    pub categories: BTreeMap<String, String>,
}

impl JudgeRubric {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            QolabError::Config(format!("invalid rubric file {}: {}", path.display(), e))
        })
    }
}
