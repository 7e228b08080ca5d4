use qolab_core::{CaseConfig, JudgeRubric, PromptSuite, QolabError};
use std::fs;

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

#[test]
fn loads_case_with_keywords_file() {
    let dir = tempfile::tempdir().unwrap();
    let keywords = write(&dir, "keywords.txt", "forecast\n\n  pipeline  \nrevenue\n");
    let case_json = serde_json::json!({
        "name": "linkedin_b2b_saas",
        "task": "Write a LinkedIn post",
        "audience": "RevOps leaders",
        "tone": "candid",
        "constraints": {
            "min_words": 90,
            "max_words": 140,
            "banned_phrases": ["game-changer"],
            "prefer_first_person": true
        },
        "keywords_file": keywords.to_string_lossy()
    });
    let case_path = write(&dir, "case.json", &case_json.to_string());

    let case = CaseConfig::load(&case_path).unwrap();
    assert_eq!(case.constraints.min_words, 90);
    assert_eq!(case.constraints.max_exclamation_marks, 1);
    assert!(case.constraints.prefer_first_person);
    assert_eq!(
        case.load_keywords().unwrap(),
        vec!["forecast", "pipeline", "revenue"]
    );
}

#[test]
fn case_without_max_words_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let case_path = write(
        &dir,
        "case.json",
        r#"{"name":"x","task":"t","audience":"a","tone":"t","constraints":{"min_words":10}}"#,
    );

    let err = CaseConfig::load(&case_path).unwrap_err();
    assert!(matches!(err, QolabError::Config(_)));
    assert!(err.to_string().contains("max_words"));
}

#[test]
fn missing_case_file_is_io_error() {
    let err = CaseConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, QolabError::Io(_)));
}

#[test]
fn loads_suite_and_rubric() {
    let dir = tempfile::tempdir().unwrap();
    let suite_path = write(
        &dir,
        "suite.json",
        r#"{"variants":[{"name":"Direct & minimal","system_prompt":"s","user_prompt_template":"{task}"}]}"#,
    );
    let rubric_path = write(
        &dir,
        "rubric.json",
        r#"{"instructions":["Be strict.","Score 0-5."],"categories":{"tone_voice":"Sounds human"}}"#,
    );

    let suite = PromptSuite::load(&suite_path).unwrap();
    assert_eq!(suite.variants.len(), 1);
    assert_eq!(suite.variants[0].name, "Direct & minimal");

    let rubric = JudgeRubric::load(&rubric_path).unwrap();
    assert_eq!(rubric.instructions, vec!["Be strict.", "Score 0-5."]);
    assert_eq!(
        rubric.categories.get("tone_voice").map(String::as_str),
        Some("Sounds human")
    );
}

#[test]
fn malformed_rubric_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let rubric_path = write(&dir, "rubric.json", r#"{"instructions": "not a list"}"#);
    let result = JudgeRubric::load(&rubric_path);
    assert!(matches!(result, Err(QolabError::Config(_))));
}
