//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY_VARS: [&str; 3] = [
    "QUIZFORGE_GROQ_API_KEY",
    "QUIZFORGE_GEMINI_API_KEY",
    "QUIZFORGE_OPENAI_API_KEY",
];

/// A `quizforge` command running inside `dir` with no ambient keys or config.
fn quizforge(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizforge").unwrap();
    cmd.current_dir(dir).env("HOME", dir);
    for var in KEY_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A temp dir with a config file and seeded sample data.
fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path()).arg("init").assert().success();
    dir
}

fn write_answers(dir: &Path, answers: serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("answers.json");
    std::fs::write(&path, answers.to_string()).unwrap();
    path
}

#[test]
fn init_creates_config_and_seeds_data() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Seeded sample data"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join("quizforge-data/chapters.json").exists());

    quizforge(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge.toml already exists"))
        .stdout(predicate::str::contains("already has data"));
}

#[test]
fn providers_lists_registry() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("groq"))
        .stdout(predicate::str::contains("gemini"))
        .stdout(predicate::str::contains("openai"))
        .stdout(predicate::str::contains("No API key found"));
}

#[test]
fn providers_auto_detects_env_key() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .env("QUIZFORGE_GEMINI_API_KEY", "AIza-test")
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("Auto-detected: gemini"))
        .stdout(predicate::str::contains("AIza-test").not());
}

#[test]
fn set_key_persists_for_providers() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["set-key", "--provider", "openai", "--key", "sk-stored"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved API key for OpenAI"));

    let stored = std::fs::read_to_string(dir.path().join("quizforge-data/keys.json")).unwrap();
    assert!(stored.contains("sk-stored"));
}

#[test]
fn set_key_rejects_unknown_provider() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .args(["set-key", "--provider", "anthropic", "--key", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn chapters_lists_sample_chapters() {
    let dir = initialized();
    quizforge(dir.path())
        .arg("chapters")
        .assert()
        .success()
        .stdout(predicate::str::contains("Photosynthesis"))
        .stdout(predicate::str::contains("Fractions and Decimals"));
}

#[test]
fn chapters_before_init_suggests_init() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .arg("chapters")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge init"));
}

#[test]
fn generate_without_key_uses_sample_questions() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["generate", "--chapter", "ch2", "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 sample questions"))
        .stderr(predicate::str::contains("Warning").not());
}

#[test]
fn generate_json_output_is_a_question_array() {
    let dir = initialized();
    let output = quizforge(dir.path())
        .args(["generate", "--chapter", "ch1", "--count", "4", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let questions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(questions.as_array().unwrap().len(), 4);
    assert!(questions[0]["correctAnswer"].is_string());
}

#[test]
fn generate_falls_back_when_provider_unreachable() {
    let dir = initialized();
    std::fs::write(
        dir.path().join("quizforge.toml"),
        r#"
default_provider = "groq"

[providers.groq]
base_url = "http://127.0.0.1:1/openai/v1/chat/completions"
"#,
    )
    .unwrap();

    quizforge(dir.path())
        .env("QUIZFORGE_GROQ_API_KEY", "gsk-test")
        .args(["generate", "--chapter", "ch2", "--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 sample questions"))
        .stderr(predicate::str::contains("Warning"))
        .stderr(predicate::str::contains("sample questions"));
}

#[test]
fn generate_save_creates_a_test() {
    let dir = initialized();
    quizforge(dir.path())
        .args([
            "generate", "--chapter", "ch3", "--count", "2", "--save", "--title", "Revolution Recap",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved \"Revolution Recap\""));

    let tests = std::fs::read_to_string(dir.path().join("quizforge-data/tests.json")).unwrap();
    assert!(tests.contains("Revolution Recap"));
}

#[test]
fn generate_rejects_zero_count() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["generate", "--chapter", "ch2", "--count", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn generate_unknown_chapter_fails() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["generate", "--chapter", "ch99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chapter not found: ch99"));
}

#[test]
fn grade_all_correct_answers() {
    let dir = initialized();
    let answers = write_answers(
        dir.path(),
        serde_json::json!({"q1": "2", "q2": "x", "q3": "true", "q4": "True", "q5": " 15 "}),
    );

    quizforge(dir.path())
        .args(["grade", "--test", "test1", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 5/5 (100%)"))
        .stdout(predicate::str::contains("Excellent!"));
}

#[test]
fn grade_with_student_records_submission() {
    let dir = initialized();
    let answers = write_answers(dir.path(), serde_json::json!({"q1": "Chlorophyll"}));

    quizforge(dir.path())
        .args(["grade", "--test", "test2", "--student", "student_2", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2/4 (50%)"))
        .stderr(predicate::str::contains("Recorded submission"));

    quizforge(dir.path())
        .args(["progress", "--student", "student_2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attempts: 1"))
        .stdout(predicate::str::contains("Needs work: Science (50%)"));
}

#[test]
fn grade_unknown_test_fails() {
    let dir = initialized();
    let answers = write_answers(dir.path(), serde_json::json!({}));
    quizforge(dir.path())
        .args(["grade", "--test", "nope", "--answers"])
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: test not found: nope"));
}

#[test]
fn progress_summarizes_sample_attempts() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["progress", "--student", "student_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attempts: 2"))
        .stdout(predicate::str::contains("Average: 88%"))
        .stdout(predicate::str::contains("Best: 100%"))
        .stdout(predicate::str::contains("Mathematics"));
}

#[test]
fn progress_for_new_student() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["progress", "--student", "student_9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No attempts yet for student_9."));
}

#[test]
fn take_reads_answers_from_stdin() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["take", "--test", "test1", "--student", "student_3"])
        .write_stdin("2\nx\ntrue\nt\n15\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/5"))
        .stdout(predicate::str::contains("Score: 5/5 (100%)"));

    quizforge(dir.path())
        .args(["progress", "--student", "student_3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attempts: 1"));
}

#[test]
fn take_submits_unanswered_questions_on_eof() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["take", "--test", "test2", "--student", "student_4"])
        // The skipped short answer still matches, as empty answers do.
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2/4 (50%)"));
}

#[test]
fn quizzes_filters_by_class() {
    let dir = initialized();
    quizforge(dir.path())
        .args(["generate", "--chapter", "ch4", "--count", "2", "--save"])
        .assert()
        .success();

    quizforge(dir.path())
        .args(["quizzes", "--class", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Photosynthesis Quiz"))
        .stdout(predicate::str::contains("Fractions and Decimals - Test").not());

    quizforge(dir.path())
        .arg("quizzes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fractions and Decimals - Test"));
}

#[test]
fn generate_save_excludes_questions() {
    let dir = initialized();
    quizforge(dir.path())
        .args([
            "generate", "--chapter", "ch2", "--count", "3", "--save", "--exclude", "q2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("(2 marks"));

    quizforge(dir.path())
        .args([
            "generate", "--chapter", "ch2", "--count", "3", "--save", "--exclude", "q7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no generated question with id q7"));
}

#[test]
fn rejected_generate_leaves_last_provider_unchanged() {
    let dir = initialized();
    let keys = dir.path().join("quizforge-data/keys.json");

    for bad in [["--count", "0"], ["--types", "essay"]] {
        quizforge(dir.path())
            .args(["generate", "--chapter", "ch2", "--provider", "gemini"])
            .args(bad)
            .assert()
            .failure();
    }
    assert!(!keys.exists());

    quizforge(dir.path())
        .args(["generate", "--chapter", "ch2", "--provider", "gemini", "--count", "1"])
        .assert()
        .success();
    let stored = std::fs::read_to_string(&keys).unwrap();
    assert!(stored.contains(r#""lastProvider": "gemini""#));
}
