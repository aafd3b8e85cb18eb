pub mod chapters;
pub mod generate;
pub mod grade;
pub mod init;
pub mod progress;
pub mod providers;
pub mod quizzes;
pub mod set_key;
pub mod take;

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::model::Quiz;
use quizforge_core::traits::QuizStore;
use quizforge_providers::{load_config_from, FileKeyStore, QuizforgeConfig};
use quizforge_store::JsonFileStore;

pub(crate) fn load_config(path: Option<PathBuf>) -> Result<QuizforgeConfig> {
    load_config_from(path.as_deref())
}

pub(crate) fn open_store(config: &QuizforgeConfig) -> JsonFileStore {
    JsonFileStore::open(&config.data_dir)
}

pub(crate) fn open_keys(config: &QuizforgeConfig) -> Result<FileKeyStore> {
    FileKeyStore::open(config.key_file())
}

pub(crate) async fn find_test(store: &dyn QuizStore, id: &str) -> Result<Quiz> {
    store
        .get_test(id)
        .await?
        .with_context(|| format!("test not found: {id}"))
}
