//! quizforge-store — Persistence for chapters, quizzes and submissions.
//!
//! Both stores implement `QuizStore`: `JsonFileStore` keeps one JSON file per
//! collection in a directory, `MemoryStore` keeps everything in memory.

pub mod json_file;
pub mod memory;
mod records;
pub mod seed;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
