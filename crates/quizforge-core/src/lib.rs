//! quizforge-core — Quiz model, generation pipeline and grading.
//!
//! This crate defines the data model, the provider and store traits, and the
//! pure pieces of the pipeline: prompt building, response parsing, fallback
//! generation, orchestration and grading.

pub mod attempt;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod grading;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod registry;
pub mod statistics;
pub mod traits;

pub use attempt::{AttemptSession, GradedAttempt, SubmitTrigger};
pub use engine::{GenerationEngine, GenerationOutcome, QuestionSource};
pub use error::{
    GenerationError, GradingError, ParseError, ProviderError, RegistryError, ValidationError,
};
pub use grading::{GradeResult, PerformanceBand};
pub use model::{
    Chapter, GenerationRequest, NewChapter, NewQuiz, NewSubmission, Question, QuestionType, Quiz,
    Submission,
};
pub use registry::{ApiFamily, ProviderDescriptor, ProviderId};
pub use statistics::ProgressSummary;
