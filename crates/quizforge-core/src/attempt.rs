//! Timed quiz attempts.
//!
//! An `AttemptSession` owns one countdown task that ticks once per second.
//! When the countdown reaches zero the recorded answers are graded exactly as
//! a manual submit would grade them. The transition to submitted happens once,
//! under the session lock; whichever path takes it first wins and the other
//! gets `GradingError::AlreadySubmitted`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::error::GradingError;
use crate::grading::{grade, GradeResult};
use crate::model::Quiz;

const TICK: Duration = Duration::from_secs(1);

/// What caused the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    TimeExpired,
}

/// A submitted and graded attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAttempt {
    pub answers: BTreeMap<String, String>,
    pub result: GradeResult,
    pub trigger: SubmitTrigger,
}

enum State {
    InProgress(BTreeMap<String, String>),
    Submitted,
}

struct Shared {
    quiz: Quiz,
    state: Mutex<State>,
    remaining_secs: AtomicU64,
    done: watch::Sender<Option<GradedAttempt>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, trigger: SubmitTrigger) -> Result<GradedAttempt, GradingError> {
        let mut state = self.lock();
        let answers = match &*state {
            State::Submitted => return Err(GradingError::AlreadySubmitted),
            State::InProgress(answers) => answers.clone(),
        };

        let result = grade(&self.quiz, &answers)?;
        *state = State::Submitted;
        drop(state);

        let graded = GradedAttempt {
            answers,
            result,
            trigger,
        };
        tracing::info!(
            "attempt on '{}' submitted ({:?}): {}/{}",
            self.quiz.id,
            trigger,
            result.score,
            result.total
        );
        self.done.send_replace(Some(graded.clone()));
        Ok(graded)
    }
}

/// One in-progress attempt with its countdown.
pub struct AttemptSession {
    shared: Arc<Shared>,
    ticker: AbortHandle,
}

impl AttemptSession {
    /// Start an attempt using the quiz's own time limit.
    pub fn start(quiz: Quiz) -> Result<Self, GradingError> {
        let limit = Duration::from_secs(u64::from(quiz.time_limit_minutes) * 60);
        Self::with_limit(quiz, limit)
    }

    /// Start an attempt with an explicit limit, rounded down to whole seconds.
    ///
    /// Must be called inside a tokio runtime.
    pub fn with_limit(quiz: Quiz, limit: Duration) -> Result<Self, GradingError> {
        if quiz.questions.is_empty() {
            return Err(GradingError::EmptyQuiz(quiz.id));
        }

        let (done, _) = watch::channel(None);
        let shared = Arc::new(Shared {
            quiz,
            state: Mutex::new(State::InProgress(BTreeMap::new())),
            remaining_secs: AtomicU64::new(limit.as_secs()),
            done,
        });

        let ticker = tokio::spawn(countdown(Arc::clone(&shared))).abort_handle();
        Ok(Self { shared, ticker })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.shared.quiz
    }

    /// Time left before auto-submit.
    pub fn remaining(&self) -> Duration {
        Duration::from_secs(self.shared.remaining_secs.load(Ordering::Acquire))
    }

    /// Record (or overwrite) the answer to a question.
    pub fn record_answer(&self, question_id: &str, answer: &str) -> Result<(), GradingError> {
        match &mut *self.shared.lock() {
            State::InProgress(answers) => {
                answers.insert(question_id.to_string(), answer.to_string());
                Ok(())
            }
            State::Submitted => Err(GradingError::AlreadySubmitted),
        }
    }

    /// Answers recorded so far, or `None` once submitted.
    pub fn answers(&self) -> Option<BTreeMap<String, String>> {
        match &*self.shared.lock() {
            State::InProgress(answers) => Some(answers.clone()),
            State::Submitted => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(*self.shared.lock(), State::Submitted)
    }

    /// Submit now. The countdown is stopped before the answers are graded.
    pub fn submit(&self) -> Result<GradedAttempt, GradingError> {
        self.ticker.abort();
        self.shared.finish(SubmitTrigger::Manual)
    }

    /// Resolves with the graded attempt once either path has submitted.
    pub async fn completed(&self) -> GradedAttempt {
        let mut rx = self.shared.done.subscribe();
        loop {
            if let Some(graded) = rx.borrow_and_update().clone() {
                return graded;
            }
            // The sender lives in `self.shared`, so it cannot close while we wait.
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Drop for AttemptSession {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

async fn countdown(shared: Arc<Shared>) {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + TICK, TICK);
    loop {
        interval.tick().await;
        let before = shared
            .remaining_secs
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| Some(s.saturating_sub(1)))
            .unwrap_or(0);
        if before <= 1 {
            if let Err(e) = shared.finish(SubmitTrigger::TimeExpired) {
                tracing::debug!("countdown ended without submitting: {e}");
            }
            return;
        }
    }
}
