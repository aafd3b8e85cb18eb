//! Progress statistics over a student's submissions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{Quiz, Submission};

/// Percentage at or above which an attempt counts as passed.
pub const PASS_MARK: u32 = 50;

/// Subject average below which the subject is flagged as weak.
pub const WEAK_SUBJECT_THRESHOLD: u32 = 60;

/// Subject used for submissions whose quiz has none recorded.
pub const UNKNOWN_SUBJECT: &str = "Other";

/// Average percentage in one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAverage {
    pub subject: String,
    pub attempts: usize,
    pub average: u32,
}

/// Aggregate view of a student's attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub attempts: usize,
    pub average: u32,
    pub best: u32,
    pub pass_rate: u32,
    /// Sorted by average, best first.
    pub subjects: Vec<SubjectAverage>,
    /// Subjects averaging below the weak threshold, weakest first.
    pub weak_subjects: Vec<SubjectAverage>,
    /// Most recent submission per quiz id.
    pub latest: BTreeMap<String, Submission>,
}

impl ProgressSummary {
    pub fn is_empty(&self) -> bool {
        self.attempts == 0
    }
}

fn rounded_mean(sum: u64, count: u64) -> u32 {
    debug_assert!(count > 0);
    ((sum * 2 + count) / (count * 2)) as u32
}

/// Summarize `submissions`. `tests` supplies the subject of each quiz.
pub fn summarize(submissions: &[Submission], tests: &[Quiz]) -> ProgressSummary {
    if submissions.is_empty() {
        return ProgressSummary::default();
    }

    let n = submissions.len() as u64;
    let total: u64 = submissions.iter().map(|s| u64::from(s.percentage)).sum();
    let best = submissions.iter().map(|s| s.percentage).max().unwrap_or(0);
    let passed = submissions
        .iter()
        .filter(|s| s.percentage >= PASS_MARK)
        .count() as u64;

    let subject_of: HashMap<&str, &str> = tests
        .iter()
        .filter_map(|t| t.subject.as_deref().map(|s| (t.id.as_str(), s)))
        .collect();

    let mut by_subject: HashMap<&str, (u64, usize)> = HashMap::new();
    for s in submissions {
        let subject = subject_of
            .get(s.test_id.as_str())
            .copied()
            .unwrap_or(UNKNOWN_SUBJECT);
        let entry = by_subject.entry(subject).or_default();
        entry.0 += u64::from(s.percentage);
        entry.1 += 1;
    }

    let mut subjects: Vec<SubjectAverage> = by_subject
        .into_iter()
        .map(|(subject, (sum, count))| SubjectAverage {
            subject: subject.to_string(),
            attempts: count,
            average: rounded_mean(sum, count as u64),
        })
        .collect();
    subjects.sort_by(|a, b| b.average.cmp(&a.average).then_with(|| a.subject.cmp(&b.subject)));

    let mut weak_subjects: Vec<SubjectAverage> = subjects
        .iter()
        .filter(|s| s.average < WEAK_SUBJECT_THRESHOLD)
        .cloned()
        .collect();
    weak_subjects.reverse();

    let mut latest: BTreeMap<String, Submission> = BTreeMap::new();
    for s in submissions {
        match latest.get(&s.test_id) {
            Some(existing) if existing.completed_at >= s.completed_at => {}
            _ => {
                latest.insert(s.test_id.clone(), s.clone());
            }
        }
    }

    ProgressSummary {
        attempts: submissions.len(),
        average: rounded_mean(total, n),
        best,
        pass_rate: rounded_mean(passed * 100, n),
        subjects,
        weak_subjects,
        latest,
    }
}
