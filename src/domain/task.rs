use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier: creation time in milliseconds, kept unique by [`IdGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never empty
    pub text: String,
    /// Target day (no time of day)
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: TaskId, text: String, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            date,
            completed: false,
            created_at,
        }
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Issues timestamp-based ids that never repeat, even within one millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    /// Seed from an existing collection so new ids sort after every loaded one
    pub fn seeded(tasks: &[Task]) -> Self {
        Self {
            last: tasks.iter().map(|t| t.id.0).max(),
        }
    }

    pub fn next_id(&mut self, now_ms: i64) -> TaskId {
        let id = match self.last {
            Some(last) if last >= now_ms => last + 1,
            _ => now_ms,
        };
        self.last = Some(id);
        TaskId(id)
    }
}
