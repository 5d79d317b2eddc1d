use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::util::dates;

/// Server-assigned task identifier. The API may send it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => TaskId::Number(n),
            Err(_) => TaskId::Text(s.to_string()),
        })
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Number(n)
    }
}

/// Task status. Only `Pending -> Completed` is ever requested by this client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "pendente")]
    Pending,
    #[serde(alias = "concluída", alias = "concluida")]
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn is_completed(self) -> bool {
        self == TaskStatus::Completed
    }
}

/// A task as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, with = "dates::serde_opt")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default, with = "dates::serde_opt")]
    pub created_at: Option<NaiveDateTime>,
}

impl Task {
    /// Description text, treating an empty string the same as no description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Overdue iff it has a due date, is not completed, and the due date is
    /// strictly before `now`.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        match self.due_date {
            Some(due) => !self.status.is_completed() && due < now,
            None => false,
        }
    }
}

/// The editable fields of a task, sent as the body of create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    #[serde(with = "dates::serde_opt")]
    pub due_date: Option<NaiveDateTime>,
}

impl TaskFields {
    pub fn from_task(task: &Task) -> Self {
        TaskFields {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date,
        }
    }
}
