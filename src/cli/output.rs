use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::task::{Task, TaskId, TaskStatus};
use crate::ops::ordering::StatusCounts;
use crate::util::dates;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(with = "dates::serde_opt")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(with = "dates::serde_opt")]
    pub created_at: Option<NaiveDateTime>,
    pub overdue: bool,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub pending: usize,
    pub completed: usize,
    pub tasks: Vec<TaskJson>,
}

pub fn task_to_json(task: &Task, now: NaiveDateTime) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description().map(str::to_string),
        status: task.status,
        due_date: task.due_date,
        created_at: task.created_at,
        overdue: task.is_overdue(now),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

fn status_text(task: &Task, now: NaiveDateTime) -> &'static str {
    if task.is_overdue(now) {
        "overdue"
    } else if task.status.is_completed() {
        "done"
    } else {
        "pending"
    }
}

/// One-line summary: `  7  pending  Write report  (due 01/05/2024 10:00)`
pub fn format_task_line(task: &Task, now: NaiveDateTime) -> String {
    let mut line = format!(
        "{:>4}  {:<7}  {}",
        task.id.to_string(),
        status_text(task, now),
        task.title
    );
    if let Some(due) = &task.due_date {
        line.push_str(&format!("  (due {})", dates::format_display(Some(due))));
    }
    line
}

/// Multi-line view used by `show`
pub fn format_task_detail(task: &Task, now: NaiveDateTime) -> Vec<String> {
    let mut lines = vec![format!("#{} {}", task.id, task.title)];
    let status = if task.is_overdue(now) {
        format!("{} (overdue)", task.status.label())
    } else {
        task.status.label().to_string()
    };
    lines.push(format!("  status:      {}", status));
    if let Some(description) = task.description() {
        lines.push(format!("  description: {}", description));
    }
    lines.push(format!(
        "  due:         {}",
        dates::format_display(task.due_date.as_ref())
    ));
    lines.push(format!(
        "  created:     {}",
        dates::format_display(task.created_at.as_ref())
    ));
    lines
}

pub fn format_counts(counts: StatusCounts) -> String {
    format!("{} pending, {} completed", counts.pending, counts.completed)
}
