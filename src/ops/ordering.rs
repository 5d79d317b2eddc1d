use crate::model::task::{Task, TaskStatus};

/// Pending/completed tallies shown above the task table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub completed: usize,
}

/// Display order for the task table: pending before completed, server
/// order kept within each group.
pub fn display_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    // sort_by_key is stable
    ordered.sort_by_key(|t| t.status.is_completed());
    ordered
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    tasks.iter().fold(StatusCounts::default(), |mut counts, t| {
        match t.status {
            TaskStatus::Pending => counts.pending += 1,
            TaskStatus::Completed => counts.completed += 1,
        }
        counts
    })
}

/// Tasks with the given status, in server order
pub fn with_status(tasks: &[Task], status: TaskStatus) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(move |t| t.status == status)
}
