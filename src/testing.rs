use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::NaiveDateTime;

use crate::io::api_client::{ApiError, Operation, TaskApi};
use crate::model::task::{Task, TaskFields, TaskId, TaskStatus};

pub const CREATED_AT: &str = "2024-05-01 08:00";

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

/// A pending task with a fixed creation time
pub fn task(id: i64, title: &str) -> Task {
    Task {
        id: TaskId::Number(id),
        title: title.to_string(),
        description: None,
        status: TaskStatus::Pending,
        due_date: None,
        created_at: Some(at(CREATED_AT)),
    }
}

pub fn completed(task: Task) -> Task {
    Task {
        status: TaskStatus::Completed,
        ..task
    }
}

pub fn due(task: Task, when: &str) -> Task {
    Task {
        due_date: Some(at(when)),
        ..task
    }
}

#[derive(Default)]
struct FakeState {
    tasks: Vec<Task>,
    next_id: i64,
    failures: VecDeque<ApiError>,
    calls: Vec<&'static str>,
}

/// In-memory stand-in for the task server
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .filter_map(|t| match t.id {
                TaskId::Number(n) => Some(n),
                TaskId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        FakeApi {
            state: Mutex::new(FakeState {
                tasks,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// Make the next call fail with `err`
    pub fn fail_next(&self, err: ApiError) {
        self.state.lock().unwrap().failures.push_back(err);
    }

    /// Names of the calls received so far
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn call<T>(
        &self,
        name: &'static str,
        f: impl FnOnce(&mut FakeState) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(name);
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        f(&mut state)
    }
}

fn not_found(id: &TaskId) -> ApiError {
    ApiError::Server(format!("Task with ID {} not found", id))
}

impl TaskApi for FakeApi {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.call("list", |s| Ok(s.tasks.clone()))
    }

    fn get_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        self.call("get", |s| {
            s.tasks
                .iter()
                .find(|t| &t.id == id)
                .cloned()
                .ok_or_else(|| not_found(id))
        })
    }

    fn create_task(&self, fields: &TaskFields) -> Result<Task, ApiError> {
        self.call("create", |s| {
            s.next_id += 1;
            let task = Task {
                id: TaskId::Number(s.next_id),
                title: fields.title.clone(),
                description: Some(fields.description.clone()),
                status: TaskStatus::Pending,
                due_date: fields.due_date,
                created_at: Some(at(CREATED_AT)),
            };
            s.tasks.insert(0, task.clone());
            Ok(task)
        })
    }

    fn update_task(&self, id: &TaskId, fields: &TaskFields) -> Result<Task, ApiError> {
        self.call("update", |s| {
            let task = s
                .tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| not_found(id))?;
            task.title = fields.title.clone();
            task.description = Some(fields.description.clone());
            task.due_date = fields.due_date;
            Ok(task.clone())
        })
    }

    fn complete_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        self.call("complete", |s| {
            let task = s
                .tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| not_found(id))?;
            task.status = TaskStatus::Completed;
            Ok(task.clone())
        })
    }

    fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        self.call("delete", |s| {
            let before = s.tasks.len();
            s.tasks.retain(|t| &t.id != id);
            if s.tasks.len() == before {
                return Err(not_found(id));
            }
            Ok(())
        })
    }
}

/// Transport failure for `op`, as the HTTP client would report it
pub fn transport(op: Operation) -> ApiError {
    ApiError::Transport {
        op,
        detail: "connection refused".into(),
    }
}
