use crate::io::api_client::{ApiError, Operation, TaskApi};
use crate::model::task::{Task, TaskFields, TaskId};
use crate::util::dates;

/// Result handed back to the component that asked for a mutation: the
/// notice to show on success, or the error to show on failure.
pub type Outcome = Result<&'static str, ApiError>;

pub const TITLE_REQUIRED: &str = "Title is required!";

/// Build request fields from raw input, rejecting a blank title or an
/// unreadable due date before anything is sent.
pub fn build_fields(title: &str, description: &str, due_date: &str) -> Result<TaskFields, ApiError> {
    let due_date = dates::parse_input(due_date).map_err(ApiError::Validation)?;
    let fields = TaskFields {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
        due_date,
    };
    validate(&fields)?;
    Ok(fields)
}

/// Reject fields that must never reach the server.
pub fn validate(fields: &TaskFields) -> Result<(), ApiError> {
    if fields.title.trim().is_empty() {
        return Err(ApiError::Validation(TITLE_REQUIRED.to_string()));
    }
    Ok(())
}

/// The client's local copy of server truth, and the only place it changes.
///
/// The `apply_*` methods merge a server response into the collection. They
/// are split from the request so callers can run the request elsewhere
/// (a worker thread) and apply the response later. The request-and-apply
/// helpers (`load`, `create`, ...) do both in one blocking call.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in server order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed load, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Mark a load as started. Clears the previous load error.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the collection with a fresh listing, or record why it failed.
    /// On failure the current tasks are kept.
    pub fn finish_load(&mut self, result: Result<Vec<Task>, ApiError>) -> Result<(), ApiError> {
        self.loading = false;
        match result {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "task list loaded");
                self.tasks = tasks;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Prepend a newly created task. A task already held under the same id
    /// is replaced so ids stay unique.
    pub fn apply_created(&mut self, result: Result<Task, ApiError>) -> Outcome {
        let task = result?;
        self.tasks.retain(|t| t.id != task.id);
        self.tasks.insert(0, task);
        Ok(Operation::Create.success_message())
    }

    pub fn apply_updated(&mut self, id: &TaskId, result: Result<Task, ApiError>) -> Outcome {
        self.replace(id, result?);
        Ok(Operation::Update.success_message())
    }

    pub fn apply_completed(&mut self, id: &TaskId, result: Result<Task, ApiError>) -> Outcome {
        self.replace(id, result?);
        Ok(Operation::Complete.success_message())
    }

    pub fn apply_deleted(&mut self, id: &TaskId, result: Result<(), ApiError>) -> Outcome {
        result?;
        self.tasks.retain(|t| &t.id != id);
        Ok(Operation::Delete.success_message())
    }

    /// Swap in the server's copy of a task. A task no longer held is not re-added.
    fn replace(&mut self, id: &TaskId, task: Task) {
        match self.tasks.iter_mut().find(|t| &t.id == id) {
            Some(slot) => *slot = task,
            None => tracing::debug!(%id, "response for a task no longer held; ignored"),
        }
    }

    pub fn load(&mut self, api: &dyn TaskApi) -> Result<(), ApiError> {
        self.begin_load();
        let result = api.list_tasks();
        self.finish_load(result)
    }

    pub fn create(&mut self, api: &dyn TaskApi, fields: &TaskFields) -> Outcome {
        validate(fields)?;
        self.apply_created(api.create_task(fields))
    }

    pub fn update(&mut self, api: &dyn TaskApi, id: &TaskId, fields: &TaskFields) -> Outcome {
        validate(fields)?;
        self.apply_updated(id, api.update_task(id, fields))
    }

    pub fn complete(&mut self, api: &dyn TaskApi, id: &TaskId) -> Outcome {
        self.apply_completed(id, api.complete_task(id))
    }

    pub fn delete(&mut self, api: &dyn TaskApi, id: &TaskId) -> Outcome {
        self.apply_deleted(id, api.delete_task(id))
    }
}
