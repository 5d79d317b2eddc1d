use std::time::Instant;

use crate::model::task::{Task, TaskFields};
use crate::ops::task_store::Outcome;

use super::flash::Flash;
use super::form::Draft;

/// Per-row view state in the task table: inline edit buffer, delete
/// confirmation, in-flight flag and feedback.
#[derive(Debug, Clone, Default)]
pub struct RowState {
    /// Present while the row is in edit mode
    pub editor: Option<Draft>,
    /// Waiting for the user to confirm deletion
    pub confirm_delete: bool,
    /// A request for this row is in flight; its actions are disabled
    pub loading: bool,
    pub flash: Option<Flash>,
}

impl RowState {
    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn begin_edit(&mut self, task: &Task) {
        if self.loading {
            return;
        }
        self.editor = Some(Draft::from_task(task));
        self.confirm_delete = false;
        self.flash = None;
    }

    /// Leave edit mode, discarding the buffer
    pub fn cancel_edit(&mut self) {
        if self.loading {
            return;
        }
        self.editor = None;
        self.flash = None;
    }

    /// Validate the edit buffer and lock the row. Returns the fields to send.
    pub fn save(&mut self, now: Instant) -> Option<TaskFields> {
        if self.loading {
            return None;
        }
        let editor = self.editor.as_ref()?;
        match editor.to_fields() {
            Ok(fields) => {
                self.loading = true;
                self.flash = None;
                Some(fields)
            }
            Err(message) => {
                self.flash = Some(Flash::error(message, now));
                None
            }
        }
    }

    /// The update resolved: exit edit mode only on success.
    pub fn finish_save(&mut self, outcome: &Outcome, now: Instant) {
        self.loading = false;
        if outcome.is_ok() {
            self.editor = None;
        }
        self.flash = Some(Flash::from_outcome(outcome, now));
    }

    /// Ask for delete confirmation
    pub fn request_delete(&mut self) {
        if !self.loading && !self.is_editing() {
            self.confirm_delete = true;
        }
    }

    /// Consume a pending confirmation. Returns true if the delete should be sent.
    pub fn confirm(&mut self) -> bool {
        if !self.confirm_delete || self.loading {
            return false;
        }
        self.confirm_delete = false;
        self.loading = true;
        self.flash = None;
        true
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Lock the row for a complete request. Only pending tasks can be completed.
    pub fn begin_complete(&mut self, task: &Task) -> bool {
        if self.loading || self.is_editing() || task.status.is_completed() {
            return false;
        }
        self.loading = true;
        self.flash = None;
        true
    }

    /// A complete or delete request resolved.
    pub fn finish_action(&mut self, outcome: &Outcome, now: Instant) {
        self.loading = false;
        self.flash = Some(Flash::from_outcome(outcome, now));
    }
}
