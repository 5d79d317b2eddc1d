use std::time::Instant;

use crate::model::task::{Task, TaskFields};
use crate::ops::task_store::{Outcome, build_fields};
use crate::util::dates;

use super::flash::Flash;
use super::text_input::TextInput;

/// Editable task field, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Title,
    Description,
    DueDate,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Description, Field::DueDate];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title *",
            Field::Description => "Description",
            Field::DueDate => "Due date",
        }
    }

    pub fn next(self) -> Option<Field> {
        match self {
            Field::Title => Some(Field::Description),
            Field::Description => Some(Field::DueDate),
            Field::DueDate => None,
        }
    }

    pub fn prev(self) -> Option<Field> {
        match self {
            Field::Title => None,
            Field::Description => Some(Field::Title),
            Field::DueDate => Some(Field::Description),
        }
    }
}

/// The three text buffers behind a task form or an inline row edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: TextInput,
    pub description: TextInput,
    pub due_date: TextInput,
    pub focus: Field,
}

impl Draft {
    /// Prefill from a task; the due date is truncated to the minute.
    pub fn from_task(task: &Task) -> Self {
        Draft {
            title: TextInput::new(task.title.clone()),
            description: TextInput::new(task.description().unwrap_or_default()),
            due_date: TextInput::new(
                task.due_date
                    .as_ref()
                    .map(dates::to_input)
                    .unwrap_or_default(),
            ),
            focus: Field::Title,
        }
    }

    pub fn field(&self, field: Field) -> &TextInput {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::DueDate => &self.due_date,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::DueDate => &mut self.due_date,
        }
    }

    /// Cycle focus forward, wrapping to the first field
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next().unwrap_or(Field::Title);
    }

    /// Validated request fields, or the error message to show
    pub fn to_fields(&self) -> Result<TaskFields, String> {
        build_fields(
            self.title.value(),
            self.description.value(),
            self.due_date.value(),
        )
        .map_err(|e| e.to_string())
    }
}

/// State of the "new task" form
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub draft: Draft,
    /// A create request is in flight; the form ignores input
    pub loading: bool,
    pub flash: Option<Flash>,
}

impl TaskForm {
    /// The create action is offered only with a non-blank title and no request in flight
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.draft.title.is_blank()
    }

    /// Validate the draft. On success the form locks and the fields to send
    /// are returned; on failure an error message is shown and nothing is sent.
    pub fn submit(&mut self, now: Instant) -> Option<TaskFields> {
        if self.loading {
            return None;
        }
        match self.draft.to_fields() {
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

    /// Unlock after the create request resolved. Success clears the draft;
    /// failure keeps it so the user can correct and resubmit.
    pub fn finish(&mut self, outcome: &Outcome, now: Instant) {
        self.loading = false;
        if outcome.is_ok() {
            self.draft = Draft::default();
        }
        self.flash = Some(Flash::from_outcome(outcome, now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::api_client::ApiError;
    use crate::ops::task_store::TITLE_REQUIRED;
    use crate::testing::{at, due, task};
    use crate::tui::flash::FlashKind;

    fn form_with(title: &str, description: &str, due_date: &str) -> TaskForm {
        TaskForm {
            draft: Draft {
                title: TextInput::new(title),
                description: TextInput::new(description),
                due_date: TextInput::new(due_date),
                focus: Field::Title,
            },
            ..Default::default()
        }
    }

    #[test]
    fn blank_title_is_rejected_locally() {
        let mut form = form_with("   ", "desc", "");
        assert!(!form.can_submit());
        assert_eq!(form.submit(Instant::now()), None);
        assert!(!form.loading);
        let flash = form.flash.unwrap();
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.text, TITLE_REQUIRED);
    }

    #[test]
    fn submit_locks_and_returns_fields() {
        let mut form = form_with("Buy milk", " 2 litres ", "2030-01-02 08:30");
        let fields = form.submit(Instant::now()).unwrap();
        assert!(form.loading);
        assert!(!form.can_submit());
        assert_eq!(fields.title, "Buy milk");
        assert_eq!(fields.description, "2 litres");
        assert_eq!(fields.due_date, Some(at("2030-01-02 08:30")));
        // Second submit while in flight does nothing
        assert_eq!(form.submit(Instant::now()), None);
    }

    #[test]
    fn success_clears_draft() {
        let mut form = form_with("Buy milk", "", "");
        form.submit(Instant::now()).unwrap();
        form.finish(&Ok("Task created successfully!"), Instant::now());
        assert!(!form.loading);
        assert_eq!(form.draft, Draft::default());
        assert_eq!(form.flash.unwrap().kind, FlashKind::Success);
    }

    #[test]
    fn failure_keeps_draft() {
        let mut form = form_with("Buy milk", "soon", "");
        form.submit(Instant::now()).unwrap();
        form.finish(&Err(ApiError::Server("Server down".into())), Instant::now());
        assert!(!form.loading);
        assert_eq!(form.draft.title.value(), "Buy milk");
        assert_eq!(form.draft.description.value(), "soon");
        assert_eq!(form.flash.unwrap().text, "Server down");
    }

    #[test]
    fn bad_due_date_is_rejected_locally() {
        let mut form = form_with("Buy milk", "", "whenever");
        assert_eq!(form.submit(Instant::now()), None);
        assert_eq!(form.flash.unwrap().text, dates::INVALID_DATE_MESSAGE);
    }

    #[test]
    fn draft_from_task_truncates_due_to_minutes() {
        let mut t = due(task(1, "A"), "2024-05-01 10:30");
        t.due_date = t.due_date.map(|d| d + chrono::Duration::seconds(42));
        t.description = Some("notes".into());
        let draft = Draft::from_task(&t);
        assert_eq!(draft.title.value(), "A");
        assert_eq!(draft.description.value(), "notes");
        assert_eq!(draft.due_date.value(), "2024-05-01 10:30");
    }

    #[test]
    fn focus_cycles_through_fields() {
        let mut draft = Draft::default();
        draft.cycle_focus();
        assert_eq!(draft.focus, Field::Description);
        draft.cycle_focus();
        assert_eq!(draft.focus, Field::DueDate);
        draft.cycle_focus();
        assert_eq!(draft.focus, Field::Title);
        assert_eq!(Field::Title.prev(), None);
        assert_eq!(Field::DueDate.next(), None);
    }
}
