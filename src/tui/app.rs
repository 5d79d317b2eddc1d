use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::api_client::TaskApi;
use crate::model::ClientConfig;
use crate::model::task::{Task, TaskId};
use crate::ops::ordering::display_order;
use crate::ops::task_store::TaskStore;

use super::dispatch::{Completion, Control, Dispatcher, Request, Response};
use super::flash::{self, Flash};
use super::form::TaskForm;
use super::input;
use super::render;
use super::row::RowState;
use super::theme::Theme;

/// Which panel receives key input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    Form,
    #[default]
    Table,
}

/// Current interaction mode, derived from focus and row state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Typing into the new-task form
    Form,
    /// Moving through the task table
    Navigate,
    /// Inline edit of the selected row
    Edit,
    /// Waiting for y/n on a delete
    Confirm,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub form: TaskForm,
    /// Per-row view state, keyed by task id. Rows without an entry are idle.
    pub rows: HashMap<TaskId, RowState>,
    /// Cursor index into the display order
    pub cursor: usize,
    /// First visible table line
    pub scroll_offset: usize,
    pub focus: Focus,
    pub show_help: bool,
    pub should_quit: bool,
    pub theme: Theme,
    /// Shown in the header
    pub api_url: String,
    /// App-level message (status row), for feedback that outlives its row
    pub notice: Option<Flash>,
    dispatcher: Dispatcher,
}

impl App {
    pub fn new(api: Arc<dyn TaskApi>, api_url: impl Into<String>, theme: Theme) -> Self {
        App {
            store: TaskStore::new(),
            form: TaskForm::default(),
            rows: HashMap::new(),
            cursor: 0,
            scroll_offset: 0,
            focus: Focus::default(),
            show_help: false,
            should_quit: false,
            theme,
            api_url: api_url.into(),
            notice: None,
            dispatcher: Dispatcher::new(api),
        }
    }

    /// Tasks in the order the table shows them
    pub fn visible_tasks(&self) -> Vec<&Task> {
        display_order(self.store.tasks())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor).copied()
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id.clone())
    }

    pub fn row(&self, id: &TaskId) -> Option<&RowState> {
        self.rows.get(id)
    }

    /// Row state for the selected task, if it has any
    pub fn selected_row(&self) -> Option<&RowState> {
        self.selected_task().and_then(|t| self.rows.get(&t.id))
    }

    pub fn selected_row_mut(&mut self) -> Option<&mut RowState> {
        let id = self.selected_id()?;
        self.rows.get_mut(&id)
    }

    /// The table is replaced by the loading or error screen while a load
    /// is in flight or has failed; row actions are unavailable then.
    pub fn table_shown(&self) -> bool {
        !self.store.is_loading() && self.store.error().is_none()
    }

    /// Input routing for the current focus and selected row
    pub fn mode(&self) -> Mode {
        if self.focus == Focus::Form {
            return Mode::Form;
        }
        if !self.table_shown() {
            return Mode::Navigate;
        }
        match self.selected_row() {
            Some(row) if row.is_editing() => Mode::Edit,
            Some(row) if row.confirm_delete => Mode::Confirm,
            _ => Mode::Navigate,
        }
    }

    fn selected_entry(&mut self) -> Option<(Task, &mut RowState)> {
        if !self.table_shown() {
            return None;
        }
        let task = self.selected_task()?.clone();
        let row = self.rows.entry(task.id.clone()).or_default();
        Some((task, row))
    }

    /// Issue (or re-issue) the task list request. A load already in flight
    /// is superseded.
    pub fn start_load(&mut self) {
        self.store.begin_load();
        self.dispatcher.submit(Control::Loader, Request::List);
    }

    pub fn submit_form(&mut self, now: Instant) {
        if let Some(fields) = self.form.submit(now) {
            self.dispatcher
                .submit(Control::Form, Request::Create(fields));
        }
    }

    pub fn begin_edit(&mut self) {
        if let Some((task, row)) = self.selected_entry() {
            row.begin_edit(&task);
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some((_, row)) = self.selected_entry() {
            row.cancel_edit();
        }
    }

    pub fn save_edit(&mut self, now: Instant) {
        let Some((task, row)) = self.selected_entry() else {
            return;
        };
        if let Some(fields) = row.save(now) {
            self.dispatcher.submit(
                Control::Row(task.id.clone()),
                Request::Update(task.id, fields),
            );
        }
    }

    pub fn complete_selected(&mut self) {
        let Some((task, row)) = self.selected_entry() else {
            return;
        };
        if row.begin_complete(&task) {
            self.dispatcher
                .submit(Control::Row(task.id.clone()), Request::Complete(task.id));
        }
    }

    pub fn request_delete(&mut self) {
        if let Some((_, row)) = self.selected_entry() {
            row.request_delete();
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some((task, row)) = self.selected_entry() else {
            return;
        };
        if row.confirm() {
            self.dispatcher
                .submit(Control::Row(task.id.clone()), Request::Delete(task.id));
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Some((_, row)) = self.selected_entry() {
            row.cancel_delete();
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.store.tasks().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Merge a finished request into the store and the view state of the
    /// control that issued it.
    pub fn apply(&mut self, completion: Completion, now: Instant) {
        let selected = self.selected_id();

        match completion.response {
            Response::Listed(result) => {
                if self.store.finish_load(result).is_ok() {
                    let store = &self.store;
                    self.rows.retain(|id, _| store.contains(id));
                }
            }
            Response::Created(result) => {
                let outcome = self.store.apply_created(result);
                self.form.finish(&outcome, now);
            }
            Response::Updated(id, result) => {
                let outcome = self.store.apply_updated(&id, result);
                if let Some(row) = self.rows.get_mut(&id) {
                    row.finish_save(&outcome, now);
                }
            }
            Response::Completed(id, result) => {
                let outcome = self.store.apply_completed(&id, result);
                if let Some(row) = self.rows.get_mut(&id) {
                    row.finish_action(&outcome, now);
                }
            }
            Response::Deleted(id, result) => {
                let outcome = self.store.apply_deleted(&id, result);
                if outcome.is_ok() {
                    self.rows.remove(&id);
                    self.notice = Some(Flash::from_outcome(&outcome, now));
                } else if let Some(row) = self.rows.get_mut(&id) {
                    row.finish_action(&outcome, now);
                }
            }
        }

        self.reanchor(selected);
    }

    /// Keep the cursor on the same task after the order changed, or clamp
    /// it if that task is gone.
    fn reanchor(&mut self, selected: Option<TaskId>) {
        let position = selected.and_then(|id| self.visible_tasks().iter().position(|t| t.id == id));
        match position {
            Some(i) => self.cursor = i,
            None => self.move_cursor(0),
        }
    }

    /// One event-loop tick: apply finished requests, then drop expired messages.
    pub fn tick(&mut self, now: Instant) {
        for completion in self.dispatcher.poll() {
            self.apply(completion, now);
        }
        flash::expire(&mut self.form.flash, now);
        flash::expire(&mut self.notice, now);
        for row in self.rows.values_mut() {
            flash::expire(&mut row.flash, now);
        }
    }

    /// Block until every in-flight request has been applied
    #[cfg(test)]
    pub fn settle(&mut self) {
        while self.dispatcher.pending() > 0 {
            match self.dispatcher.wait(Duration::from_secs(5)) {
                Some(completion) => self.apply(completion, Instant::now()),
                None => break,
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }
}

/// Run the TUI application
pub fn run(config: &ClientConfig, api: Arc<dyn TaskApi>, api_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(api, api_url, Theme::from_config(&config.ui));
    app.start_load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("terminal ui closed");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key, Instant::now());
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
