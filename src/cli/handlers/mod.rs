use std::io::{self, BufRead, Write};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::api_client::{ApiError, TaskApi};
use crate::model::task::{Task, TaskFields, TaskId, TaskStatus};
use crate::ops::ordering::{display_order, status_counts, with_status};
use crate::ops::task_store::{TaskStore, build_fields};
use crate::util::dates;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, json: bool, api: &dyn TaskApi) -> CmdResult {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::List(args) => cmd_list(api, args, json, &mut out),
        Commands::Show(args) => cmd_show(api, args, json, &mut out),
        Commands::Add(args) => cmd_add(api, args, json, &mut out),
        Commands::Edit(args) => cmd_edit(api, args, json, &mut out),
        Commands::Done(args) => cmd_done(api, args, json, &mut out),
        Commands::Delete(args) => {
            let stdin = io::stdin();
            cmd_delete(api, args, &mut stdin.lock(), &mut out)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the full list, then look up `id` in it
fn load_task(api: &dyn TaskApi, id: &str) -> Result<(TaskStore, Task), Box<dyn std::error::Error>> {
    let id: TaskId = id.parse()?;
    let mut store = TaskStore::new();
    store.load(api)?;
    let task = store
        .get(&id)
        .cloned()
        .ok_or_else(|| format!("task {} not found", id))?;
    Ok((store, task))
}

fn print_task(out: &mut impl Write, task: &Task, json: bool) -> io::Result<()> {
    let now = dates::now_local();
    if json {
        let body = serde_json::to_string_pretty(&task_to_json(task, now))?;
        writeln!(out, "{}", body)
    } else {
        writeln!(out, "{}", format_task_line(task, now))
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(api: &dyn TaskApi, args: ListArgs, json: bool, out: &mut impl Write) -> CmdResult {
    let mut store = TaskStore::new();
    store.load(api)?;

    let wanted = if args.pending {
        Some(TaskStatus::Pending)
    } else if args.completed {
        Some(TaskStatus::Completed)
    } else {
        None
    };
    let tasks: Vec<&Task> = match wanted {
        Some(status) => with_status(store.tasks(), status).collect(),
        None => display_order(store.tasks()),
    };
    let counts = status_counts(store.tasks());
    let now = dates::now_local();

    if json {
        let listing = TaskListJson {
            pending: counts.pending,
            completed: counts.completed,
            tasks: tasks.iter().map(|t| task_to_json(t, now)).collect(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
        return Ok(());
    }

    if tasks.is_empty() {
        writeln!(out, "No tasks found")?;
        return Ok(());
    }
    for task in &tasks {
        writeln!(out, "{}", format_task_line(task, now))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", format_counts(counts))?;
    Ok(())
}

fn cmd_show(api: &dyn TaskApi, args: ShowArgs, json: bool, out: &mut impl Write) -> CmdResult {
    let id: TaskId = args.id.parse()?;
    let task = api.get_task(&id)?;
    let now = dates::now_local();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&task_to_json(&task, now))?)?;
    } else {
        for line in format_task_detail(&task, now) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(api: &dyn TaskApi, args: AddArgs, json: bool, out: &mut impl Write) -> CmdResult {
    let fields = build_fields(
        &args.title,
        args.description.as_deref().unwrap_or_default(),
        args.due.as_deref().unwrap_or_default(),
    )?;
    let mut store = TaskStore::new();
    let notice = store.create(api, &fields)?;
    let created = store
        .tasks()
        .first()
        .ok_or("created task missing from store")?;
    if !json {
        writeln!(out, "{}", notice)?;
    }
    print_task(out, created, json)?;
    Ok(())
}

fn cmd_edit(api: &dyn TaskApi, args: EditArgs, json: bool, out: &mut impl Write) -> CmdResult {
    let (mut store, task) = load_task(api, &args.id)?;

    let mut fields = TaskFields::from_task(&task);
    if let Some(title) = args.title {
        fields.title = title.trim().to_string();
    }
    if let Some(description) = args.description {
        fields.description = description.trim().to_string();
    }
    if let Some(due) = args.due {
        fields.due_date = dates::parse_input(&due).map_err(ApiError::Validation)?;
    }
    if args.clear_due {
        fields.due_date = None;
    }

    let notice = store.update(api, &task.id, &fields)?;
    if !json {
        writeln!(out, "{}", notice)?;
    }
    if let Some(updated) = store.get(&task.id) {
        print_task(out, updated, json)?;
    }
    Ok(())
}

fn cmd_done(api: &dyn TaskApi, args: DoneArgs, json: bool, out: &mut impl Write) -> CmdResult {
    let (mut store, task) = load_task(api, &args.id)?;
    if task.status.is_completed() {
        if json {
            print_task(out, &task, json)?;
        } else {
            writeln!(out, "Task {} is already completed", task.id)?;
        }
        return Ok(());
    }

    let notice = store.complete(api, &task.id)?;
    if !json {
        writeln!(out, "{}", notice)?;
    }
    if let Some(updated) = store.get(&task.id) {
        print_task(out, updated, json)?;
    }
    Ok(())
}

fn cmd_delete(
    api: &dyn TaskApi,
    args: DeleteArgs,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> CmdResult {
    let (mut store, task) = load_task(api, &args.id)?;

    if !args.yes {
        write!(out, "Delete task {} \"{}\"? [y/N] ", task.id, task.title)?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            writeln!(out, "Cancelled")?;
            return Ok(());
        }
    }

    let notice = store.delete(api, &task.id)?;
    writeln!(out, "{}", notice)?;
    Ok(())
}
