use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agenda", about = concat!("agenda v", env!("CARGO_PKG_VERSION"), " - tasks from your task server, in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the task API (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file to use instead of $AGENDA_CONFIG or ./agenda.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, pending first
    List(ListArgs),
    /// Show one task
    Show(ShowArgs),
    /// Create a task
    Add(AddArgs),
    /// Change a task's title, description or due date
    Edit(EditArgs),
    /// Mark a task as completed
    Done(DoneArgs),
    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only pending tasks
    #[arg(long, conflicts_with = "completed")]
    pub pending: bool,
    /// Only completed tasks
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Longer description
    #[arg(long, short)]
    pub description: Option<String>,
    /// Due date, as YYYY-MM-DD HH:MM (or YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description (empty string clears it)
    #[arg(long, short)]
    pub description: Option<String>,
    /// New due date, as YYYY-MM-DD HH:MM (or YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}
