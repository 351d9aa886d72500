use crate::docket::Docket;
use crate::domain::{
    completion_mark, due_badge, is_overdue_str, label_str, parse_due_input, ChangelogEntry, Clock,
    FilterMode, SortMode, Todo, TodoId,
};
use crate::persistence::KeyValueStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "A small terminal todo list with due dates, filters and a changelog", long_about = None)]
pub struct Cli {
    /// Data directory (overrides DOCKET_DIR and any .docket directory)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a local .docket directory in the current directory
    Init,
    #[command(flatten)]
    Todo(TodoCommand),
}

/// Subcommands that operate on an open docket
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TodoCommand {
    /// Add a todo
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Due date: RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" (local time)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Toggle a todo between open and completed
    Toggle { id: TodoId },
    /// Delete a todo
    Delete { id: TodoId },
    /// List todos
    List {
        #[arg(short, long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,
        #[arg(short, long, value_enum, default_value_t = SortMode::None)]
        sort: SortMode,
    },
    /// Show the changelog, oldest first
    Log,
    /// Show how a due date would be labelled right now
    When { timestamp: String },
}

/// Run one subcommand against `docket`, writing human output to `out`
pub fn execute<S: KeyValueStore, C: Clock, W: Write>(
    command: TodoCommand,
    docket: &mut Docket<S, C>,
    out: &mut W,
) -> Result<()> {
    let now = docket.now().with_timezone(&Local);

    match command {
        TodoCommand::Add { text, due } => {
            let due = due
                .map(|raw| parse_due_input(&raw, &Local))
                .transpose()
                .context("Invalid --due value")?;
            if let Some(todo) = docket.add(&text.join(" "), due) {
                writeln!(out, "Added #{} {}", todo.id, todo.text)?;
            }
        }
        TodoCommand::Toggle { id } => {
            if docket.toggle(id) {
                let state = match docket.todos().iter().find(|t| t.id == id) {
                    Some(todo) if todo.completed => "Completed",
                    _ => "Reopened",
                };
                writeln!(out, "{} #{}", state, id)?;
            }
        }
        TodoCommand::Delete { id } => {
            if docket.delete(id) {
                writeln!(out, "Deleted #{}", id)?;
            }
        }
        TodoCommand::List { filter, sort } => {
            write_list(out, &docket.view(filter, sort), &now)?;
        }
        TodoCommand::Log => {
            write_changelog(out, docket.changelog(), &Local)?;
        }
        TodoCommand::When { timestamp } => {
            write_when(out, &timestamp, &now)?;
        }
    }

    match docket.take_save_error() {
        Some(err) => Err(anyhow::Error::new(err).context("Failed to save docket")),
        None => Ok(()),
    }
}

fn write_list<W: Write, Tz: TimeZone>(out: &mut W, todos: &[&Todo], now: &DateTime<Tz>) -> Result<()>
where
    Tz::Offset: Display,
{
    if todos.is_empty() {
        writeln!(out, "No todos.")?;
        return Ok(());
    }

    for todo in todos {
        write!(out, "{} #{:<3} {}", completion_mark(todo), todo.id, todo.text)?;
        if let Some(badge) = due_badge(todo, now) {
            write!(out, "  ({})", badge.label)?;
            if badge.overdue {
                write!(out, " OVERDUE")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_changelog<W: Write, Tz: TimeZone>(out: &mut W, entries: &[ChangelogEntry], tz: &Tz) -> Result<()>
where
    Tz::Offset: Display,
{
    for entry in entries {
        writeln!(
            out,
            "{}  {:<9} \"{}\"",
            entry.timestamp.with_timezone(tz).format("%Y-%m-%d %H:%M"),
            entry.kind.to_tag(),
            entry.text
        )?;
    }
    Ok(())
}

fn write_when<W: Write, Tz: TimeZone>(out: &mut W, raw: &str, now: &DateTime<Tz>) -> Result<()>
where
    Tz::Offset: Display,
{
    writeln!(out, "{}", label_str(raw, now))?;
    writeln!(out, "overdue: {}", if is_overdue_str(raw, now) { "yes" } else { "no" })?;
    Ok(())
}
