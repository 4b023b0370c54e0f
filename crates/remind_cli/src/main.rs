//! Terminal frontend for the reminder service.
//!
//! # Responsibility
//! - Collect user input, refuse invalid submissions (empty titles).
//! - Submit mutations through the background queue and wait for their
//!   completion events before re-querying and rendering the list.

mod args;

use anyhow::{anyhow, bail, Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use remind_core::{
    clock, OpEvent, RemindService, ReminderStore, SqliteReminderStore, StoreHandle,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::Duration;

const EVENT_WAIT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating data directory {}", parent.display()))?;
        }
    }
    init_logging_for(&db_path, cli.log_level.as_deref());

    let handle = StoreHandle::open(&db_path)
        .with_context(|| format!("opening reminder database {}", db_path.display()))?;
    let store = SqliteReminderStore::new(handle);

    match cli.command {
        Commands::List { json } => list(&store, json),
        Commands::Add { title, at } => add(store, &title, at.as_deref()),
        Commands::Edit { id, title, at } => edit(store, id, title, at.as_deref()),
        Commands::Rm { ids, yes } => remove(store, &ids, yes),
        Commands::Clear { yes } => clear(&store, yes),
    }
}

fn list(store: &SqliteReminderStore, json: bool) -> Result<()> {
    if json {
        let reminders = store.list_reminders()?;
        println!("{}", serde_json::to_string_pretty(&reminders)?);
        return Ok(());
    }
    print_list(store)
}

fn add(store: SqliteReminderStore, title: &str, at: Option<&str>) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        bail!("reminder title must not be empty");
    }
    let time = match at {
        Some(value) => parse_wall_clock(value)?,
        None => clock::default_reminder_time(),
    };

    let reader = store.clone();
    let service = RemindService::start(store);
    let (_, events) = service.subscribe();
    service.create_reminder(title, time);

    match wait_for_event(&events)? {
        OpEvent::Created { id } => {
            println!("Created reminder {id} for {}", clock::to_text(time));
        }
        other => return Err(unexpected(other)),
    }
    service.shutdown();
    print_list(&reader)
}

fn edit(store: SqliteReminderStore, id: i64, title: Option<String>, at: Option<&str>) -> Result<()> {
    if title.is_none() && at.is_none() {
        bail!("nothing to change; pass --title and/or --at");
    }

    let current = store
        .get_reminder(id)?
        .ok_or_else(|| anyhow!("no reminder with id {id}"))?;

    let new_title = match title {
        Some(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                bail!("reminder title must not be empty");
            }
            trimmed
        }
        None => current.title,
    };
    let new_time = match at {
        Some(value) => parse_wall_clock(value)?,
        None => current.time,
    };

    let reader = store.clone();
    let service = RemindService::start(store);
    let (_, events) = service.subscribe();
    service.update_reminder(id, new_title, new_time);

    match wait_for_event(&events)? {
        OpEvent::Updated { id } => println!("Updated reminder {id}"),
        other => return Err(unexpected(other)),
    }
    service.shutdown();
    print_list(&reader)
}

fn remove(store: SqliteReminderStore, ids: &[i64], yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete {} reminder(s)?", ids.len()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let reader = store.clone();
    let service = RemindService::start(store);
    let (_, events) = service.subscribe();
    service.delete_reminders(ids);

    for _ in ids {
        match wait_for_event(&events)? {
            OpEvent::Deleted { id } => println!("Deleted reminder {id}"),
            other => return Err(unexpected(other)),
        }
    }
    service.shutdown();
    print_list(&reader)
}

fn clear(store: &SqliteReminderStore, yes: bool) -> Result<()> {
    if !yes && !confirm("Delete ALL reminders?")? {
        println!("Cancelled.");
        return Ok(());
    }
    let removed = store.delete_all()?;
    println!("Deleted {removed} reminder(s).");
    Ok(())
}

fn print_list(store: &SqliteReminderStore) -> Result<()> {
    let reminders = store.list_reminders()?;
    if reminders.is_empty() {
        println!("No reminders.");
        return Ok(());
    }
    for reminder in &reminders {
        println!(
            "{:>4}  {}  {}",
            reminder.id,
            clock::to_text(reminder.time),
            reminder.title
        );
    }
    Ok(())
}

fn wait_for_event(events: &Receiver<OpEvent>) -> Result<OpEvent> {
    events
        .recv_timeout(EVENT_WAIT)
        .map_err(|_| anyhow!("timed out waiting for the background operation to finish"))
}

fn unexpected(event: OpEvent) -> anyhow::Error {
    match event {
        OpEvent::Failed { message, .. } => anyhow!("operation failed: {message}"),
        other => anyhow!("unexpected completion event: {other:?}"),
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn parse_wall_clock(input: &str) -> Result<i64> {
    let (hour_text, minute_text) = input
        .split_once(':')
        .ok_or_else(|| anyhow!("expected HH:MM, got `{input}`"))?;
    let hour: u32 = hour_text.trim().parse().context("invalid hour")?;
    let minute: u32 = minute_text.trim().parse().context("invalid minute")?;
    if hour > 23 || minute > 59 {
        bail!("time of day out of range: `{input}`");
    }
    Ok(clock::from_hour_minute(hour, minute))
}

fn default_db_path() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| anyhow!("no data directory available"))?;
    Ok(base.join("remind").join("remind.db"))
}

fn init_logging_for(db_path: &Path, level: Option<&str>) {
    let level = level.unwrap_or_else(|| remind_core::default_log_level());
    let Some(parent) = db_path.parent() else {
        return;
    };
    let log_dir = match std::fs::canonicalize(parent) {
        Ok(absolute) => absolute.join("logs"),
        Err(_) => parent.join("logs"),
    };
    let Some(log_dir) = log_dir.to_str() else {
        return;
    };
    if let Err(message) = remind_core::init_logging(level, log_dir) {
        eprintln!("warning: logging disabled: {message}");
    }
}
