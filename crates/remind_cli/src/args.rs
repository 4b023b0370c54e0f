use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "remind")]
#[command(about = "Manage scheduled reminders from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database file; defaults to <data-dir>/remind/remind.db.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"], global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all reminders.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a new reminder; defaults to one hour from now.
    Add {
        title: String,

        /// Wall-clock time HH:MM; earlier than now means tomorrow.
        #[arg(long)]
        at: Option<String>,
    },
    /// Edit an existing reminder's title and/or time.
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// Wall-clock time HH:MM; earlier than now means tomorrow.
        #[arg(long)]
        at: Option<String>,
    },
    /// Delete one or more reminders.
    Rm {
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Delete every reminder.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
