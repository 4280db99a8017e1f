use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planner", author, version, about = "Text-based Revit task planner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path of the task store for this invocation
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: planner add "Install add-in" --priority 1 --due-date 2025-12-24
    Add {
        /// Short description of the task
        title: Option<String>,
        /// Priority (1=highest, larger=lower priority)
        #[arg(long, allow_negative_numbers = true)]
        priority: Option<i64>,
        /// Due date in YYYY-MM-DD format
        #[arg(long = "due-date", value_name = "YYYY-MM-DD")]
        due_date: Option<String>,
    },
    /// List tasks, overdue first
    ///
    /// Example: planner list
    List,
    /// Mark a task as done
    ///
    /// Example: planner complete 1
    Complete {
        /// Task ID to complete
        task_id: u64,
    },
    /// Update the priority of a task
    ///
    /// Example: planner prioritize 1 2
    Prioritize {
        /// Task ID to update
        task_id: u64,
        /// New priority value
        #[arg(allow_negative_numbers = true)]
        priority: i64,
    },
}
