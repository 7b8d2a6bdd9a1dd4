use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::metadata::{BIN_NAME, PKG_DESCRIPTION, PKG_VERSION};

#[derive(Parser, Debug, Clone)]
#[command(name = BIN_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArguments,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArguments {
    /// Backend base URL (overrides the settings file)
    #[arg(long, global = true, env = "GODOT_MANAGER_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides the settings file)
    #[arg(long, global = true, env = "GODOT_MANAGER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Settings file path
    #[arg(long, global = true, env = "GODOT_MANAGER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Log every request and response to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage the tasks of a project
    #[command(subcommand)]
    Task(TaskCommand),
    /// Manage the subtasks of a task
    #[command(subcommand)]
    Subtask(SubtaskCommand),
    /// Read and write the daily journal
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Inspect or edit the client settings
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// List every project
    List,
    /// Show one project with its tasks
    Show { id: String },
    /// Create a project
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Update a project; fields not given keep their stored values
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// JSON file holding the full replacement task list
        #[arg(long)]
        tasks_file: Option<PathBuf>,
    },
    /// Delete a project
    Delete { id: String },
}

#[derive(Args, Debug, Clone)]
pub struct WorkItemArguments {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due: String,

    #[arg(long, default_value = "Todo")]
    pub status: String,

    #[arg(long, default_value = "Medium")]
    pub difficulty: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Append a task to a project
    Add {
        project_id: String,
        #[command(flatten)]
        item: WorkItemArguments,
        /// Free-form task type, e.g. "feature" or "bug"
        #[arg(long = "type")]
        task_type: Option<String>,
    },
    /// Change the status of a task
    Status {
        project_id: String,
        task_id: String,
        status: String,
    },
    /// Remove a task and its subtasks
    Remove { project_id: String, task_id: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubtaskCommand {
    /// Append a subtask to a task
    Add {
        project_id: String,
        task_id: String,
        #[command(flatten)]
        item: WorkItemArguments,
    },
    /// Change the status of a subtask
    Status {
        project_id: String,
        task_id: String,
        subtask_id: String,
        status: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum JournalCommand {
    /// List every journal entry
    List,
    /// Write a new entry
    Add {
        /// Entry date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        content: String,
    },
    /// Rewrite an existing entry
    Edit {
        id: String,
        /// Entry date as YYYY-MM-DD (defaults to the stored date)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        content: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the resolved settings
    Show,
    /// Print the settings file location
    Path,
    /// Edit the settings file interactively
    Edit,
}
