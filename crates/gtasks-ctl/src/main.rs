//! Command-line interface for the Google Tasks and Gmail bridge.
//!
//! Talks directly to the Google APIs through `gtasks-client`, using the same
//! config discovery as the REST and MCP servers (`./gtasks.toml`, then
//! `~/.config/gtasks.toml`, then `GTASKS_*` environment overrides).

mod commands;
mod output;

use clap::{Parser, Subcommand};
use gtasks_shared::GtasksConfig;

#[derive(Parser)]
#[command(
    name = "gtasks-ctl",
    about = "Manage Google Tasks and Gmail from the terminal",
    version,
    styles = output::clap_styles()
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage task lists
    Tasklist {
        #[command(subcommand)]
        command: TasklistCommands,
    },
    /// Manage tasks within a list
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Search tasks by title and notes
    Search {
        /// Text to match (case-insensitive substring)
        query: String,
        /// Restrict the search to a single task list
        #[arg(long = "list")]
        list_id: Option<String>,
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
    /// Send and read Gmail messages
    Email {
        #[command(subcommand)]
        command: EmailCommands,
    },
    /// Inspect credential and token state
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Subcommand)]
enum TasklistCommands {
    /// Show all task lists
    List {
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
    /// Show a single task list
    Get {
        list_id: String,
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
    /// Create a task list
    Create { title: String },
    /// Rename a task list
    Update {
        list_id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a task list
    Delete { list_id: String },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Show tasks in a list
    List {
        list_id: String,
        /// Filter by completion: true shows completed tasks, false hides
        /// completed and hidden tasks; omit for upstream defaults
        #[arg(long)]
        completed: Option<bool>,
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
    /// Show a single task
    Get {
        list_id: String,
        task_id: String,
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
    /// Create a task
    Create {
        list_id: String,
        title: String,
        #[arg(long)]
        notes: Option<String>,
        /// Due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Parent task id (creates a subtask)
        #[arg(long)]
        parent: Option<String>,
        /// Sibling task id to insert after
        #[arg(long)]
        previous: Option<String>,
    },
    /// Update task fields
    Update {
        list_id: String,
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Task status (needsAction or completed)
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a task
    Delete { list_id: String, task_id: String },
    /// Mark a task as completed
    Complete { list_id: String, task_id: String },
    /// Mark a completed task as pending again
    Uncomplete { list_id: String, task_id: String },
    /// Remove all completed tasks from a list
    Clear { list_id: String },
}

#[derive(Subcommand)]
enum EmailCommands {
    /// Send an email
    Send {
        /// Recipient address (repeatable)
        #[arg(long, required = true)]
        to: Vec<String>,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
        /// CC address (repeatable)
        #[arg(long)]
        cc: Vec<String>,
        /// BCC address (repeatable)
        #[arg(long)]
        bcc: Vec<String>,
        /// Send the body as HTML instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Fetch one email with its decoded body
    Read {
        message_id: String,
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
    /// Search emails with Gmail query syntax
    Search {
        query: String,
        /// Maximum results (default 10, capped at 100)
        #[arg(long)]
        max_results: Option<u32>,
        /// Fetch subject and sender per match instead of bare message ids
        #[arg(long)]
        include_content: bool,
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
    /// Show unread emails
    Unread {
        /// Maximum results (default 10, capped at 100)
        #[arg(long)]
        max_results: Option<u32>,
        /// Print raw JSON instead of styled output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Check that credentials resolve and a token can be minted
    Status,
}

#[tokio::main]
async fn main() {
    gtasks_shared::logging::init_stderr_tracing("gtasks_ctl=warn");

    let cli = Cli::parse();
    let config = GtasksConfig::load();

    let result = match cli.command {
        Commands::Tasklist { command } => {
            commands::handle_tasklist_command(command, &config).await
        }
        Commands::Task { command } => commands::handle_task_command(command, &config).await,
        Commands::Search {
            query,
            list_id,
            json,
        } => commands::handle_search_command(&query, list_id.as_deref(), json, &config).await,
        Commands::Email { command } => commands::handle_email_command(command, &config).await,
        Commands::Auth { command } => commands::handle_auth_command(command, &config).await,
    };

    // Handlers report their own errors with context; just set the exit code.
    if result.is_err() {
        std::process::exit(1);
    }
}
