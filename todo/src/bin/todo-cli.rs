//! Command-line client for the todo server.
//!
//! Commands:
//! - todo-cli list
//! - todo-cli add <label> [--done]
//! - todo-cli toggle <id>
//! - todo-cli delete <id>

use clap::{Parser, Subcommand};
use todo::client::{HttpTodoApi, TerminalView, TodoController};
use todo::types::TodoId;

/// Manage a todo list served by todo-server
#[derive(Parser, Debug)]
#[command(name = "todo-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the server
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the list
    List,

    /// Add a task
    Add {
        /// Text of the task
        label: String,
        /// Mark the task as done right away
        #[arg(long)]
        done: bool,
    },

    /// Flip a task between done and not done
    Toggle {
        /// Id of the task
        id: u64,
    },

    /// Delete a task
    Delete {
        /// Id of the task
        id: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    todo::init_tracing("warn");

    let cli = Cli::parse();
    let api = HttpTodoApi::new(&cli.url)?;
    let mut controller = TodoController::new(api, TerminalView::new());

    match cli.command {
        Command::List => controller.load().await?,
        Command::Add { label, done } => controller.submit_with_status(label, done).await?,
        Command::Toggle { id } => controller.click_row(TodoId::new(id)).await?,
        Command::Delete { id } => controller.click_delete(TodoId::new(id)).await?,
    }

    println!("{}", controller.view().output());
    Ok(())
}
