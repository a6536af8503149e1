use clap::Subcommand;
use focushive_core::{Priority, SqliteStore, TodoList};

use super::toast_rejection;

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a to-do
    Add {
        text: String,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List to-dos
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a to-do done or not done
    Toggle { id: u64 },
    /// Delete a to-do
    Remove { id: u64 },
    /// Show total, completed and pending counts
    Stats,
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = SqliteStore::open()?;
    let mut todos = TodoList::load(&store)?;

    match action {
        TodoAction::Add { text, priority } => {
            let todo = toast_rejection(todos.add(&text, priority))?;
            println!("added #{}: {} ({})", todo.id, todo.text, todo.priority);
            todos.save(&mut store)?;
        }
        TodoAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(todos.items())?);
            } else if todos.items().is_empty() {
                println!("nothing to do");
            } else {
                for todo in todos.items() {
                    let mark = if todo.completed { "x" } else { " " };
                    println!("[{mark}] #{:<3} {:<6} {}", todo.id, todo.priority, todo.text);
                }
            }
        }
        TodoAction::Toggle { id } => {
            let done = toast_rejection(todos.toggle(id))?;
            let text = todos.get(id).map(|t| t.text.as_str()).unwrap_or_default();
            println!(
                "Marked \"{text}\" as {}",
                if done { "done" } else { "undone" }
            );
            todos.save(&mut store)?;
        }
        TodoAction::Remove { id } => {
            let removed = toast_rejection(todos.remove(id))?;
            println!("removed #{}: {}", removed.id, removed.text);
            todos.save(&mut store)?;
        }
        TodoAction::Stats => {
            let stats = todos.stats();
            println!(
                "total: {}  completed: {}  pending: {}",
                stats.total, stats.completed, stats.pending
            );
        }
    }
    Ok(())
}
