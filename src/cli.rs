use std::path::Path;

use clap::Subcommand;

use crate::engine::TaskList;
use crate::error::Result;
use crate::model::View;
use crate::output::{self, BatchAction, Format};
use crate::store::JsonStore;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, short, default_value = "")]
        description: String,
    },
    /// List tasks
    List {
        /// Show all tasks including completed ones
        #[arg(long, short)]
        all: bool,
    },
    /// Search tasks by title or description
    Search {
        /// Search query
        query: String,
    },
    /// Mark tasks as completed by display id
    Complete {
        /// Display id(s) to complete
        #[arg(required = true)]
        ids: Vec<u64>,
        /// Resolve ids against the full list including completed tasks
        #[arg(long, short)]
        all: bool,
    },
    /// Delete tasks by display id
    Delete {
        /// Display id(s) to delete
        #[arg(required = true)]
        ids: Vec<u64>,
        /// Resolve ids against the full list including completed tasks
        #[arg(long, short)]
        all: bool,
        /// Only delete tasks that are already completed
        #[arg(long)]
        completed_only: bool,
    },
    /// Remove all completed tasks
    Clean,
}

pub fn dispatch(file: &Path, format: Format, command: Commands) -> Result<()> {
    let mut list = open(file)?;
    match command {
        Commands::Add { title, description } => {
            let id = list.add(&title, &description)?;
            output::print_added(id, title.trim(), format)
        }
        Commands::List { all } => {
            let rows = list.list(View::from_show_all(all));
            output::print_list(&rows, list.counts(), format)
        }
        Commands::Search { query } => {
            let rows: Vec<(u64, &crate::model::Task)> =
                list.search(&query).into_iter().map(|t| (t.id, t)).collect();
            output::print_search(&query, &rows, format)
        }
        Commands::Complete { ids, all } => {
            let outcome = list.complete(View::from_show_all(all), &ids)?;
            output::print_outcome(BatchAction::Complete, &outcome, format)
        }
        Commands::Delete {
            ids,
            all,
            completed_only,
        } => {
            let outcome = list.delete(View::from_show_all(all), &ids, completed_only)?;
            output::print_outcome(BatchAction::Delete, &outcome, format)
        }
        Commands::Clean => {
            let removed = list.clean()?;
            output::print_cleaned(removed, format)
        }
    }
}

fn open(file: &Path) -> Result<TaskList> {
    let (list, recovered) = TaskList::load_or_recover(JsonStore::open(file))?;
    if recovered {
        eprintln!(
            "warning: could not parse {}; starting with an empty task list",
            file.display()
        );
    }
    Ok(list)
}
