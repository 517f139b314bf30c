use clap::ValueEnum;
use colored::Colorize;
use serde_json::{Value, json};

use crate::engine::BatchOutcome;
use crate::error::Result;
use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Which batch mutation an outcome report belongs to; picks the verb, the
/// glyph, and the skip phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    Complete,
    Delete,
}

pub fn print_added(id: u64, title: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", json!({ "id": id, "title": title })),
        Format::Pretty => println!("{} Added task #{id}: {title}", "✓".green()),
    }
    Ok(())
}

/// Render a listing. `totals` is `(total, completed)` over the whole record
/// set, independent of the view.
pub fn print_list(rows: &[(u64, &Task)], totals: (usize, usize), format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", rows_value(rows)?),
        Format::Pretty => {
            let (total, completed) = totals;
            if total == 0 {
                println!("No tasks found. Add one with 'taskpad add <title>'");
                return Ok(());
            }
            if rows.is_empty() {
                println!("No incomplete tasks. Great job! 🎉");
                return Ok(());
            }
            print_table(rows);
            println!();
            println!("Total: {total} ({completed} completed, {} incomplete)", total - completed);
        }
    }
    Ok(())
}

pub fn print_search(query: &str, rows: &[(u64, &Task)], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", rows_value(rows)?),
        Format::Pretty => {
            if rows.is_empty() {
                println!("No tasks found matching '{query}'");
                return Ok(());
            }
            println!();
            println!("Found {} task(s) matching '{query}':", rows.len());
            print_table(rows);
        }
    }
    Ok(())
}

pub fn print_outcome(action: BatchAction, outcome: &BatchOutcome, format: Format) -> Result<()> {
    if format == Format::Json {
        let name = match action {
            BatchAction::Complete => "complete",
            BatchAction::Delete => "delete",
        };
        let mut value = serde_json::to_value(outcome)?;
        value["action"] = json!(name);
        println!("{value}");
        return Ok(());
    }

    match action {
        BatchAction::Complete => {
            if !outcome.succeeded.is_empty() {
                println!("{} Completed {}", "✓".green(), join_ids(&outcome.succeeded));
            }
            if !outcome.skipped.is_empty() {
                if let [only] = outcome.skipped[..] {
                    println!("Task #{only} was already completed");
                } else {
                    println!("Tasks {} were already completed", plain_join(&outcome.skipped));
                }
            }
        }
        BatchAction::Delete => {
            if !outcome.succeeded.is_empty() {
                println!("{} Deleted {}", "✗".red(), join_ids(&outcome.succeeded));
            }
            for id in &outcome.skipped {
                println!("Skip: Task #{id} is not completed (use without --completed-only to force)");
            }
        }
    }
    if !outcome.not_found.is_empty() {
        println!("Error: Task(s) {} not found", plain_join(&outcome.not_found));
    }
    Ok(())
}

pub fn print_cleaned(removed: usize, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", json!({ "removed": removed })),
        Format::Pretty => println!("🧹 Removed {removed} completed task(s)"),
    }
    Ok(())
}

fn print_table(rows: &[(u64, &Task)]) {
    println!();
    println!(
        "{:<5} {:<12} {:<40} {:<30}",
        "ID", "Status", "Title", "Description"
    );
    println!("{}", "-".repeat(90));
    for (display_id, task) in rows {
        // Pad before colorizing so escape codes don't skew the columns.
        let status = if task.completed {
            format!("{:<12}", "✓ Completed").green()
        } else {
            format!("{:<12}", "○ Incomplete").yellow()
        };
        println!(
            "{:<5} {} {:<40} {:<30}",
            display_id,
            status,
            truncate_cell(&task.title, 40),
            truncate_cell(&task.description, 30),
        );
    }
}

pub fn truncate_cell(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

/// Json listings carry the display id in the `id` slot; every other field is
/// the record as stored.
fn rows_value(rows: &[(u64, &Task)]) -> Result<Value> {
    let values = rows
        .iter()
        .map(|(display_id, task)| {
            let mut value = serde_json::to_value(task)?;
            value["id"] = json!(display_id);
            Ok(value)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(values))
}

fn join_ids(ids: &[u64]) -> String {
    let tagged: Vec<String> = ids.iter().map(|id| format!("#{id}")).collect();
    match &tagged[..] {
        [only] => format!("task {only}"),
        [first, second] => format!("tasks {first} and {second}"),
        [head @ .., last] => format!("tasks {}, and {last}", head.join(", ")),
        [] => String::new(),
    }
}

fn plain_join(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_cell("short", 40), "short");
    }

    #[test]
    fn truncate_cuts_long_text_with_ellipsis() {
        let long = "x".repeat(50);
        let cell = truncate_cell(&long, 40);
        assert_eq!(cell.chars().count(), 40);
        assert!(cell.ends_with("..."));
    }

    #[test]
    fn join_ids_uses_natural_phrasing() {
        assert_eq!(join_ids(&[2]), "task #2");
        assert_eq!(join_ids(&[2, 3]), "tasks #2 and #3");
        assert_eq!(join_ids(&[1, 2, 3]), "tasks #1, #2, and #3");
    }
}
