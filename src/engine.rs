//! Mutation engine: add/complete/delete/clean atop the resolver and
//! reindexer, with per-id partial-failure accounting.
//!
//! Every batch operation is two-pass: pass 1 snapshots the view's visible id
//! sequence once and resolves all display ids against it; pass 2 applies the
//! mutations. Resolving against a view that shrinks or reorders mid-batch
//! would silently target the wrong records.

use chrono::Utc;
use serde::Serialize;

use crate::error::{Result, TaskpadError};
use crate::model::{Task, View};
use crate::reindex::reindex;
use crate::store::JsonStore;
use crate::view;

/// Per-batch report. The three buckets are disjoint and are all returned
/// together: one unresolvable id degrades the batch to a partial success,
/// never an abort.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Display ids acted upon.
    pub succeeded: Vec<u64>,
    /// Display ids outside the view's range.
    pub not_found: Vec<u64>,
    /// Valid targets that were no-ops (already completed, or not completed
    /// under a completed-only filter).
    pub skipped: Vec<u64>,
}

/// The loaded record set plus its backing store. Owns the collection for the
/// duration of one command; operations persist before returning.
pub struct TaskList {
    store: JsonStore,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn load(store: JsonStore) -> Result<Self> {
        let tasks = store.load()?;
        Ok(Self { store, tasks })
    }

    /// Like `load`, but a corrupt backing file becomes an empty working set.
    /// The flag reports the recovery so the caller can warn; the next
    /// successful mutation rewrites a valid file.
    pub fn load_or_recover(store: JsonStore) -> Result<(Self, bool)> {
        match store.load() {
            Ok(tasks) => Ok((Self { store, tasks }, false)),
            Err(TaskpadError::Corrupt(_)) => Ok((Self { store, tasks: Vec::new() }, true)),
            Err(e) => Err(e),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a new incomplete task and persist. Returns the assigned
    /// storage id. No reindex: ids are dense, so appending `max + 1`
    /// preserves density.
    pub fn add(&mut self, title: &str, description: &str) -> Result<u64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskpadError::EmptyTitle);
        }
        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            description: description.trim().to_string(),
            completed: false,
            created_at: Some(Utc::now()),
            completed_at: None,
        });
        self.store.save(&self.tasks)?;
        Ok(id)
    }

    /// Mark the given display ids completed. Already-completed targets
    /// (reachable when resolving against the full view) are skipped.
    pub fn complete(&mut self, display_view: View, display_ids: &[u64]) -> Result<BatchOutcome> {
        let snapshot = self.snapshot(display_view);
        let mut outcome = BatchOutcome::default();
        let mut targets = Vec::new();

        for &display_id in display_ids {
            match lookup(&snapshot, display_id) {
                None => outcome.not_found.push(display_id),
                Some((_, true)) => outcome.skipped.push(display_id),
                Some((storage_id, false)) => {
                    outcome.succeeded.push(display_id);
                    targets.push(storage_id);
                }
            }
        }

        if !targets.is_empty() {
            let now = Utc::now();
            for task in &mut self.tasks {
                if targets.contains(&task.id) {
                    task.completed = true;
                    task.completed_at = Some(now);
                }
            }
            reindex(&mut self.tasks);
            self.store.save(&self.tasks)?;
        }
        Ok(outcome)
    }

    /// Delete the given display ids. With `completed_only`, resolution runs
    /// against the full view and incomplete targets are skipped instead of
    /// deleted.
    pub fn delete(
        &mut self,
        display_view: View,
        display_ids: &[u64],
        completed_only: bool,
    ) -> Result<BatchOutcome> {
        let resolve_view = if completed_only { View::All } else { display_view };
        let snapshot = self.snapshot(resolve_view);
        let mut outcome = BatchOutcome::default();
        let mut doomed = Vec::new();

        for &display_id in display_ids {
            match lookup(&snapshot, display_id) {
                None => outcome.not_found.push(display_id),
                Some((_, false)) if completed_only => outcome.skipped.push(display_id),
                Some((storage_id, _)) => {
                    outcome.succeeded.push(display_id);
                    doomed.push(storage_id);
                }
            }
        }

        if !doomed.is_empty() {
            self.tasks.retain(|t| !doomed.contains(&t.id));
            reindex(&mut self.tasks);
            self.store.save(&self.tasks)?;
        }
        Ok(outcome)
    }

    /// Remove every completed task, reindex, persist. Returns the count
    /// removed.
    pub fn clean(&mut self) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        reindex(&mut self.tasks);
        self.store.save(&self.tasks)?;
        Ok(removed)
    }

    /// The view's tasks paired with their 1-based display ids.
    pub fn list(&self, display_view: View) -> Vec<(u64, &Task)> {
        view::visible(&self.tasks, display_view)
            .into_iter()
            .enumerate()
            .map(|(index, task)| (index as u64 + 1, task))
            .collect()
    }

    /// Case-insensitive substring search over title and description, across
    /// all records. Storage ids double as All-view display positions since
    /// ids are dense and ordered.
    pub fn search(&self, query: &str) -> Vec<&Task> {
        view::visible(&self.tasks, View::All)
            .into_iter()
            .filter(|t| t.matches(query))
            .collect()
    }

    /// `(total, completed)` counts over the whole record set.
    pub fn counts(&self) -> (usize, usize) {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        (self.tasks.len(), completed)
    }

    /// Pass-1 snapshot: `(storage id, completed)` per visible task, taken
    /// once before any mutation.
    fn snapshot(&self, display_view: View) -> Vec<(u64, bool)> {
        view::visible(&self.tasks, display_view)
            .into_iter()
            .map(|t| (t.id, t.completed))
            .collect()
    }
}

fn lookup(snapshot: &[(u64, bool)], display_id: u64) -> Option<(u64, bool)> {
    let index = display_id.checked_sub(1)? as usize;
    snapshot.get(index).copied()
}
