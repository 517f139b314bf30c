//! Display-id resolution: the 1-based position of a task within a view's
//! subsequence, mapped back to its stable storage id.
//!
//! Views are recomputed on every call, never cached: any earlier mutation in
//! the same batch changes membership and must be visible to the next lookup.

use crate::model::{Task, View};

/// The view's subsequence, sorted ascending by storage id.
pub fn visible(tasks: &[Task], view: View) -> Vec<&Task> {
    let mut subset: Vec<&Task> = tasks.iter().filter(|t| view.contains(t)).collect();
    subset.sort_by_key(|t| t.id);
    subset
}

/// Resolve a 1-based display position within `view` to a storage id.
/// Positions outside `[1, len(view)]` resolve to `None`.
pub fn resolve(tasks: &[Task], view: View, display_id: u64) -> Option<u64> {
    let subset = visible(tasks, view);
    let index = display_id.checked_sub(1)? as usize;
    subset.get(index).map(|t| t.id)
}
