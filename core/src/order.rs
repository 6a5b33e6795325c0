//! Display ordering for tasks.
//!
//! A total order over [`Task`] values, independent of input positions:
//!
//! 1. Completion status ascending (incomplete before completed).
//! 2. Last-update timestamp descending (most recently touched first).
//! 3. Description, lexicographic ascending.
//! 4. Task id, lexicographic descending.
//!
//! The final key guarantees that no two distinct tasks compare equal, so
//! sorting is a pure function of the task values and re-sorting a sorted
//! slice is a no-op.

use crate::task::Task;
use std::cmp::Ordering;

/// Compares two tasks by the 4-key display order.
#[must_use]
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| b.last_update_date.cmp(&a.last_update_date))
        .then_with(|| a.description.cmp(&b.description))
        .then_with(|| b.id.cmp(&a.id))
}

/// Sorts tasks in place by [`display_order`].
pub fn sort(tasks: &mut [Task]) {
    tasks.sort_by(display_order);
}

/// Returns the tasks sorted by [`display_order`], leaving the input alone.
#[must_use]
pub fn sorted(tasks: &[Task]) -> Vec<Task> {
    let mut out = tasks.to_vec();
    sort(&mut out);
    out
}
