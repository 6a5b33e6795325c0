//! Reconciliation of stateful entries with a fresh task list.
//!
//! The server's task list is canonical; the entries on screen carry local
//! state the server knows nothing about (an open edit form, an uncommitted
//! draft). [`Reconciler::merge`] brings the two together: the fresh list
//! dictates membership and order, surviving entries keep their state
//! machine, and dropped entries release every subscription they own before
//! they go.
//!
//! The merge builds an id→entry map once per call, so a refresh costs
//! O(n + m) rather than a per-task scan of the previous entries.

use crate::entry::TaskEntry;
use crate::renderer::Renderer;
use std::collections::HashMap;
use std::rc::Rc;
use todo_client_core::event_bus::EventBus;
use todo_client_core::order;
use todo_client_core::task::{Task, TaskId};

/// Merges previous UI-bound entries with freshly fetched tasks.
///
/// Cloning is cheap; clones share the bus handle and renderer used to
/// construct entries for newly appeared tasks.
#[derive(Clone)]
pub struct Reconciler {
    bus: EventBus,
    renderer: Rc<dyn Renderer>,
}

impl Reconciler {
    /// Creates a reconciler that builds new entries on `bus` drawing
    /// through `renderer`.
    #[must_use]
    pub fn new(bus: EventBus, renderer: Rc<dyn Renderer>) -> Self {
        Self { bus, renderer }
    }

    /// Produces the next ordered entry list from the previous one and a
    /// fresh server-confirmed task array.
    ///
    /// - Tasks are ordered by [`order::display_order`], regardless of the
    ///   order the backend delivered them in.
    /// - An entry whose id is still present keeps its state machine (and
    ///   any in-progress draft) but is bound to the fresh task value and
    ///   repositioned.
    /// - A task with no previous entry gets a new entry in `Display`
    ///   state.
    /// - A previous entry whose id is gone is disposed, releasing its
    ///   subscriptions, before the new list is returned.
    #[must_use]
    pub fn merge(&self, previous: Vec<TaskEntry>, mut fresh: Vec<Task>) -> Vec<TaskEntry> {
        order::sort(&mut fresh);

        let mut by_id: HashMap<TaskId, TaskEntry> = previous
            .into_iter()
            .map(|entry| (entry.id(), entry))
            .collect();

        let mut kept = 0usize;
        let mut next = Vec::with_capacity(fresh.len());
        for task in fresh {
            match by_id.remove(&task.id) {
                Some(entry) => {
                    entry.bind(task);
                    kept += 1;
                    next.push(entry);
                }
                None => {
                    next.push(TaskEntry::new(task, &self.bus, Rc::clone(&self.renderer)));
                }
            }
        }

        let dropped = by_id.len();
        for entry in by_id.into_values() {
            entry.dispose();
        }

        tracing::debug!(
            total = next.len(),
            kept,
            created = next.len() - kept,
            dropped,
            "reconciled task list"
        );
        next
    }
}
