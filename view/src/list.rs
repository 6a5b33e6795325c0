//! The on-screen task list.
//!
//! [`TaskListView`] owns the ordered entry table and is the only thing that
//! mutates it: every `TaskListUpdated` event runs a merge and then walks the
//! result in order, asking each entry to draw itself. Everything else
//! (services, other entries) only ever sees the bus.

use crate::entry::TaskEntry;
use crate::reconcile::Reconciler;
use crate::renderer::Renderer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use todo_client_core::event::{Event, EventType};
use todo_client_core::event_bus::{EventBus, Subscription};
use todo_client_core::task::TaskId;

struct ListInner {
    entries: Vec<TaskEntry>,
    reconciler: Reconciler,
    bus: EventBus,
    subscription: Option<Subscription>,
}

/// Owner of the task entry table, driven by `TaskListUpdated` events.
pub struct TaskListView {
    inner: Rc<RefCell<ListInner>>,
}

impl TaskListView {
    /// Creates an empty list view and subscribes it to `TaskListUpdated`.
    #[must_use]
    pub fn new(bus: &EventBus, renderer: Rc<dyn Renderer>) -> Self {
        let inner = Rc::new(RefCell::new(ListInner {
            entries: Vec::new(),
            reconciler: Reconciler::new(bus.clone(), renderer),
            bus: bus.clone(),
            subscription: None,
        }));

        let weak = Rc::downgrade(&inner);
        let subscription = bus.subscribe(EventType::TaskListUpdated, move |event| {
            on_list_updated(&weak, event);
        });
        inner.borrow_mut().subscription = Some(subscription);

        Self { inner }
    }

    /// Number of entries currently on screen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Ids of the entries in display order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(TaskEntry::id)
            .collect()
    }

    /// Handle to the entry for `id`, if present.
    #[must_use]
    pub fn entry(&self, id: &TaskId) -> Option<TaskEntry> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|entry| entry.id() == *id)
            .cloned()
    }

    /// Tears the view down: releases its own subscription and disposes
    /// every entry it owns.
    pub fn dispose(&self) {
        let (bus, subscription, entries) = {
            let mut inner = self.inner.borrow_mut();
            (
                inner.bus.clone(),
                inner.subscription.take(),
                std::mem::take(&mut inner.entries),
            )
        };
        if let Some(subscription) = subscription {
            bus.unsubscribe(subscription);
        }
        for entry in entries {
            entry.dispose();
        }
    }
}

fn on_list_updated(weak: &Weak<RefCell<ListInner>>, event: &Event) {
    let Some(inner_rc) = weak.upgrade() else {
        return;
    };
    let Event::TaskListUpdated { tasks } = event else {
        return;
    };

    let (previous, reconciler) = {
        let mut inner = inner_rc.borrow_mut();
        (
            std::mem::take(&mut inner.entries),
            inner.reconciler.clone(),
        )
    };

    let next = reconciler.merge(previous, tasks.clone());
    inner_rc.borrow_mut().entries = next;

    // Render outside the borrow so a drawing callback may post again.
    let entries: Vec<TaskEntry> = inner_rc.borrow().entries.clone();
    for entry in &entries {
        entry.render();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use chrono::{Duration, Utc};
    use std::cell::RefCell;
    use todo_client_core::task::Task;

    #[derive(Default)]
    struct OrderRenderer {
        drawn: RefCell<Vec<String>>,
    }

    impl Renderer for OrderRenderer {
        fn enter_display(&self, task: &Task) {
            self.drawn.borrow_mut().push(task.id.as_str().to_string());
        }
        fn enter_edit(&self, task: &Task, _draft: &str) {
            self.drawn.borrow_mut().push(task.id.as_str().to_string());
        }
        fn edit_rejected(&self, _task: &Task, _message: &str) {}
        fn destroy(&self, _id: &TaskId) {}
    }

    fn task(id: &str, offset_secs: i64) -> Task {
        Task::new(
            TaskId::new(id).unwrap(),
            format!("task {id}"),
            Utc::now() + Duration::seconds(offset_secs),
        )
        .unwrap()
    }

    #[test]
    fn reacts_to_task_list_updated_and_renders_in_order() {
        let bus = EventBus::new();
        let renderer = Rc::new(OrderRenderer::default());
        let view = TaskListView::new(&bus, Rc::clone(&renderer) as Rc<dyn Renderer>);

        bus.post(&Event::TaskListUpdated {
            tasks: vec![task("old", 0), task("new", 60)],
        });

        assert_eq!(view.len(), 2);
        assert_eq!(
            view.task_ids()
                .iter()
                .map(TaskId::as_str)
                .collect::<Vec<_>>(),
            vec!["new", "old"]
        );
        assert_eq!(*renderer.drawn.borrow(), vec!["new", "old"]);
    }

    #[test]
    fn successive_updates_reconcile_the_same_view() {
        let bus = EventBus::new();
        let renderer = Rc::new(OrderRenderer::default());
        let view = TaskListView::new(&bus, Rc::clone(&renderer) as Rc<dyn Renderer>);

        bus.post(&Event::TaskListUpdated {
            tasks: vec![task("a", 0)],
        });
        let entry = view.entry(&TaskId::new("a").unwrap()).unwrap();

        bus.post(&Event::TaskListUpdated {
            tasks: vec![task("a", 0), task("b", 30)],
        });

        assert_eq!(view.len(), 2);
        // Same entry carried across the refresh, not a new one.
        let carried = view.entry(&TaskId::new("a").unwrap()).unwrap();
        assert!(!entry.is_terminated());
        assert_eq!(carried.id(), entry.id());
    }

    #[test]
    fn dispose_releases_the_view_and_all_entries() {
        let bus = EventBus::new();
        let renderer = Rc::new(OrderRenderer::default());
        let view = TaskListView::new(&bus, Rc::clone(&renderer) as Rc<dyn Renderer>);

        bus.post(&Event::TaskListUpdated {
            tasks: vec![task("a", 0), task("b", 30)],
        });
        view.dispose();

        assert!(view.is_empty());
        assert_eq!(bus.subscriber_count(EventType::TaskListUpdated), 0);
        assert_eq!(bus.subscriber_count(EventType::TaskRemoved), 0);
        assert_eq!(bus.subscriber_count(EventType::TaskEditingStarted), 0);

        // A later update is ignored by the disposed view.
        bus.post(&Event::TaskListUpdated {
            tasks: vec![task("c", 60)],
        });
        assert!(view.is_empty());
    }
}
