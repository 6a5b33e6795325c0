//! Per-task display/edit state machine.
//!
//! A [`TaskEntry`] pairs a live [`Task`] value with the state machine that
//! decides how it is drawn. The machine has two states, `Display` and
//! `Edit`, plus a terminal teardown reached through `TaskRemoved` or
//! through the reconciler dropping the entry.
//!
//! # Transitions
//!
//! ```text
//!            TaskEditingStarted
//!   Display ───────────────────► Edit ──┐ TaskUpdateFailed
//!      ▲                          │  ◄──┘ (stays, records error)
//!      │  TaskEditingCanceled /   │
//!      └── TaskUpdated (non-      │
//!          completion update) ◄───┘
//!
//!   any state ── TaskRemoved ──► terminal (subscriptions released)
//! ```
//!
//! # Subscription Discipline
//!
//! The removal watch is taken at construction and survives Display↔Edit
//! swaps; it is released only on teardown. Each state additionally holds
//! the subscriptions relevant to its own transitions and swaps them when
//! the state changes. All handles live in the entry's own arena and are
//! bulk-released on teardown; leaking one would leave a dangling callback
//! referencing a destroyed slot.
//!
//! # Draft Preservation
//!
//! `Edit` holds the uncommitted draft locally. Reconciliation replaces the
//! bound task value but never touches the machine, so an in-progress draft
//! survives list refreshes untouched.

use crate::renderer::Renderer;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use todo_client_core::event::{Event, EventType};
use todo_client_core::event_bus::{EventBus, Subscription};
use todo_client_core::task::{Task, TaskId};

/// Current state of a task's UI, observable for tests and rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Read-only presentation.
    Display,
    /// An edit form is open.
    Edit {
        /// Uncommitted text, local to this entry.
        draft: String,
        /// Last rejected update's message, if any.
        error: Option<String>,
    },
}

struct EntryInner {
    task: Task,
    phase: Phase,
    terminated: bool,
    bus: EventBus,
    renderer: Rc<dyn Renderer>,
    /// Subscriptions scoped to the current state, swapped on transition.
    phase_subs: SmallVec<[Subscription; 3]>,
    /// Subscriptions that live as long as the entry (the removal watch).
    entry_subs: SmallVec<[Subscription; 1]>,
}

/// A task bound to its state machine and subscription arena.
///
/// `TaskEntry` is a shared handle; cloning it is cheap and refers to the
/// same underlying entry. The reconciler carries entries across merges by
/// id, the list view renders them in order.
#[derive(Clone)]
pub struct TaskEntry {
    inner: Rc<RefCell<EntryInner>>,
}

impl TaskEntry {
    /// Creates an entry in `Display` state and takes its subscriptions:
    /// the entry-lifetime removal watch plus the `Display`-state
    /// editing-started watch.
    #[must_use]
    pub fn new(task: Task, bus: &EventBus, renderer: Rc<dyn Renderer>) -> Self {
        let inner = Rc::new(RefCell::new(EntryInner {
            task,
            phase: Phase::Display,
            terminated: false,
            bus: bus.clone(),
            renderer,
            phase_subs: SmallVec::new(),
            entry_subs: SmallVec::new(),
        }));

        let watch = {
            let weak = Rc::downgrade(&inner);
            bus.subscribe(EventType::TaskRemoved, move |event| {
                with_live(&weak, |inner| on_removed(inner, event));
            })
        };
        inner.borrow_mut().entry_subs.push(watch);
        subscribe_display(&inner);

        Self { inner }
    }

    /// The bound task's id.
    #[must_use]
    pub fn id(&self) -> TaskId {
        self.inner.borrow().task.id.clone()
    }

    /// The currently bound task value.
    #[must_use]
    pub fn task(&self) -> Task {
        self.inner.borrow().task.clone()
    }

    /// The machine's current state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase.clone()
    }

    /// Whether an edit form is open.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.inner.borrow().phase, Phase::Edit { .. })
    }

    /// The uncommitted draft, if the entry is in `Edit`.
    #[must_use]
    pub fn draft(&self) -> Option<String> {
        match &self.inner.borrow().phase {
            Phase::Edit { draft, .. } => Some(draft.clone()),
            Phase::Display => None,
        }
    }

    /// Whether the entry has been torn down.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.inner.borrow().terminated
    }

    /// Replaces the bound task with a fresh server-confirmed value.
    ///
    /// The state machine is untouched: state and draft survive. Ignored
    /// after teardown.
    pub fn bind(&self, fresh: Task) {
        let mut inner = self.inner.borrow_mut();
        if inner.terminated {
            return;
        }
        debug_assert_eq!(inner.task.id, fresh.id, "an entry never changes identity");
        inner.task = fresh;
    }

    /// Draws the entry through its renderer according to the current state.
    pub fn render(&self) {
        let (renderer, task, phase, terminated) = {
            let inner = self.inner.borrow();
            (
                Rc::clone(&inner.renderer),
                inner.task.clone(),
                inner.phase.clone(),
                inner.terminated,
            )
        };
        if terminated {
            return;
        }
        match phase {
            Phase::Display => renderer.enter_display(&task),
            Phase::Edit { draft, error } => {
                renderer.enter_edit(&task, &draft);
                if let Some(message) = error {
                    renderer.edit_rejected(&task, &message);
                }
            }
        }
    }

    /// Tears the entry down: releases every subscription it owns and asks
    /// the renderer to destroy the slot. Safe to call more than once.
    pub fn dispose(&self) {
        terminate(&self.inner);
    }
}

impl std::fmt::Debug for TaskEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TaskEntry")
            .field("id", &inner.task.id)
            .field("phase", &inner.phase)
            .field("terminated", &inner.terminated)
            .finish()
    }
}

/// Runs `f` only while the entry is still alive and not torn down.
fn with_live(weak: &Weak<RefCell<EntryInner>>, f: impl FnOnce(&Rc<RefCell<EntryInner>>)) {
    if let Some(inner) = weak.upgrade() {
        if !inner.borrow().terminated {
            f(&inner);
        }
    }
}

fn event_is_for(inner: &Rc<RefCell<EntryInner>>, event: &Event) -> bool {
    event
        .task_id()
        .is_some_and(|id| *id == inner.borrow().task.id)
}

fn subscribe_display(inner_rc: &Rc<RefCell<EntryInner>>) {
    let bus = inner_rc.borrow().bus.clone();
    let weak = Rc::downgrade(inner_rc);
    let sub = bus.subscribe(EventType::TaskEditingStarted, move |event| {
        with_live(&weak, |inner| on_editing_started(inner, event));
    });
    inner_rc.borrow_mut().phase_subs.push(sub);
}

fn subscribe_edit(inner_rc: &Rc<RefCell<EntryInner>>) {
    let bus = inner_rc.borrow().bus.clone();

    let weak = Rc::downgrade(inner_rc);
    let canceled = bus.subscribe(EventType::TaskEditingCanceled, move |event| {
        with_live(&weak, |inner| on_editing_canceled(inner, event));
    });
    let weak = Rc::downgrade(inner_rc);
    let updated = bus.subscribe(EventType::TaskUpdated, move |event| {
        with_live(&weak, |inner| on_updated(inner, event));
    });
    let weak = Rc::downgrade(inner_rc);
    let failed = bus.subscribe(EventType::TaskUpdateFailed, move |event| {
        with_live(&weak, |inner| on_update_failed(inner, event));
    });

    let mut inner = inner_rc.borrow_mut();
    inner.phase_subs.push(canceled);
    inner.phase_subs.push(updated);
    inner.phase_subs.push(failed);
}

fn release_phase_subs(inner_rc: &Rc<RefCell<EntryInner>>) {
    let (bus, subs) = {
        let mut inner = inner_rc.borrow_mut();
        let subs: SmallVec<[Subscription; 3]> = inner.phase_subs.drain(..).collect();
        (inner.bus.clone(), subs)
    };
    for sub in subs {
        bus.unsubscribe(sub);
    }
}

fn on_editing_started(inner_rc: &Rc<RefCell<EntryInner>>, event: &Event) {
    if !event_is_for(inner_rc, event) {
        return;
    }
    let (renderer, task, draft) = {
        let mut inner = inner_rc.borrow_mut();
        if !matches!(inner.phase, Phase::Display) {
            return;
        }
        let draft = inner.task.description.clone();
        inner.phase = Phase::Edit {
            draft: draft.clone(),
            error: None,
        };
        (Rc::clone(&inner.renderer), inner.task.clone(), draft)
    };
    tracing::debug!(id = %task.id, "edit started");
    release_phase_subs(inner_rc);
    subscribe_edit(inner_rc);
    renderer.enter_edit(&task, &draft);
}

fn on_editing_canceled(inner_rc: &Rc<RefCell<EntryInner>>, event: &Event) {
    if !event_is_for(inner_rc, event) {
        return;
    }
    let (renderer, task) = {
        let mut inner = inner_rc.borrow_mut();
        if !matches!(inner.phase, Phase::Edit { .. }) {
            return;
        }
        inner.phase = Phase::Display;
        (Rc::clone(&inner.renderer), inner.task.clone())
    };
    tracing::debug!(id = %task.id, "edit canceled");
    release_phase_subs(inner_rc);
    subscribe_display(inner_rc);
    renderer.enter_display(&task);
}

/// A confirmed update leaves `Edit` only when it was a description change;
/// a confirmed completion toggle refreshes the bound task but keeps the
/// open edit form (and its draft) alone.
fn on_updated(inner_rc: &Rc<RefCell<EntryInner>>, event: &Event) {
    let Event::TaskUpdated { task: fresh } = event else {
        return;
    };
    if fresh.id != inner_rc.borrow().task.id {
        return;
    }
    let completion_toggle = {
        let mut inner = inner_rc.borrow_mut();
        if !matches!(inner.phase, Phase::Edit { .. }) {
            return;
        }
        let toggle = fresh.completed != inner.task.completed;
        inner.task = fresh.clone();
        if !toggle {
            inner.phase = Phase::Display;
        }
        toggle
    };

    let (renderer, task, phase) = {
        let inner = inner_rc.borrow();
        (
            Rc::clone(&inner.renderer),
            inner.task.clone(),
            inner.phase.clone(),
        )
    };
    if completion_toggle {
        tracing::debug!(id = %task.id, "completion confirmed while editing");
        if let Phase::Edit { draft, .. } = phase {
            renderer.enter_edit(&task, &draft);
        }
    } else {
        tracing::debug!(id = %task.id, "update confirmed, leaving edit");
        release_phase_subs(inner_rc);
        subscribe_display(inner_rc);
        renderer.enter_display(&task);
    }
}

fn on_update_failed(inner_rc: &Rc<RefCell<EntryInner>>, event: &Event) {
    let Event::TaskUpdateFailed { id, message } = event else {
        return;
    };
    if *id != inner_rc.borrow().task.id {
        return;
    }
    let (renderer, task) = {
        let mut inner = inner_rc.borrow_mut();
        let Phase::Edit { error, .. } = &mut inner.phase else {
            return;
        };
        *error = Some(message.clone());
        (Rc::clone(&inner.renderer), inner.task.clone())
    };
    tracing::warn!(id = %task.id, message, "update rejected, staying in edit");
    renderer.edit_rejected(&task, message);
}

fn on_removed(inner_rc: &Rc<RefCell<EntryInner>>, event: &Event) {
    if !event_is_for(inner_rc, event) {
        return;
    }
    terminate(inner_rc);
}

fn terminate(inner_rc: &Rc<RefCell<EntryInner>>) {
    let (bus, renderer, id, subs) = {
        let mut inner = inner_rc.borrow_mut();
        if inner.terminated {
            return;
        }
        inner.terminated = true;
        let mut subs: Vec<Subscription> = inner.phase_subs.drain(..).collect();
        subs.extend(inner.entry_subs.drain(..));
        (
            inner.bus.clone(),
            Rc::clone(&inner.renderer),
            inner.task.id.clone(),
            subs,
        )
    };
    tracing::debug!(id = %id, released = subs.len(), "entry torn down");
    for sub in subs {
        bus.unsubscribe(sub);
    }
    renderer.destroy(&id);
}
