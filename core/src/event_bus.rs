//! Synchronous typed publish/subscribe dispatcher.
//!
//! The bus connects UI actions to domain logic and back on a single thread:
//! [`EventBus::post`] invokes every currently-subscribed callback for the
//! event's type before it returns, in subscription order. Callbacks may post
//! further events; those reentrant posts are dispatched depth-first, to
//! completion, before the outer post resumes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  post(Event)   ┌─────────────┐
//! │  UI action / │ ─────────────► │  EventBus   │
//! │   service    │                │  registry   │
//! └──────────────┘                └──────┬──────┘
//!                                        │ in subscription order
//!                             ┌──────────┼──────────┐
//!                             ▼          ▼          ▼
//!                         ┌───────┐  ┌───────┐  ┌───────┐
//!                         │ entry │  │ entry │  │ list  │
//!                         │  sm   │  │  sm   │  │ view  │
//!                         └───────┘  └───────┘  └───────┘
//! ```
//!
//! # Ordering
//!
//! Within one `post`, subscribers of the event's type run strictly in
//! subscription order. No ordering is guaranteed across different event
//! types.
//!
//! # Handles
//!
//! [`subscribe`](EventBus::subscribe) returns a [`Subscription`] handle.
//! Whoever subscribes owns the handle and releases it exactly once on
//! teardown of the owning entry; the handle is consumed by
//! [`unsubscribe`](EventBus::unsubscribe), so a double release does not
//! compile.
//!
//! # Thread Model
//!
//! The bus is deliberately single-threaded (`Rc`/`RefCell`), matching the
//! cooperative event-loop model of the client. It is not `Send`; async work
//! that needs to post must resolve on the same thread.

use crate::event::{Event, EventType};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Callback invoked with each posted event of the subscribed type.
type Callback = Rc<dyn Fn(&Event)>;

/// Opaque handle identifying one registration on the bus.
///
/// Not `Clone`: the owner releases it exactly once by passing it back to
/// [`EventBus::unsubscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    event_type: EventType,
}

impl Subscription {
    /// The event type this subscription listens for.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }
}

struct Subscriber {
    id: u64,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: HashMap<EventType, Vec<Subscriber>>,
}

/// The synchronous, same-thread publish/subscribe dispatcher.
///
/// Cloning an `EventBus` is cheap and yields another handle to the same
/// registry.
///
/// # Examples
///
/// ```
/// use todo_client_core::event::{Event, EventType};
/// use todo_client_core::event_bus::EventBus;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let bus = EventBus::new();
/// let seen = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&seen);
/// let subscription = bus.subscribe(EventType::SignedOut, move |_event| {
///     counter.set(counter.get() + 1);
/// });
///
/// bus.post(&Event::SignedOut);
/// assert_eq!(seen.get(), 1);
///
/// bus.unsubscribe(subscription);
/// bus.post(&Event::SignedOut);
/// assert_eq!(seen.get(), 1);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Registry>>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to run whenever an event of `event_type` is
    /// posted. Multiple subscriptions to the same type are all invoked, in
    /// subscription order.
    ///
    /// The returned handle must be released with
    /// [`unsubscribe`](Self::unsubscribe) when the owning entry is torn
    /// down.
    pub fn subscribe(
        &self,
        event_type: EventType,
        callback: impl Fn(&Event) + 'static,
    ) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .subscribers
            .entry(event_type)
            .or_default()
            .push(Subscriber {
                id,
                callback: Rc::new(callback),
            });
        tracing::trace!(event_type = %event_type, id, "subscribed");
        Subscription { id, event_type }
    }

    /// Removes exactly the registration identified by `subscription`.
    ///
    /// Passing a handle the bus does not know (for example one issued by a
    /// different bus instance) is a silent no-op, logged at trace level.
    /// Double release is ruled out by the handle being consumed here.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut registry = self.inner.borrow_mut();
        let removed = registry
            .subscribers
            .get_mut(&subscription.event_type)
            .is_some_and(|subscribers| {
                let before = subscribers.len();
                subscribers.retain(|s| s.id != subscription.id);
                subscribers.len() < before
            });
        if removed {
            tracing::trace!(
                event_type = %subscription.event_type,
                id = subscription.id,
                "unsubscribed"
            );
        } else {
            tracing::trace!(
                event_type = %subscription.event_type,
                id = subscription.id,
                "unsubscribe of unknown handle ignored"
            );
        }
    }

    /// Synchronously invokes every currently-subscribed callback for the
    /// event's type, in subscription order, passing the event.
    ///
    /// Callbacks may post further events; those are dispatched depth-first
    /// and complete before this call returns. A callback unsubscribed by an
    /// earlier callback of the same post is skipped; a callback subscribed
    /// during the post is not invoked for it.
    pub fn post(&self, event: &Event) {
        let event_type = event.event_type();

        // Snapshot outside the borrow so callbacks can freely subscribe,
        // unsubscribe, and post.
        let snapshot: Vec<(u64, Callback)> = self
            .inner
            .borrow()
            .subscribers
            .get(&event_type)
            .map(|subscribers| {
                subscribers
                    .iter()
                    .map(|s| (s.id, Rc::clone(&s.callback)))
                    .collect()
            })
            .unwrap_or_default();

        tracing::trace!(event_type = %event_type, subscribers = snapshot.len(), "posting");

        for (id, callback) in snapshot {
            if self.is_registered(event_type, id) {
                callback(event);
            }
        }
    }

    /// Number of live subscriptions for `event_type`.
    ///
    /// Useful for asserting that teardown released everything it owned.
    #[must_use]
    pub fn subscriber_count(&self, event_type: EventType) -> usize {
        self.inner
            .borrow()
            .subscribers
            .get(&event_type)
            .map_or(0, Vec::len)
    }

    fn is_registered(&self, event_type: EventType, id: u64) -> bool {
        self.inner
            .borrow()
            .subscribers
            .get(&event_type)
            .is_some_and(|subscribers| subscribers.iter().any(|s| s.id == id))
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.borrow();
        let total: usize = registry.subscribers.values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("subscriptions", &total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use crate::task::TaskId;
    use std::cell::RefCell;

    fn removed(id: &str) -> Event {
        Event::TaskRemoved {
            id: TaskId::new(id).unwrap(),
        }
    }

    #[test]
    fn fan_out_invokes_only_matching_type_in_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        bus.subscribe(EventType::TaskRemoved, move |_| {
            first.borrow_mut().push("a1");
        });
        let second = Rc::clone(&log);
        bus.subscribe(EventType::TaskRemoved, move |_| {
            second.borrow_mut().push("a2");
        });
        let other = Rc::clone(&log);
        bus.subscribe(EventType::SignedOut, move |_| {
            other.borrow_mut().push("b");
        });

        bus.post(&removed("t-1"));

        assert_eq!(*log.borrow(), vec!["a1", "a2"]);
    }

    #[test]
    fn unsubscribed_callback_no_longer_fires() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        let subscription = bus.subscribe(EventType::TaskRemoved, move |_| {
            sink.borrow_mut().push("fired");
        });

        bus.post(&removed("t-1"));
        bus.unsubscribe(subscription);
        bus.post(&removed("t-1"));

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(bus.subscriber_count(EventType::TaskRemoved), 0);
    }

    #[test]
    fn foreign_handle_unsubscribe_is_a_no_op() {
        let bus = EventBus::new();
        let other = EventBus::new();

        let kept = bus.subscribe(EventType::SignedIn, |_| {});
        let foreign = other.subscribe(EventType::SignedIn, |_| {});

        bus.unsubscribe(foreign);

        assert_eq!(bus.subscriber_count(EventType::SignedIn), 1);
        bus.unsubscribe(kept);
    }

    #[test]
    fn reentrant_post_dispatches_depth_first() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let reposter_log = Rc::clone(&log);
        let reposter_bus = bus.clone();
        bus.subscribe(EventType::TaskRemovalRequested, move |_| {
            reposter_log.borrow_mut().push("outer-first");
            reposter_bus.post(&removed("t-1"));
            reposter_log.borrow_mut().push("outer-first-done");
        });
        let inner_log = Rc::clone(&log);
        bus.subscribe(EventType::TaskRemoved, move |_| {
            inner_log.borrow_mut().push("inner");
        });
        let trailing_log = Rc::clone(&log);
        bus.subscribe(EventType::TaskRemovalRequested, move |_| {
            trailing_log.borrow_mut().push("outer-second");
        });

        bus.post(&Event::TaskRemovalRequested {
            id: TaskId::new("t-1").unwrap(),
        });

        assert_eq!(
            *log.borrow(),
            vec!["outer-first", "inner", "outer-first-done", "outer-second"]
        );
    }

    #[test]
    fn callback_unsubscribed_mid_post_is_skipped() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let killer_bus = bus.clone();
        let killer_victim = Rc::clone(&victim);
        let killer_log = Rc::clone(&log);
        bus.subscribe(EventType::SignedOut, move |_| {
            killer_log.borrow_mut().push("killer");
            if let Some(handle) = killer_victim.borrow_mut().take() {
                killer_bus.unsubscribe(handle);
            }
        });

        let victim_log = Rc::clone(&log);
        let handle = bus.subscribe(EventType::SignedOut, move |_| {
            victim_log.borrow_mut().push("victim");
        });
        *victim.borrow_mut() = Some(handle);

        bus.post(&Event::SignedOut);

        assert_eq!(*log.borrow(), vec!["killer"]);
    }

    #[test]
    fn callback_subscribed_mid_post_waits_for_next_post() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let adder_bus = bus.clone();
        let adder_log = Rc::clone(&log);
        let armed = std::cell::Cell::new(true);
        bus.subscribe(EventType::SignedOut, move |_| {
            adder_log.borrow_mut().push("adder");
            if armed.replace(false) {
                let late_log = Rc::clone(&adder_log);
                adder_bus.subscribe(EventType::SignedOut, move |_| {
                    late_log.borrow_mut().push("late");
                });
            }
        });

        bus.post(&Event::SignedOut);
        assert_eq!(*log.borrow(), vec!["adder"]);

        bus.post(&Event::SignedOut);
        assert_eq!(*log.borrow(), vec!["adder", "adder", "late"]);
    }
}
