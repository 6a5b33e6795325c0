//! Bus subscriber that records what it sees.

use std::cell::RefCell;
use std::rc::Rc;
use todo_client_core::event::{Event, EventType};
use todo_client_core::event_bus::{EventBus, Subscription};

/// Records every event of one type posted on a bus.
///
/// The probe's own subscription is released when the probe is dropped, so
/// it never shows up as a leak in `subscriber_count` assertions made after
/// the probe has gone out of scope.
pub struct EventProbe {
    events: Rc<RefCell<Vec<Event>>>,
    bus: EventBus,
    subscription: Option<Subscription>,
}

impl EventProbe {
    /// Subscribes a recorder for `event_type` on `bus`.
    #[must_use]
    pub fn new(bus: &EventBus, event_type: EventType) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription = bus.subscribe(event_type, move |event| {
            sink.borrow_mut().push(event.clone());
        });
        Self {
            events,
            bus: bus.clone(),
            subscription: Some(subscription),
        }
    }

    /// How many matching events have been posted.
    #[must_use]
    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }

    /// The recorded events, in post order.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl Drop for EventProbe {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.bus.unsubscribe(subscription);
        }
    }
}
