//! DOM Events
//!
//! Listener registration and dispatch by event kind.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

thread_local! {
    static TIME_ORIGIN: Instant = Instant::now();
}

/// Milliseconds since the first event of this thread
fn now() -> f64 {
    TIME_ORIGIN.with(|origin| origin.elapsed().as_secs_f64() * 1000.0)
}

/// Event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: String,
    pub timestamp: f64,
}

impl Event {
    /// Create an event of the given kind, stamped with the current time
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            timestamp: now(),
        }
    }
}

type Listener = Rc<dyn Fn(&Event)>;

/// Handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    event_type: String,
    callback: Listener,
}

/// Event target
///
/// All methods take `&self` so listeners can register, remove, or dispatch
/// while another dispatch on the same target is in progress.
#[derive(Default)]
pub struct EventTarget {
    listeners: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add event listener
    pub fn add_event_listener(
        &self,
        event_type: &str,
        callback: impl Fn(&Event) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Registration {
            id,
            event_type: event_type.to_string(),
            callback: Rc::new(callback),
        });
        id
    }

    /// Remove event listener. Returns false if it was not registered.
    pub fn remove_event_listener(&self, event_type: &str, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|r| !(r.id == id && r.event_type == event_type));
        listeners.len() != before
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|r| r.event_type == event_type)
            .count()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|r| r.id == id)
    }

    /// Dispatch event to listeners of its kind in registration order.
    ///
    /// Listeners added during dispatch are not invoked for this event;
    /// listeners removed during dispatch are skipped. Returns the number
    /// of listeners invoked.
    pub fn dispatch_event(&self, event: &Event) -> usize {
        let snapshot: Vec<(ListenerId, Listener)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|r| r.event_type == event.event_type)
            .map(|r| (r.id, Rc::clone(&r.callback)))
            .collect();

        let mut invoked = 0;
        for (id, callback) in snapshot {
            if self.is_registered(id) {
                callback(event);
                invoked += 1;
            }
        }
        invoked
    }
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
