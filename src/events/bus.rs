//! Single-threaded event hub with per-kind subscriber lists.

use super::types::{Event, EventKind};
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

type Handler = Rc<dyn Fn(&Event)>;

/// Identifies one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
}

impl Registry {
    fn allocate_id(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    fn insert(&mut self, kind: EventKind, id: SubscriptionId, handler: Handler) {
        self.subscribers.entry(kind).or_default().push((id, handler));
    }

    fn remove(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(list) = self.subscribers.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(existing, _)| *existing != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.subscribers.remove(&kind);
        }
        removed
    }
}

/// Publish/subscribe hub.
///
/// Cloning an `EventBus` yields another handle to the same registry, so the
/// pointer tracker, the history and the application can each hold one.
/// Delivery order among handlers of the same kind is unspecified.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every event of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate_id();
        registry.insert(kind, id, Rc::new(handler));
        trace!("subscribed {id:?} to {kind:?}");
        self.handle(kind, id)
    }

    /// Registers `handler` for the next event of `kind` only.
    ///
    /// The handler is unregistered before it runs, so a nested publish of the
    /// same kind from inside the handler does not reach it again.
    pub fn subscribe_once<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnOnce(&Event) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate_id();
        let slot = RefCell::new(Some(handler));
        let weak = Rc::downgrade(&self.registry);
        let proxy = move |event: &Event| {
            let Some(handler) = slot.borrow_mut().take() else {
                return;
            };
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().remove(kind, id);
            }
            handler(event);
        };
        registry.insert(kind, id, Rc::new(proxy));
        trace!("subscribed {id:?} once to {kind:?}");
        self.handle(kind, id)
    }

    /// Removes a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let removed = self.registry.borrow_mut().remove(kind, id);
        if removed {
            trace!("unsubscribed {id:?} from {kind:?}");
        }
        removed
    }

    /// Delivers `event` to every handler subscribed to its kind at call time.
    ///
    /// Publishing a kind nobody listens to is a no-op.
    pub fn publish(&self, event: &Event) {
        let kind = event.kind();
        let handlers: Vec<Handler> = {
            let registry = self.registry.borrow();
            match registry.subscribers.get(&kind) {
                Some(list) => list.iter().map(|(_, handler)| Rc::clone(handler)).collect(),
                None => return,
            }
        };

        trace!("publishing {kind:?} to {} handler(s)", handlers.len());
        for handler in handlers {
            handler(event);
        }
    }

    /// Whether at least one handler listens to `kind`.
    pub fn has_subscribers(&self, kind: EventKind) -> bool {
        self.subscriber_count(kind) > 0
    }

    /// Number of handlers currently registered for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .subscribers
            .get(&kind)
            .map_or(0, Vec::len)
    }

    fn handle(&self, kind: EventKind, id: SubscriptionId) -> Subscription {
        Subscription {
            registry: Rc::downgrade(&self.registry),
            kind,
            id,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Dropping it leaves the handler registered; call [`Subscription::unsubscribe`]
/// to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    kind: EventKind,
    id: SubscriptionId,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Removes the handler from its bus. Returns `false` if it was already gone.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(self.kind, self.id),
            None => false,
        }
    }
}
