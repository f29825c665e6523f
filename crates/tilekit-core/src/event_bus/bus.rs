//! Event Bus implementation.
//!
//! Each document owns one `EventBus`; handlers run synchronously on the
//! publishing thread.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Weak};
use uuid::Uuid;

use super::events::{DocumentEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &DocumentEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(DocumentEvent) + Send + Sync>;
type HandlerTable = RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Keep a copy of published events for [`EventBus::history`].
    pub enable_history: bool,
    /// Oldest events are dropped beyond this many.
    pub max_history_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            enable_history: false,
            max_history_size: 256,
        }
    }
}

/// Subscription that unsubscribes when dropped.
///
/// Holds only a weak reference to the bus, so it may outlive the document.
/// Must not be dropped from inside a handler of the same bus.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: SubscriptionId,
    handlers: Weak<HandlerTable>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Unsubscribes now; returns false if already gone.
    pub fn cancel(&self) -> bool {
        match self.handlers.upgrade() {
            Some(handlers) => remove_handler(&handlers, self.id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Subscription").field(&self.id).finish()
    }
}

fn remove_handler(handlers: &HandlerTable, id: SubscriptionId) -> bool {
    let removed = handlers.write().remove(&id).is_some();
    if removed {
        tracing::debug!("Subscription {} removed", id);
    }
    removed
}

/// Change-notification bus of one document
///
/// Handlers must not subscribe or unsubscribe from inside a callback; the
/// handler table is read-locked while events are dispatched.
pub struct EventBus {
    handlers: Arc<HandlerTable>,
    history: RwLock<VecDeque<DocumentEvent>>,
    config: EventBusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            history: RwLock::new(VecDeque::new()),
            config,
        }
    }

    /// Publish an event to all matching subscribers
    ///
    /// Returns the number of handlers that received the event.
    pub fn publish(&self, event: DocumentEvent) -> usize {
        if self.config.enable_history {
            let mut history = self.history.write();
            history.push_back(event.clone());
            while history.len() > self.config.max_history_size {
                history.pop_front();
            }
        }

        tracing::trace!("Publishing {}", event.description());

        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(event.clone());
                delivered += 1;
            }
        }
        delivered
    }

    /// Subscribe with a synchronous handler that stays registered until
    /// [`unsubscribe`](Self::unsubscribe) is called.
    ///
    /// The handler runs on the publishing thread, inside the edit that
    /// triggered it, so it should only record what it needs.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(DocumentEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Like [`subscribe`](Self::subscribe), but the handler is removed when
    /// the returned guard is dropped.
    pub fn subscribe_scoped<F>(&self, filter: EventFilter, handler: F) -> Subscription
    where
        F: Fn(DocumentEvent) + Send + Sync + 'static,
    {
        Subscription {
            id: self.subscribe(filter, handler),
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        remove_handler(&self.handlers, id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Retained events, oldest first; empty unless history is enabled.
    pub fn history(&self) -> Vec<DocumentEvent> {
        self.history.read().iter().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
