//! In-process publish/subscribe used to notify plugins and UI code of page
//! lifecycle changes.
//!
//! Subscribers for a kind are invoked most-recently-registered first; callers
//! may rely on that order. A panicking subscriber is isolated and logged so
//! the remaining subscribers still run.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A page lifecycle event with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NewFile { name: String, content: String },
    PageWasDeleted { name: String },
    ActivePageChanged { name: String },
}

/// Payload-free discriminant of [`Event`], used as the subscription topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NewFile,
    PageWasDeleted,
    ActivePageChanged,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::NewFile { .. } => EventKind::NewFile,
            Event::PageWasDeleted { .. } => EventKind::PageWasDeleted,
            Event::ActivePageChanged { .. } => EventKind::ActivePageChanged,
        }
    }

    /// The page name carried by any event variant.
    pub fn page_name(&self) -> &str {
        match self {
            Event::NewFile { name, .. }
            | Event::PageWasDeleted { name }
            | Event::ActivePageChanged { name } => name,
        }
    }
}

type Callback = Box<dyn FnMut(&Event)>;

/// Opaque handle returned by [`EventBus::subscribe`], usable for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    kind: EventKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<EventKind, Vec<(u64, Callback)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, callback: Callback) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.entry(kind).or_default().push((id, callback));
        Subscription { kind, id }
    }

    /// Remove the callback behind `handle`. With `remove_all_for_kind`, every
    /// subscriber for the handle's kind is dropped regardless of the handle.
    pub fn unsubscribe(&mut self, handle: Subscription, remove_all_for_kind: bool) {
        if remove_all_for_kind {
            self.subscribers.remove(&handle.kind);
            return;
        }
        if let Some(list) = self.subscribers.get_mut(&handle.kind) {
            list.retain(|(id, _)| *id != handle.id);
        }
    }

    /// Deliver `event` to every subscriber of its kind, newest registration
    /// first. No return values are collected.
    pub fn publish(&mut self, event: &Event) {
        let Some(list) = self.subscribers.get_mut(&event.kind()) else {
            return;
        };
        for (_, callback) in list.iter_mut().rev() {
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                tracing::warn!(kind = ?event.kind(), "event subscriber panicked; continuing delivery");
            }
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map(Vec::len).unwrap_or(0)
    }
}
