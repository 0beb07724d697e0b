//! Message bus contract
//!
//! Publish/subscribe between windows, scoped to a `(window id, topic)` pair.
//! Listener identity is the handle itself: unsubscribing removes only the
//! registration made with the same [`Listener`] handle.
//!
//! ```
//! use reflectdoc_core::bus::{listener, LocalBus, Message, MessageBus};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let bus = LocalBus::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = seen.clone();
//! let handle = listener(move |_message: &Message| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! bus.subscribe("main", "ready", handle.clone());
//! bus.send("main", "ready", Message::from("hello"));
//! bus.unsubscribe("main", "ready", &handle);
//! bus.send("main", "ready", Message::from("again"));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Payload carried by the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Object(serde_json::Value),
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<serde_json::Value> for Message {
    fn from(value: serde_json::Value) -> Self {
        Message::Object(value)
    }
}

/// Shared callback handle; clones of a handle are the same listener
pub type Listener = Arc<dyn Fn(&Message) + Send + Sync>;

/// Wrap a closure as a listener handle
pub fn listener<F>(callback: F) -> Listener
where
    F: Fn(&Message) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Publish/subscribe between windows
pub trait MessageBus {
    /// Deliver `message` to every listener subscribed to `(window_id, topic)`
    fn send(&self, window_id: &str, topic: &str, message: Message);

    /// Register `listener` for `(window_id, topic)`
    fn subscribe(&self, window_id: &str, topic: &str, listener: Listener);

    /// Remove the registration made with this exact handle
    fn unsubscribe(&self, window_id: &str, topic: &str, listener: &Listener);
}

type Subscriptions = HashMap<(String, String), Vec<Listener>>;

/// In-process bus with synchronous delivery
#[derive(Default)]
pub struct LocalBus {
    subscriptions: Mutex<Subscriptions>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners registered for `(window_id, topic)`
    pub fn listener_count(&self, window_id: &str, topic: &str) -> usize {
        self.lock()
            .get(&(window_id.to_string(), topic.to_string()))
            .map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, Subscriptions> {
        self.subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MessageBus for LocalBus {
    fn send(&self, window_id: &str, topic: &str, message: Message) {
        // listeners run outside the lock so they may (un)subscribe
        let listeners: Vec<Listener> = self
            .lock()
            .get(&(window_id.to_string(), topic.to_string()))
            .cloned()
            .unwrap_or_default();

        tracing::trace!(window_id, topic, listeners = listeners.len(), "Delivering message");
        for listener in listeners {
            listener(&message);
        }
    }

    fn subscribe(&self, window_id: &str, topic: &str, listener: Listener) {
        self.lock()
            .entry((window_id.to_string(), topic.to_string()))
            .or_default()
            .push(listener);
    }

    fn unsubscribe(&self, window_id: &str, topic: &str, listener: &Listener) {
        let key = (window_id.to_string(), topic.to_string());
        let mut subscriptions = self.lock();
        if let Some(listeners) = subscriptions.get_mut(&key) {
            if let Some(index) = listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
                listeners.remove(index);
            }
            if listeners.is_empty() {
                subscriptions.remove(&key);
            }
        }
    }
}
