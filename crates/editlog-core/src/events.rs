//! Input event delivery for editing surfaces.
//!
//! A surface never listens to process-wide input. The host hands it an
//! [`EventSource`] and the surface holds a [`Subscription`] that
//! unsubscribes when dropped, so disposing a surface always releases its
//! listener.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

/// Keys an input surface reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    A,
    C,
    V,
    X,
    Y,
    Z,
}

/// Modifier state held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
    };
}

/// One input event delivered to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Text typed by the user.
    Text(String),
    Key { key: Key, modifiers: Modifiers },
    FocusGained,
    FocusLost,
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        InputEvent::Key {
            key,
            modifiers: Modifiers::CTRL,
        }
    }
}

/// Identifies one listener registered with an [`EventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// A host-provided stream of input events.
///
/// All methods take `&self`; implementations are single-threaded and use
/// interior mutability.
pub trait EventSource {
    /// Registers a new listener.
    fn subscribe(&self) -> ListenerId;

    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);

    /// Takes every event queued for `id` since the last drain.
    fn drain(&self, id: ListenerId) -> Vec<InputEvent>;
}

/// A live registration that unsubscribes on drop.
pub struct Subscription {
    source: Rc<dyn EventSource>,
    id: ListenerId,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Subscription {
    /// Subscribes to `source`.
    pub fn new(source: Rc<dyn EventSource>) -> Self {
        let id = source.subscribe();
        tracing::trace!(?id, "subscribed to event source");
        Self { source, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Events queued for this subscription.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.source.drain(self.id)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::trace!(id = ?self.id, "unsubscribing from event source");
        self.source.unsubscribe(self.id);
    }
}

#[derive(Debug, Default)]
struct QueueState {
    next_id: u64,
    listeners: BTreeMap<ListenerId, VecDeque<InputEvent>>,
}

/// In-process event source that fans each pushed event out to every
/// subscribed listener.
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    state: Rc<RefCell<QueueState>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `event` for all current listeners. Events pushed while
    /// nobody listens are dropped.
    pub fn push(&self, event: InputEvent) {
        let mut state = self.state.borrow_mut();
        for queue in state.listeners.values_mut() {
            queue.push_back(event.clone());
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl EventSource for EventQueue {
    fn subscribe(&self) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.insert(id, VecDeque::new());
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state.borrow_mut().listeners.remove(&id);
    }

    fn drain(&self, id: ListenerId) -> Vec<InputEvent> {
        self.state
            .borrow_mut()
            .listeners
            .get_mut(&id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_fans_out() {
        let queue = EventQueue::new();
        let a = queue.subscribe();
        let b = queue.subscribe();
        queue.push(InputEvent::Text("x".to_string()));

        assert_eq!(queue.drain(a), vec![InputEvent::Text("x".to_string())]);
        assert_eq!(queue.drain(b).len(), 1);
        assert!(queue.drain(a).is_empty());
    }

    #[test]
    fn test_events_without_listeners_are_dropped() {
        let queue = EventQueue::new();
        queue.push(InputEvent::FocusGained);
        let id = queue.subscribe();
        assert!(queue.drain(id).is_empty());
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_ignored() {
        let queue = EventQueue::new();
        let id = queue.subscribe();
        queue.unsubscribe(id);
        queue.unsubscribe(id);
        assert_eq!(queue.listener_count(), 0);
        assert!(queue.drain(id).is_empty());
    }

    #[test]
    fn test_subscription_drop_unsubscribes() {
        let queue = EventQueue::new();
        let source: Rc<dyn EventSource> = Rc::new(queue.clone());
        {
            let sub = Subscription::new(Rc::clone(&source));
            assert_eq!(queue.listener_count(), 1);
            queue.push(InputEvent::key(Key::Home));
            assert_eq!(sub.drain(), vec![InputEvent::key(Key::Home)]);
        }
        assert_eq!(queue.listener_count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let queue = EventQueue::new();
        let a = queue.subscribe();
        queue.unsubscribe(a);
        let b = queue.subscribe();
        assert_ne!(a, b);
    }
}
