//! Minimal publish/subscribe primitive.
//!
//! Named event registration (persistent or one-shot) with synchronous
//! emission to a snapshot of the listeners registered at the time
//! [`EventChannel::emit`] was called. The snapshot is a deliberate
//! re-entrancy guard: a listener may register or remove listeners for the
//! same event without corrupting the in-progress emission; additions take
//! effect on the next emit.
//!
//! Channels are single-threaded by design (the widget runs on one UI
//! thread); the handle is cheaply cloneable and every clone shares the same
//! listener table.
//!
//! A listener must not recursively emit the event it is currently handling:
//! its own callback slot would be re-entered while borrowed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Identifier handed out by [`EventChannel::on`] and [`EventChannel::once`],
/// used to remove a listener with [`EventChannel::off`].
pub type ListenerId = u64;

type Callback<P> = Rc<RefCell<dyn FnMut(&P)>>;

struct Entry<P> {
    id: ListenerId,
    callback: Callback<P>,
    once: bool,
}

struct Inner<P> {
    next_id: ListenerId,
    events: HashMap<&'static str, Vec<Entry<P>>>,
}

/// Per-instance mapping from event name to an ordered listener list.
pub struct EventChannel<P> {
    inner: Rc<RefCell<Inner<P>>>,
}

impl<P> Clone for EventChannel<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P> Default for EventChannel<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventChannel<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_map()
            .entries(inner.events.iter().map(|(name, entries)| (name, entries.len())))
            .finish()
    }
}

impl<P> EventChannel<P> {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                events: HashMap::new(),
            })),
        }
    }

    /// Append a persistent listener for `name`.
    pub fn on(&self, name: &'static str, callback: impl FnMut(&P) + 'static) -> ListenerId {
        self.register(name, callback, false)
    }

    /// Append a single-shot listener for `name`; it is removed after its
    /// first invocation.
    pub fn once(&self, name: &'static str, callback: impl FnMut(&P) + 'static) -> ListenerId {
        self.register(name, callback, true)
    }

    /// Remove a listener. Returns whether it was still registered.
    pub fn off(&self, name: &'static str, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(entries) = inner.events.get_mut(name) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    /// Number of listeners currently registered for `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .borrow()
            .events
            .get(name)
            .map_or(0, Vec::len)
    }

    /// Invoke, in registration order, every listener registered for `name`
    /// at the time of the call. Emitting an unregistered name is a no-op.
    pub fn emit(&self, name: &'static str, payload: &P) {
        let snapshot: Vec<(ListenerId, Callback<P>, bool)> = {
            let inner = self.inner.borrow();
            match inner.events.get(name) {
                Some(entries) => entries
                    .iter()
                    .map(|entry| (entry.id, Rc::clone(&entry.callback), entry.once))
                    .collect(),
                None => return,
            }
        };

        for (id, callback, once) in snapshot {
            (callback.borrow_mut())(payload);
            if once {
                let mut inner = self.inner.borrow_mut();
                if let Some(entries) = inner.events.get_mut(name) {
                    entries.retain(|entry| entry.id != id);
                }
            }
        }
    }

    fn register(
        &self,
        name: &'static str,
        callback: impl FnMut(&P) + 'static,
        once: bool,
    ) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.events.entry(name).or_default().push(Entry {
            id,
            callback: Rc::new(RefCell::new(callback)),
            once,
        });
        id
    }
}
