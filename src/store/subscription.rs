//! Listener registration handles.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;

use uuid::Uuid;

use super::Shared;

/// Unique identifier for one listener registration.
///
/// Registering the same callback twice produces two registrations with two
/// distinct ids; removing one never touches the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Mints a new random listener id.
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for one listener registration on a [`Store`](super::Store).
///
/// Returned by [`Store::subscribe`](super::Store::subscribe). The first
/// `unsubscribe` call removes exactly this registration; every later call
/// is a no-op. Dropping the handle does **not** unsubscribe: a listener
/// stays registered until its handle is used, so hold on to it.
#[must_use = "dropping the handle keeps the listener registered; call unsubscribe() to remove it"]
#[derive(Debug)]
pub struct Subscription<S> {
    id: ListenerId,
    store: Weak<Shared<S>>,
    removed: AtomicBool,
}

impl<S> Subscription<S> {
    pub(crate) fn new(id: ListenerId, store: Weak<Shared<S>>) -> Self {
        Self {
            id,
            store,
            removed: AtomicBool::new(false),
        }
    }

    /// The registration id backing this handle.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Removes this registration from the store.
    ///
    /// Idempotent: only the first call removes anything. Safe to call after
    /// the store itself has been dropped.
    pub fn unsubscribe(&self) {
        if self.removed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(shared) = self.store.upgrade() {
            shared.remove_listener(self.id);
        }
    }
}
