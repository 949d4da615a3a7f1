//! Observable state store built on lenses.
//!
//! [`Store`] holds one canonical state value and an insertion-ordered list
//! of subscriber callbacks. It never constructs lenses itself: callers
//! supply a [`Lens`] describing which slice of state to touch, and the
//! store delegates all reading and writing to it. The store's own job is
//! holding the current state and running the notification pass after each
//! write.
//!
//! ## Notification protocol
//!
//! [`Store::replace`] swaps the state unconditionally (no equality check,
//! no diffing) and then invokes every currently registered listener in
//! subscription order:
//!
//! - The listener list is captured when the pass starts; a listener added
//!   during the pass first fires on the next `replace`.
//! - A listener removed during the pass and not yet reached is skipped.
//! - No lock is held while a callback runs, and each callback observes the
//!   state as of its own invocation, so a listener may re-enter `replace`:
//!   the nested pass runs to completion first, and the outer pass then
//!   continues with its own captured list and the now-current state.
//! - A panicking listener aborts the remainder of its pass and propagates
//!   to the `replace` caller. The swap has already happened at that point,
//!   and the store remains usable afterwards.
//!
//! The interior locks serialize individual state and listener-list
//! accesses; the pass guarantees above are stated for a single logical
//! thread of control. Callers running truly parallel writers must
//! serialize whole operations themselves.

mod command;
mod subscription;

pub use command::{Command, Context};
pub use subscription::{ListenerId, Subscription};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::lens::Lens;

type Callback<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct ListenerEntry<S> {
    id: ListenerId,
    callback: Callback<S>,
}

impl<S> Clone for ListenerEntry<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

pub(crate) struct Shared<S> {
    state: RwLock<S>,
    listeners: Mutex<Vec<ListenerEntry<S>>>,
}

impl<S> Shared<S> {
    // A panicking listener must not wedge the store: recover poisoned
    // guards, whose protected data is always fully written here.
    fn read_state(&self) -> RwLockReadGuard<'_, S> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, S> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<ListenerEntry<S>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn remove_listener(&self, id: ListenerId) {
        self.lock_listeners().retain(|entry| entry.id != id);
    }
}

/// Observable container for a single immutable state value.
///
/// `Store` is a cheap handle: clones share the same state cell and
/// listener list. That is how listeners and commands get a reference back
/// into the store they were registered on.
///
/// # Examples
///
/// ```
/// use refract::{prop, Store, Value};
///
/// let store = Store::new(Value::record([
///     ("count", Value::Int(0)),
///     ("name", Value::from("a")),
/// ]));
/// let count = prop("count");
///
/// let sub = store.subscribe(|state: &Value| {
///     println!("count is now {:?}", state.get("count"));
/// });
///
/// store.update(&count, |c| Value::Int(c.as_int().unwrap_or(0) + 1));
/// assert_eq!(store.read(&count), Value::Int(1));
///
/// sub.unsubscribe();
/// ```
pub struct Store<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Clone> Store<S> {
    /// Creates a store holding `initial`, with no listeners.
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(initial),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns the current state.
    ///
    /// The state is cloned out of the cell. For `Arc`-shared state types
    /// such as [`crate::Value`] the clone is cheap and preserves the
    /// storage identity of every subtree.
    #[must_use]
    pub fn get(&self) -> S {
        self.shared.read_state().clone()
    }

    /// Replaces the whole state with `next` and runs one notification
    /// pass.
    ///
    /// The swap is unconditional. See the module docs for the exact pass
    /// semantics.
    pub fn replace(&self, next: S) {
        *self.shared.write_state() = next;
        self.notify();
    }

    /// Reads the focus of `lens` out of the current state.
    ///
    /// No notification occurs.
    #[must_use]
    pub fn read<A>(&self, lens: &Lens<S, A>) -> A {
        lens.get(&self.get())
    }

    /// Replaces the focus of `lens` with `value`.
    ///
    /// Exactly one notification pass runs per call.
    pub fn set<A>(&self, lens: &Lens<S, A>, value: A) {
        self.replace(lens.set(value, &self.get()));
    }

    /// Transforms the focus of `lens` with `f`.
    ///
    /// Exactly one notification pass runs per call.
    pub fn update<A>(&self, lens: &Lens<S, A>, f: impl FnOnce(A) -> A) {
        self.replace(lens.over(&self.get(), f));
    }

    /// Registers `listener` to run after every state replacement, in
    /// subscription order.
    ///
    /// The same callback may be registered more than once; each call
    /// produces an independent registration with its own [`ListenerId`].
    /// The returned handle removes exactly this registration.
    pub fn subscribe(&self, listener: impl Fn(&S) + Send + Sync + 'static) -> Subscription<S> {
        let id = ListenerId::new();
        self.shared.lock_listeners().push(ListenerEntry {
            id,
            callback: Arc::new(listener),
        });
        Subscription::new(id, Arc::downgrade(&self.shared))
    }

    /// Runs `command` with capabilities scoped to this store.
    ///
    /// The command is handed a [`Context`] exposing lens-scoped reads and
    /// writes plus recursive dispatch, never the raw state cell or the
    /// listener list.
    pub fn dispatch<C: Command<S>>(&self, command: C) -> C::Output {
        command.run(&Context::new(self))
    }

    fn notify(&self) {
        let snapshot: Vec<ListenerEntry<S>> = self.shared.lock_listeners().clone();
        for entry in snapshot {
            let registered = self
                .shared
                .lock_listeners()
                .iter()
                .any(|current| current.id == entry.id);
            if !registered {
                continue;
            }
            // Read fresh: a re-entrant replace by an earlier listener must
            // be visible to the ones after it.
            let state = self.get();
            (entry.callback)(&state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::prop;
    use crate::value::Value;

    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_state() -> Value {
        Value::record([("count", Value::Int(0)), ("name", Value::from("a"))])
    }

    #[test]
    fn replace_swaps_state_unconditionally() {
        let store = Store::new(Value::Int(1));
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_in = Arc::clone(&fired);
        let _sub = store.subscribe(move |_: &Value| {
            fired_in.fetch_add(1, Ordering::SeqCst);
        });

        // Same value still notifies: no equality check, no diffing.
        store.replace(Value::Int(1));
        store.replace(Value::Int(1));
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert_eq!(store.get(), Value::Int(1));
    }

    #[test]
    fn read_does_not_notify() {
        let store = Store::new(counter_state());
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_in = Arc::clone(&fired);
        let _sub = store.subscribe(move |_: &Value| {
            fired_in.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(store.read(&prop("count")), Value::Int(0));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn set_and_update_notify_exactly_once_each() {
        let store = Store::new(counter_state());
        let count = prop("count");
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_in = Arc::clone(&fired);
        let _sub = store.subscribe(move |_: &Value| {
            fired_in.fetch_add(1, Ordering::SeqCst);
        });

        store.set(&count, Value::Int(5));
        assert_eq!(store.read(&count), Value::Int(5));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        store.update(&count, |c| Value::Int(c.as_int().unwrap_or(0) + 1));
        assert_eq!(store.read(&count), Value::Int(6));
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn store_handles_share_one_state_cell() {
        let store = Store::new(counter_state());
        let alias = store.clone();

        store.set(&prop("count"), Value::Int(3));
        assert_eq!(alias.read(&prop("count")), Value::Int(3));
    }
}
