//! Command dispatch: plain-value commands run with store-scoped
//! capabilities.

use crate::lens::Lens;

use super::Store;

/// A dispatchable unit of work against a [`Store`].
///
/// Commands are plain values, registered nowhere. Arguments are captured
/// at construction, typically by a function returning a closure, and the
/// store then runs the command with a [`Context`] exposing lens-scoped
/// reads, writes, and recursive dispatch, never the raw state.
///
/// Any `FnOnce(&Context<'_, S>) -> R` is a command.
///
/// # Examples
///
/// ```
/// use refract::{prop, Command, Context, Store, Value};
///
/// fn add(n: i64) -> impl Command<Value, Output = ()> {
///     move |ctx: &Context<'_, Value>| {
///         ctx.update(&prop("count"), |c| {
///             Value::Int(c.as_int().unwrap_or(0) + n)
///         });
///     }
/// }
///
/// let store = Store::new(Value::record([("count", Value::Int(0))]));
/// store.dispatch(add(5));
/// assert_eq!(store.read(&prop("count")), Value::Int(5));
/// ```
pub trait Command<S: Clone> {
    /// Value returned to the `dispatch` caller.
    type Output;

    /// Runs the command against the store behind `ctx`.
    fn run(self, ctx: &Context<'_, S>) -> Self::Output;
}

impl<S, F, R> Command<S> for F
where
    S: Clone,
    F: FnOnce(&Context<'_, S>) -> R,
{
    type Output = R;

    fn run(self, ctx: &Context<'_, S>) -> R {
        self(ctx)
    }
}

/// Capabilities handed to a running command.
///
/// A context exposes exactly what a command may do: read and update state
/// through lenses, and dispatch further commands. The store's state cell
/// and listener list stay sealed off.
pub struct Context<'a, S> {
    store: &'a Store<S>,
}

impl<'a, S: Clone> Context<'a, S> {
    pub(crate) const fn new(store: &'a Store<S>) -> Self {
        Self { store }
    }

    /// Reads the focus of `lens` out of the current state.
    #[must_use]
    pub fn read<A>(&self, lens: &Lens<S, A>) -> A {
        self.store.read(lens)
    }

    /// Replaces the focus of `lens` with `value`, notifying subscribers
    /// once.
    pub fn set<A>(&self, lens: &Lens<S, A>, value: A) {
        self.store.set(lens, value);
    }

    /// Transforms the focus of `lens` with `f`, notifying subscribers
    /// once.
    pub fn update<A>(&self, lens: &Lens<S, A>, f: impl FnOnce(A) -> A) {
        self.store.update(lens, f);
    }

    /// Dispatches another command with these same capabilities.
    pub fn dispatch<C: Command<S>>(&self, command: C) -> C::Output {
        self.store.dispatch(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::prop;
    use crate::value::Value;

    fn counter_store() -> Store<Value> {
        Store::new(Value::record([("count", Value::Int(0))]))
    }

    fn add(n: i64) -> impl Command<Value, Output = ()> {
        move |ctx: &Context<'_, Value>| {
            ctx.update(&prop("count"), |c| {
                Value::Int(c.as_int().unwrap_or(0) + n)
            });
        }
    }

    #[test]
    fn commands_read_and_write_through_lenses() {
        let store = counter_store();

        store.dispatch(add(5));
        assert_eq!(store.read(&prop("count")), Value::Int(5));

        let seen = store.dispatch(|ctx: &Context<'_, Value>| ctx.read(&prop("count")));
        assert_eq!(seen, Value::Int(5));
    }

    #[test]
    fn commands_dispatch_recursively() {
        let store = counter_store();

        store.dispatch(|ctx: &Context<'_, Value>| {
            ctx.dispatch(add(2));
            ctx.dispatch(add(3));
        });

        assert_eq!(store.read(&prop("count")), Value::Int(5));
    }

    #[test]
    fn dispatch_returns_the_command_output() {
        let store = counter_store();

        let doubled = store.dispatch(|ctx: &Context<'_, Value>| {
            ctx.dispatch(add(4));
            ctx.read(&prop("count")).as_int().unwrap_or(0) * 2
        });

        assert_eq!(doubled, 8);
    }
}
