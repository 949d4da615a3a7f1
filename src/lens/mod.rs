//! Lens algebra: composable getter/setter pairs over immutable state.
//!
//! A [`Lens`] focuses one part of a larger value. Its getter reads the
//! focus out of the whole; its setter builds a new whole with the focus
//! replaced, leaving everything outside the focus structurally shared with
//! the input. A lens is a stateless, reusable value: cloning one is cheap
//! and many stores or call sites may hold the same lens at once.
//!
//! ## Lens laws
//!
//! Every lens this module produces upholds three laws:
//!
//! - **GetPut**: writing back the current focus changes nothing.
//! - **PutGet**: after writing `a`, reading returns `a`.
//! - **PutPut**: a later write fully supersedes an earlier one.
//!
//! Law-abiding lenses stay law-abiding under composition, both pairwise
//! ([`Lens::then`]) and across homogeneous chains ([`compose`]).

mod composite;
mod path;

pub use composite::compose;
pub use path::{at, path, prop};

use std::sync::Arc;

type Getter<S, A> = dyn Fn(&S) -> A + Send + Sync;
type Setter<S, A> = dyn Fn(A, &S) -> S + Send + Sync;

/// A composable getter/setter pair focusing a sub-part of a larger value.
///
/// # Examples
///
/// ```
/// use refract::Lens;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let x = Lens::new(
///     |p: &Point| p.x,
///     |x, p: &Point| Point { x, ..p.clone() },
/// );
///
/// let p = Point { x: 1, y: 2 };
/// assert_eq!(x.get(&p), 1);
/// assert_eq!(x.set(5, &p), Point { x: 5, y: 2 });
/// assert_eq!(x.over(&p, |v| v + 10), Point { x: 11, y: 2 });
/// ```
pub struct Lens<S, A> {
    getter: Arc<Getter<S, A>>,
    setter: Arc<Setter<S, A>>,
}

impl<S, A> Clone for Lens<S, A> {
    fn clone(&self) -> Self {
        Self {
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<S, A> std::fmt::Debug for Lens<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lens").finish_non_exhaustive()
    }
}

impl<S, A> Lens<S, A> {
    /// Wraps a getter and a setter verbatim.
    ///
    /// No validation is performed; the caller is responsible for the lens
    /// laws holding. Every constructor in this crate upholds them.
    pub fn new(
        getter: impl Fn(&S) -> A + Send + Sync + 'static,
        setter: impl Fn(A, &S) -> S + Send + Sync + 'static,
    ) -> Self {
        Self {
            getter: Arc::new(getter),
            setter: Arc::new(setter),
        }
    }

    /// Reads the focus out of `source`.
    #[must_use]
    pub fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }

    /// Returns a new whole with the focus replaced by `value`.
    ///
    /// `source` is never mutated; parts outside the focus are structurally
    /// shared with it.
    #[must_use]
    pub fn set(&self, value: A, source: &S) -> S {
        (self.setter)(value, source)
    }

    /// Reads the focus, applies `f`, and writes the result back.
    #[must_use]
    pub fn over(&self, source: &S, f: impl FnOnce(A) -> A) -> S {
        self.set(f(self.get(source)), source)
    }
}

impl<S: 'static, A: 'static> Lens<S, A> {
    /// Composes this lens with one focusing inside its focus.
    ///
    /// Reading descends through both getters. Writing reads the outer
    /// focus, patches it with the inner setter, and re-sets the patched
    /// focus into the whole, so each level only touches its own slice.
    ///
    /// This is the statically typed face of composition; homogeneous
    /// chains of arbitrary length go through [`compose`].
    #[must_use]
    pub fn then<B: 'static>(&self, inner: &Lens<A, B>) -> Lens<S, B> {
        let outer_get = Arc::clone(&self.getter);
        let inner_get = Arc::clone(&inner.getter);
        let outer = self.clone();
        let inner = inner.clone();
        Lens::new(
            move |source: &S| inner_get(&outer_get(source)),
            move |value: B, source: &S| {
                let focus = outer.get(source);
                outer.set(inner.set(value, &focus), source)
            },
        )
    }
}

impl<S: Clone + 'static> Lens<S, S> {
    /// The identity lens.
    ///
    /// Reads the whole state; its write ignores the new value and returns
    /// the state unchanged. The degenerate write means PutGet does not
    /// apply to the identity lens; it exists as the zero-lens composition
    /// case, where no correct alternative exists.
    #[must_use]
    pub fn identity() -> Self {
        Lens::new(S::clone, |_, source: &S| source.clone())
    }
}
