//! N-ary composition over homogeneous lens chains.

use std::sync::Arc;

use super::Lens;

/// Combines an outer-to-inner chain of lenses into a single lens from the
/// whole state to the innermost focus.
///
/// - Zero lenses yields [`Lens::identity`].
/// - One lens is returned unchanged, with no wrapping.
/// - Longer chains read by folding the getters left to right through the
///   chain, and write by descending to the innermost current sub-state,
///   replacing it, then re-setting each ancestor's own slice on the way
///   back out. Each setter patches the local sub-state it was handed at
///   its level, so descent and ascent mirror each other exactly, one
///   level per lens.
///
/// Composition is lazy: this only builds closures. A composite of
/// law-abiding lenses satisfies the lens laws itself.
///
/// Heterogeneously typed chains compose pairwise with [`Lens::then`].
///
/// # Examples
///
/// ```
/// use refract::{compose, prop, Value};
///
/// let deep = compose(vec![prop("a"), prop("b"), prop("c")]);
/// let state = Value::record([(
///     "a",
///     Value::record([("b", Value::record([("c", Value::Int(1))]))]),
/// )]);
///
/// assert_eq!(deep.get(&state), Value::Int(1));
/// assert_eq!(deep.get(&deep.set(Value::Int(9), &state)), Value::Int(9));
/// ```
#[must_use]
pub fn compose<S: Clone + 'static>(lenses: Vec<Lens<S, S>>) -> Lens<S, S> {
    if lenses.len() <= 1 {
        return lenses.into_iter().next().unwrap_or_else(Lens::identity);
    }

    let chain = Arc::new(lenses);
    let get_chain = Arc::clone(&chain);
    Lens::new(
        move |state: &S| {
            get_chain
                .iter()
                .fold(state.clone(), |current, lens| lens.get(&current))
        },
        move |value: S, state: &S| traverse(&chain, 0, &value, state),
    )
}

// Descend via getters to the innermost sub-state, then rebuild outward:
// each lens re-sets its own child slice into the state it was handed.
fn traverse<S: Clone>(chain: &[Lens<S, S>], index: usize, value: &S, state: &S) -> S {
    match chain.get(index) {
        None => value.clone(),
        Some(lens) => {
            let child = lens.get(state);
            lens.set(traverse(chain, index + 1, value, &child), state)
        }
    }
}
