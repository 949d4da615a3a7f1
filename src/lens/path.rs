//! Lenses over dynamic [`Value`] state: record fields, list elements, and
//! dotted paths.

use crate::error::PathError;
use crate::value::Value;

use super::{compose, Lens};

/// Builds a lens focusing the named field of a record-shaped state.
///
/// Reading a field that is absent, or reading through a non-record, yields
/// [`Value::Null`]. Writing produces a new record that shares every other
/// field with the input; writing into a non-record replaces it with a
/// record holding just this field. This is the base case deeper lenses are
/// built from via [`compose`].
///
/// # Examples
///
/// ```
/// use refract::{prop, Value};
///
/// let count = prop("count");
/// let state = Value::record([
///     ("count", Value::Int(0)),
///     ("name", Value::from("a")),
/// ]);
///
/// assert_eq!(count.get(&state), Value::Int(0));
///
/// let next = count.set(Value::Int(2), &state);
/// assert_eq!(next.get("count"), Some(&Value::Int(2)));
/// assert_eq!(next.get("name"), Some(&Value::from("a")));
/// ```
#[must_use]
pub fn prop(name: impl Into<String>) -> Lens<Value, Value> {
    let name = name.into();
    let field = name.clone();
    Lens::new(
        move |state: &Value| state.get(&field).cloned().unwrap_or(Value::Null),
        move |value: Value, state: &Value| state.with_field(name.clone(), value),
    )
}

/// Builds a lens focusing the element at `index` of a list-shaped state.
///
/// Reading out of range, or through a non-list, yields [`Value::Null`].
/// Writing in range replaces the element and shares the rest; writing out
/// of range pads the list with [`Value::Null`] up to `index`, so a written
/// value always reads back (PutGet). GetPut holds for in-range indices
/// only: reading a missing element yields `Null`, and writing that `Null`
/// back materializes it.
#[must_use]
pub fn at(index: usize) -> Lens<Value, Value> {
    Lens::new(
        move |state: &Value| state.index(index).cloned().unwrap_or(Value::Null),
        move |value: Value, state: &Value| state.with_index(index, value),
    )
}

/// Parses a dotted path into a composed lens over [`Value`] state.
///
/// Each `.`-separated segment focuses one level deeper: numeric segments
/// index lists ([`at`]), everything else names record fields ([`prop`]).
///
/// # Errors
///
/// Returns [`PathError::Empty`] for an empty string and
/// [`PathError::EmptySegment`] when a segment between dots is empty.
///
/// # Examples
///
/// ```
/// use refract::{path, Value};
///
/// let city = path("user.address.city")?;
/// let state = Value::record([(
///     "user",
///     Value::record([(
///         "address",
///         Value::record([("city", Value::from("Lyon"))]),
///     )]),
/// )]);
///
/// assert_eq!(city.get(&state), Value::from("Lyon"));
/// # Ok::<(), refract::PathError>(())
/// ```
pub fn path(input: &str) -> Result<Lens<Value, Value>, PathError> {
    if input.is_empty() {
        return Err(PathError::Empty);
    }

    let mut lenses = Vec::new();
    for (index, segment) in input.split('.').enumerate() {
        if segment.is_empty() {
            return Err(PathError::EmptySegment { index });
        }
        match segment.parse::<usize>() {
            Ok(list_index) => lenses.push(at(list_index)),
            Err(_) => lenses.push(prop(segment)),
        }
    }
    Ok(compose(lenses))
}
