//! # Refract - Lenses and an observable state store
//!
//! Refract provides two composable abstractions over immutable application
//! state: a lens algebra for reading and non-destructively updating nested
//! values, and an observable store built on top of it with synchronous,
//! subscription-based change notification and command dispatch.
//!
//! ## Core Concepts
//!
//! - **Lens**: a getter/setter pair focusing a sub-part of a larger value
//! - **Focus**: the sub-value a lens reads and writes
//! - **Store**: the container holding current state and subscriber callbacks
//! - **Command**: a dispatchable value given lens-scoped store capabilities
//!
//! ## Usage
//!
//! ```rust
//! use refract::{compose, prop, Store, Value};
//!
//! let store = Store::new(Value::record([
//!     ("count", Value::Int(0)),
//!     ("name", Value::from("a")),
//! ]));
//!
//! // Lenses describe which slice of state to touch.
//! let count = prop("count");
//! store.update(&count, |c| Value::Int(c.as_int().unwrap_or(0) + 1));
//! assert_eq!(store.read(&count), Value::Int(1));
//!
//! // Deeper lenses are built by composing shallower ones.
//! let deep = compose(vec![prop("a"), prop("b")]);
//! let nested = Value::record([("a", Value::record([("b", Value::Int(7))]))]);
//! assert_eq!(deep.get(&nested), Value::Int(7));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod lens;
pub mod store;
pub mod value;

// Re-export primary types at crate root for convenience
pub use error::PathError;
pub use lens::{at, compose, path, prop, Lens};
pub use store::{Command, Context, ListenerId, Store, Subscription};
pub use value::{Fields, Value};
