//! Error types for refract.
//!
//! Lens and store operations are infallible by construction: getters and
//! setters are total, and a panic raised inside a user-supplied closure
//! propagates to the caller unmodified. The only fallible surface is
//! parsing dotted path strings into lenses, and those failures are
//! strongly typed using thiserror.

use thiserror::Error;

/// Errors produced while parsing a dotted path string.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The path string was empty.
    #[error("Path cannot be empty")]
    Empty,

    /// A segment between dots was empty (for example `"a..b"`).
    #[error("Path segment {index} is empty")]
    EmptySegment {
        /// Zero-based position of the offending segment.
        index: usize,
    },
}
