//! Error type shared by every view, iterator and builder.
//!
//! All failures are local and synchronous. Callers that want to avoid them use
//! the non-failing variants (`get` instead of `at`, `to_non_empty` instead of
//! `to_non_empty_or_err`).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A size or capacity computation does not fit in `usize`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index {index} out of bounds for size {size}")]
    OutOfBounds { index: usize, size: usize },

    /// A non-empty view was requested from an empty source.
    #[error("collection is empty")]
    EmptyCollection,

    /// An iterator was advanced past its end.
    #[error("no such element")]
    NoSuchElement,
}

pub type Result<T, E = ViewError> = core::result::Result<T, E>;
