//! Error types for cbor-frame core.
//!
//! Encoding is total; the only fallible operation is turning a symbolic
//! [`Size`](crate::Size) into a number.

use thiserror::Error;

/// Errors that can occur while evaluating a size expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    /// The expression still depends on a magnitude that was never supplied.
    #[error("size expression is unresolved: it still depends on an input magnitude")]
    Unresolved,
}

/// Result type for size evaluation.
pub type Result<T> = std::result::Result<T, SizeError>;
