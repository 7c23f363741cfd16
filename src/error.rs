//! Error types for encoding and decoding.
//!
//! Every failure in this crate is one of a small set of typed conditions:
//!
//! - **Malformed tokens**: a flat-stream token or tree attribute fails to
//!   parse as the expected scalar or count
//! - **Structure mismatches**: a decoded container disagrees with its
//!   recorded size or expected child layout
//! - **Precondition violations**: caller contract breaches (absent owning
//!   reference, view length disagreement, text containing the delimiter)
//! - **Backing-file failures**: the XML document backend cannot parse a file
//! - **I/O errors**: reading or writing files and writers
//!
//! Decode errors always propagate to the top-level caller; no partial result
//! is valid once an error is raised, and nothing retries.
//!
//! ## Examples
//!
//! ```rust
//! use biform::{from_flat_str, Error, Shape, ScalarKind};
//!
//! let shape = Shape::scalar(ScalarKind::Int);
//! let result = from_flat_str("not-a-number ", &shape);
//! assert!(matches!(result, Err(Error::MalformedToken { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// All conditions under which encoding or decoding can fail.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A token (or attribute value) did not parse as the expected scalar type
    #[error("malformed token at offset {offset}: expected {expected}, found {found:?}")]
    MalformedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    /// Decoded structure disagrees with the declared shape or recorded size
    #[error("structure mismatch: expected {expected}, found {found}")]
    StructureMismatch { expected: String, found: String },

    /// Input ended while more tokens or child nodes were required
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEnd { expected: String },

    /// The document backend could not load or parse a backing file
    #[error("backing file failure: {0}")]
    BackingFile(String),

    /// Caller contract violation; not a recoverable runtime state
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Recursion exceeded the configured depth budget
    #[error("nesting depth exceeds the configured limit of {0}")]
    DepthLimit(usize),

    /// Custom error raised through the serde bridge
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a malformed-token error for text that failed to parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use biform::Error;
    ///
    /// let err = Error::malformed_token("integer", "abc", 4);
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn malformed_token(expected: &'static str, found: &str, offset: usize) -> Self {
        Error::MalformedToken {
            expected,
            found: found.to_string(),
            offset,
        }
    }

    /// Creates a structure-mismatch error for decoded trees or streams whose
    /// layout disagrees with the declaration.
    pub fn structure_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::StructureMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an unexpected-end error naming what was still required.
    pub fn unexpected_end(expected: impl Into<String>) -> Self {
        Error::UnexpectedEnd {
            expected: expected.into(),
        }
    }

    /// Creates a backing-file error for document load/parse failures.
    pub fn backing_file(msg: impl Into<String>) -> Self {
        Error::BackingFile(msg.into())
    }

    /// Creates a precondition-violation error for caller contract breaches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use biform::Error;
    ///
    /// let err = Error::precondition("absent owning reference");
    /// assert!(err.to_string().contains("precondition"));
    /// ```
    pub fn precondition(msg: impl Into<String>) -> Self {
        Error::Precondition(msg.into())
    }

    /// Creates an I/O error from a display message.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
