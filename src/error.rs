//! Error types for OGSON encoding and decoding.
//!
//! The default decoder is lenient and never returns an error. The variants below are
//! produced by strict decoding (see [`DecodeOptions::strict`](crate::DecodeOptions::strict))
//! and by the serde bridge.
//!
//! ## Error Categories
//!
//! - **Unterminated constructs**: an opener with no matching closer
//! - **Nesting errors**: a container nested deeper than the decoder supports
//! - **Dangling keys**: an object key with no value after it
//! - **Type mismatches**: converting a [`Value`](crate::Value) into an incompatible Rust type
//! - **I/O errors**: reader/writer failures in `from_reader` / `to_writer`
//!
//! Decoding errors carry the 1-based line and column of the offending sentinel.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ogson::{decode_strict, Error};
//!
//! let result = decode_strict("[[[@@@foo!!!@@@bar");
//! assert!(matches!(result, Err(Error::UnterminatedContainer { .. })));
//! ```

use crate::sentinel::Construct;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during OGSON encoding/decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A `@@@` opener with no `!!!` after it
    #[error("Unterminated value at line {line}, column {col}: expected `!!!`")]
    UnterminatedValue { line: usize, col: usize },

    /// An object or array opener with no closer after it
    #[error("Unterminated {kind} at line {line}, column {col}: expected `{}`", .kind.end())]
    UnterminatedContainer {
        kind: Construct,
        line: usize,
        col: usize,
    },

    /// A container nested deeper than the selected [`Nesting`](crate::Nesting) allows
    #[error("Unexpected nesting depth at line {line}, column {col}\nHelp: single-level decoding supports one nested container per member; use Nesting::DepthCounted for deeper trees (up to {max} levels)", max = crate::de::MAX_DEPTH)]
    UnexpectedNestingDepth { line: usize, col: usize },

    /// An object key that is not followed by a value
    #[error("Missing value for key {key:?} at line {line}, column {col}")]
    MissingMemberValue {
        key: String,
        line: usize,
        col: usize,
    },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Type mismatch when converting a value into a Rust type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unterminated value error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ogson::Error;
    ///
    /// let err = Error::unterminated_value(3, 7);
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn unterminated_value(line: usize, col: usize) -> Self {
        Error::UnterminatedValue { line, col }
    }

    /// Creates an unterminated container error for an object or array opener.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ogson::{sentinel::Construct, Error};
    ///
    /// let err = Error::unterminated_container(Construct::Array, 1, 1);
    /// assert!(err.to_string().contains("expected `]]]`"));
    /// ```
    pub fn unterminated_container(kind: Construct, line: usize, col: usize) -> Self {
        Error::UnterminatedContainer { kind, line, col }
    }

    /// Creates a nesting depth error.
    pub fn unexpected_nesting_depth(line: usize, col: usize) -> Self {
        Error::UnexpectedNestingDepth { line, col }
    }

    /// Creates a dangling key error.
    pub fn missing_member_value(key: &str, line: usize, col: usize) -> Self {
        Error::MissingMemberValue {
            key: key.to_string(),
            line,
            col,
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ogson::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for types that cannot be represented.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ogson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the 1-based line and column for decoding errors.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::UnterminatedValue { line, col }
            | Error::UnterminatedContainer { line, col, .. }
            | Error::UnexpectedNestingDepth { line, col }
            | Error::MissingMemberValue { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_only_for_decode_errors() {
        assert_eq!(Error::unterminated_value(2, 5).position(), Some((2, 5)));
        assert_eq!(
            Error::missing_member_value("name", 1, 4).position(),
            Some((1, 4))
        );
        assert_eq!(Error::custom("boom").position(), None);
    }

    #[test]
    fn test_messages_name_the_construct() {
        let err = Error::unterminated_container(Construct::Object, 1, 9);
        assert_eq!(
            err.to_string(),
            "Unterminated object at line 1, column 9: expected `^^^`"
        );

        let err = Error::missing_member_value("scripts", 4, 2);
        assert!(err.to_string().contains("\"scripts\""));
    }
}
