//! Error types for kitty parsing and mapping.
//!
//! Every error is terminal: the parse or the mapping stops at the first problem
//! and reports enough context (a 1-based line number, a key, or a dotted field
//! path) to locate it in the input.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: a line skips an indentation level or is none of
//!   comment/header/assignment
//! - **Duplicate Errors**: a key is bound twice in one section, or an array
//!   header reuses a key already bound to something else
//! - **Mapping Errors**: a tree value does not fit the destination field shape
//! - **Conversion Errors**: scalar text is not a valid boolean/integer/float
//! - **I/O Errors**: the input could not be read or is not UTF-8
//!
//! ## Examples
//!
//! ```rust
//! use serde_kitty::{Config, Error};
//!
//! let err = Config::from_str("host example.com").unwrap_err();
//! assert!(matches!(err, Error::MissingSeparator { line: 1, .. }));
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced while parsing or mapping kitty data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading, including input that is not valid UTF-8
    #[error("IO error: {0}")]
    Io(String),

    /// A line is indented deeper than any open section allows
    #[error("Syntax error at line {line}: depth {depth} skips a level ({open} section(s) open), please check indentation")]
    Indentation {
        line: usize,
        depth: usize,
        open: usize,
    },

    /// A line is neither a comment, a header nor a `key = value` assignment
    #[error("Syntax error at line {line}: missing separator in `{text}`")]
    MissingSeparator { line: usize, text: String },

    /// A key is bound twice within the same section
    #[error("Duplicate definition of `{key}` at line {line} (already bound to {prior})")]
    Duplicate {
        key: String,
        line: usize,
        prior: String,
    },

    /// An array header names a key already bound to a scalar or a section
    #[error("`{key}` at line {line} is not a list of sections (already bound to {found})")]
    NotAList {
        key: String,
        line: usize,
        found: String,
    },

    /// A tree value does not fit the destination's declared shape
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Scalar text could not be converted to the requested primitive
    #[error("Cannot convert `{text}` to {kind}: {reason}")]
    Conversion {
        kind: String,
        text: String,
        reason: String,
    },

    /// The destination contains a shape the mapper cannot fill
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// An error raised while mapping a particular field
    #[error("field `{path}`: {source}")]
    Field { path: String, source: Box<Error> },

    /// Custom error, typically raised by serde itself (e.g. a missing field)
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an indentation error for a line whose depth skips a level.
    pub fn indentation(line: usize, depth: usize, open: usize) -> Self {
        Error::Indentation { line, depth, open }
    }

    /// Creates a missing-separator error carrying the offending (trimmed) text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::Error;
    ///
    /// let err = Error::missing_separator(7, "hostname");
    /// assert!(err.to_string().contains("line 7"));
    /// ```
    pub fn missing_separator(line: usize, text: &str) -> Self {
        Error::MissingSeparator {
            line,
            text: text.to_string(),
        }
    }

    pub fn duplicate(key: &str, line: usize, prior: impl fmt::Display) -> Self {
        Error::Duplicate {
            key: key.to_string(),
            line,
            prior: prior.to_string(),
        }
    }

    pub fn not_a_list(key: &str, line: usize, found: impl fmt::Display) -> Self {
        Error::NotAList {
            key: key.to_string(),
            line,
            found: found.to_string(),
        }
    }

    /// Creates a type mismatch error between a tree value and a destination shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::Error;
    ///
    /// let err = Error::type_mismatch("a list of sections", "scalar `x`");
    /// assert!(err.to_string().contains("expected a list of sections"));
    /// ```
    pub fn type_mismatch(expected: &str, found: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn conversion(kind: impl fmt::Display, text: &str, reason: impl fmt::Display) -> Self {
        Error::Conversion {
            kind: kind.to_string(),
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Attributes this error to the field `key`, prefixing any inner path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::Error;
    ///
    /// let err = Error::custom("boom").in_field("port").in_field("portal");
    /// assert_eq!(err.to_string(), "field `portal.port`: Error: boom");
    /// ```
    #[must_use]
    pub fn in_field(self, key: &str) -> Self {
        match self {
            Error::Field { path, source } => Error::Field {
                path: format!("{}.{}", key, path),
                source,
            },
            other => Error::Field {
                path: key.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through any field attribution.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the 1-based input line for parse errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Indentation { line, .. }
            | Error::MissingSeparator { line, .. }
            | Error::Duplicate { line, .. }
            | Error::NotAList { line, .. } => Some(*line),
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

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
