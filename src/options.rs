//! Options that tune parsing and mapping.
//!
//! - [`Options`]: main configuration struct
//! - [`Delimiter`]: the separator used to split a scalar into a sequence
//!
//! ## Examples
//!
//! ```rust
//! use serde_kitty::{from_str_with_options, Delimiter, Options};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Data { group: Vec<String> }
//!
//! let options = Options::new().with_list_delimiter(Delimiter::Pipe);
//! let data: Data = from_str_with_options("group = a, b | c", options).unwrap();
//! assert_eq!(data.group, vec!["a, b", "c"]);
//! ```

/// Separator for sequence-of-scalar fields.
///
/// # Examples
///
/// ```rust
/// use serde_kitty::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }
}

/// Parsing and mapping options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Splits `key = a, b, c` into the elements of a sequence field.
    pub list_delimiter: Delimiter,
    /// A trimmed line starting with this character is a comment.
    pub comment_prefix: char,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            list_delimiter: Delimiter::default(),
            comment_prefix: '#',
        }
    }
}

impl Options {
    /// Creates default options (comma lists, `#` comments).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::{Delimiter, Options};
    ///
    /// let options = Options::new();
    /// assert_eq!(options.list_delimiter, Delimiter::Comma);
    /// assert_eq!(options.comment_prefix, '#');
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_list_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.list_delimiter = delimiter;
        self
    }

    /// Sets the comment marker, e.g. `;` for INI-style files.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::{Config, Options};
    ///
    /// let options = Options::new().with_comment_prefix(';');
    /// let config = Config::from_str_with_options("; note\nport = 1\n", options).unwrap();
    /// assert_eq!(config.sections().len(), 1);
    /// ```
    #[must_use]
    pub fn with_comment_prefix(mut self, prefix: char) -> Self {
        self.comment_prefix = prefix;
        self
    }
}
