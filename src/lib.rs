//! # serde_kitty
//!
//! A Serde-compatible reader for the kitty configuration format: an
//! indentation-delimited, line-oriented format with sections, lists of
//! sections and `key = value` assignments.
//!
//! ## The Format
//!
//! ```text
//! # comments start with '#'
//! host = example.com
//! group = a, b, c
//!
//! [portal]
//!  enabled = true
//!  [web]
//!   ip = 10.0.0.1
//!  [[cluster]]
//!   addr = 192.168.1.10
//!  [[cluster]]
//!   addr = 192.168.1.11
//! ```
//!
//! - `[name]` opens a nested section; `[[name]]` appends one more section to a
//!   list. Both become children of the section open one level up.
//! - Nesting depth is the number of leading whitespace characters plus one.
//!   Spaces and tabs count alike; a line may go at most one level deeper than
//!   the section it belongs to.
//! - Every value is text. Types are decided by the destination field, and a
//!   comma-separated value fills a `Vec` field.
//! - A key may be bound only once per section.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_kitty::from_str;
//!
//! #[derive(Deserialize, Debug)]
//! struct Web {
//!     ip: String,
//! }
//!
//! #[derive(Deserialize, Debug)]
//! struct Node {
//!     addr: String,
//! }
//!
//! #[derive(Deserialize, Debug)]
//! struct Portal {
//!     enabled: bool,
//!     web: Web,
//!     #[serde(rename = "cluster")]
//!     nodes: Vec<Node>,
//! }
//!
//! #[derive(Deserialize, Debug)]
//! struct Conf {
//!     host: String,
//!     group: Vec<String>,
//!     portal: Portal,
//! }
//!
//! let text = "\
//! host = example.com
//! group = a, b, c
//! [portal]
//!  enabled = true
//!  [web]
//!   ip = 10.0.0.1
//!  [[cluster]]
//!   addr = 192.168.1.10
//!  [[cluster]]
//!   addr = 192.168.1.11
//! ";
//!
//! let conf: Conf = from_str(text).unwrap();
//! assert_eq!(conf.group, vec!["a", "b", "c"]);
//! assert!(conf.portal.enabled);
//! assert_eq!(conf.portal.nodes[1].addr, "192.168.1.11");
//! ```
//!
//! ## Keeping Defaults
//!
//! [`Config::unmarshal`] fills an existing value and leaves every field whose
//! key is absent from the input untouched:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_kitty::Config;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Conf {
//!     port: i32,
//!     #[serde(rename = "distance")]
//!     dist: i32,
//! }
//!
//! let mut conf = Conf { port: 0, dist: 90 };
//! Config::from_str("port = 43").unwrap().unmarshal(&mut conf).unwrap();
//! assert_eq!((conf.port, conf.dist), (43, 90));
//! ```
//!
//! ## Ownership
//!
//! Each parse starts from a fresh [`Parser`] that is consumed by the parse,
//! so there is no state to reset or share. A [`Config`] is plain owned data.

pub mod convert;
pub mod de;
pub mod error;
mod line;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::Section;
pub use options::{Delimiter, Options};
pub use parser::Parser;
pub use ser::{to_section, SectionSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// A parsed kitty document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: Section,
    options: Options,
}

impl Config {
    /// Opens and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read, or the first
    /// parse error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with_options(path, Options::default())
    }

    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: Options) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("opening {}", path.display());
        let file = File::open(path)
            .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
        Self::from_reader_with_options(BufReader::new(file), options)
    }

    /// Parses an in-memory buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::{Config, Value};
    ///
    /// let config = Config::from_slice(b"active = true\n").unwrap();
    /// assert_eq!(config.sections().get("active"), Some(&Value::from("true")));
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_reader_with_options(bytes, Options::default())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Self::from_reader_with_options(s.as_bytes(), Options::default())
    }

    pub fn from_str_with_options(s: &str, options: Options) -> Result<Self> {
        Self::from_reader_with_options(s.as_bytes(), options)
    }

    pub fn from_reader<R: io::BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, Options::default())
    }

    /// Parses a buffered stream with custom options.
    ///
    /// # Errors
    ///
    /// Returns the first syntax, duplicate or I/O error; no partial tree is kept.
    pub fn from_reader_with_options<R: io::BufRead>(reader: R, options: Options) -> Result<Self> {
        let root = Parser::new(options).parse(reader)?;
        Ok(Config { root, options })
    }

    /// Returns the whole parsed tree.
    #[must_use]
    pub fn sections(&self) -> &Section {
        &self.root
    }

    #[must_use]
    pub fn into_section(self) -> Section {
        self.root
    }

    /// Builds a fresh `T` from the parsed tree.
    ///
    /// Keys missing from the input follow plain serde rules: a field without
    /// `#[serde(default)]` (on the field or its container) or an `Option` type
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns a mapping or conversion error, or serde's error for a field
    /// that is neither present nor defaulted.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(Deserializer::from_section(self.root.clone(), self.options))
    }

    /// Fills `dest` from the parsed tree, keeping the prior value of every
    /// field whose key is absent from the input.
    ///
    /// `dest` is snapshotted, the parsed tree is laid over the snapshot
    /// (nested sections merge; scalars and lists replace), and the result is
    /// mapped back. `*dest` is only written when the whole mapping succeeds.
    ///
    /// Every `[[name]]` entry builds a fresh element, since there is no prior
    /// element to keep values from. Element types whose keys may be missing
    /// need `#[serde(default)]` on the container or on each such field (or an
    /// `Option` field); otherwise a missing key fails with
    /// [`Error::Field`] around serde's "missing field" error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::{Deserialize, Serialize};
    /// use serde_kitty::Config;
    ///
    /// #[derive(Serialize, Deserialize, Default)]
    /// struct Web { ip: String, mac: String }
    ///
    /// #[derive(Serialize, Deserialize, Default)]
    /// struct Conf { port: Option<i32>, web: Web }
    ///
    /// let mut conf = Conf { port: Some(2), web: Web { ip: String::new(), mac: "aa".into() } };
    /// let config = Config::from_str("[web]\n ip = 10.0.0.1\n").unwrap();
    /// config.unmarshal(&mut conf).unwrap();
    ///
    /// assert_eq!(conf.port, Some(2));
    /// assert_eq!(conf.web.ip, "10.0.0.1");
    /// assert_eq!(conf.web.mac, "aa");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a mapping or conversion error; `dest` is left unchanged.
    pub fn unmarshal<T>(&self, dest: &mut T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut merged = to_section(&*dest)?;
        merged.overlay(self.root.clone());
        *dest = T::deserialize(Deserializer::from_section(merged, self.options))?;
        Ok(())
    }
}

/// Maps an already-parsed tree onto `T`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_kitty::{from_section, section};
///
/// #[derive(Deserialize)]
/// struct Conf { host: String, port: i32 }
///
/// let conf: Conf = from_section(section! { "host" => "x", "port" => "8080" }).unwrap();
/// assert_eq!((conf.host.as_str(), conf.port), ("x", 8080));
/// ```
///
/// # Errors
///
/// Returns a mapping or conversion error.
pub fn from_section<T: DeserializeOwned>(section: Section) -> Result<T> {
    T::deserialize(Deserializer::from_section(section, Options::default()))
}

/// Parses kitty text and maps it onto `T`.
///
/// Every field starts from nothing, so a key missing from the input is an
/// error unless the field is an `Option` or carries `#[serde(default)]`
/// (directly or through its container). This applies to the element types
/// of `[[name]]` lists as well:
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// #[serde(default)]
/// struct Node { addr: String, weight: i32 }
///
/// impl Default for Node {
///     fn default() -> Self {
///         Node { addr: String::new(), weight: 1 }
///     }
/// }
///
/// #[derive(Deserialize)]
/// struct Conf { node: Vec<Node> }
///
/// let conf: Conf = serde_kitty::from_str("[[node]]\n addr = a\n").unwrap();
/// assert_eq!(conf.node[0].weight, 1);
/// ```
///
/// # Errors
///
/// Returns the first parse, mapping or conversion error.
pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    from_str_with_options(s, Options::default())
}

pub fn from_str_with_options<T: DeserializeOwned>(s: &str, options: Options) -> Result<T> {
    Config::from_str_with_options(s, options)?.deserialize()
}

/// Parses kitty bytes and maps them onto `T`.
pub fn from_slice<T: DeserializeOwned>(v: &[u8]) -> Result<T> {
    Config::from_slice(v)?.deserialize()
}

/// Parses a buffered stream and maps it onto `T`.
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::BufRead,
    T: DeserializeOwned,
{
    Config::from_reader(reader)?.deserialize()
}

/// Opens and parses a file and maps it onto `T`.
pub fn from_file<P, T>(path: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    Config::from_file(path)?.deserialize()
}
