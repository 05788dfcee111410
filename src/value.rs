//! The untyped value model produced by parsing.
//!
//! Every binding in a [`Section`] is one of four variants:
//!
//! - [`Value::Scalar`]: the trimmed text of a `key = value` line. Its type is
//!   decided only when it is mapped onto a destination field.
//! - [`Value::Nested`]: the section opened by a `[name]` header.
//! - [`Value::List`]: the sections opened by repeated `[[name]]` headers, in
//!   source order.
//! - [`Value::Tokens`]: an already split sequence of scalar text. The parser
//!   never produces it; [`crate::to_section`] does, for sequences of
//!   primitives, so their elements are kept verbatim.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kitty::{Config, Value};
//!
//! let config = Config::from_str("[[node]]\n addr = a\n[[node]]\n addr = b\n").unwrap();
//! let nodes = config.sections().get("node").and_then(Value::as_list).unwrap();
//! assert_eq!(nodes.len(), 2);
//! assert_eq!(nodes[1].get("addr"), Some(&Value::from("b")));
//! ```

use crate::Section;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A parsed kitty value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Nested(Section),
    List(Vec<Section>),
    Tokens(Vec<String>),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, Value::Nested(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_tokens(&self) -> bool {
        matches!(self, Value::Tokens(_))
    }

    /// If the value is a scalar, returns its text. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kitty::{Section, Value};
    ///
    /// assert_eq!(Value::from("on").as_scalar(), Some("on"));
    /// assert_eq!(Value::Nested(Section::new()).as_scalar(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Value::Nested(section) => Some(section),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Section]> {
        match self {
            Value::List(sections) => Some(sections),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            Value::Tokens(tokens) => Some(tokens),
            _ => None,
        }
    }

    /// A short description of the variant, used in mismatch messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Nested(_) => "section",
            Value::List(_) => "list of sections",
            Value::Tokens(_) => "list of scalars",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "scalar `{}`", s),
            Value::Nested(section) => write!(f, "section with {} key(s)", section.len()),
            Value::List(sections) => write!(f, "list of {} section(s)", sections.len()),
            Value::Tokens(tokens) => write!(f, "list of {} scalar(s)", tokens.len()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Scalar(s) => serializer.serialize_str(s),
            Value::Nested(section) => section.serialize(serializer),
            Value::List(sections) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(sections.len()))?;
                for section in sections {
                    seq.serialize_element(section)?;
                }
                seq.end()
            }
            Value::Tokens(tokens) => tokens.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar, a section or a list of sections")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value))
            }

            /// All sections make a list, all scalars make tokens.
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut elements = Vec::new();
                while let Some(element) = seq.next_element::<Value>()? {
                    elements.push(element);
                }

                if elements.iter().all(Value::is_section) {
                    let sections = elements
                        .into_iter()
                        .filter_map(|element| match element {
                            Value::Nested(section) => Some(section),
                            _ => None,
                        })
                        .collect();
                    return Ok(Value::List(sections));
                }

                let mut tokens = Vec::with_capacity(elements.len());
                for element in elements {
                    match element {
                        Value::Scalar(text) => tokens.push(text),
                        other => {
                            return Err(de::Error::custom(format!(
                                "a sequence must hold only sections or only scalars, found {}",
                                other
                            )))
                        }
                    }
                }
                Ok(Value::Tokens(tokens))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut section = Section::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    section.insert(key, value);
                }
                Ok(Value::Nested(section))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<Section> for Value {
    fn from(value: Section) -> Self {
        Value::Nested(value)
    }
}

impl From<Vec<Section>> for Value {
    fn from(value: Vec<Section>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::Tokens(value)
    }
}
