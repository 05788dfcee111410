//! Mapping a parsed tree onto typed destinations.
//!
//! [`Deserializer`] implements [`serde::Deserializer`] over a [`Value`]. The
//! destination type drives the walk: each `deserialize_*` request is one of a
//! small, closed set of capabilities and is checked against the value variant
//! it meets.
//!
//! | Destination | Required value | Behaviour |
//! |---|---|---|
//! | `bool`, integers, floats, `char`, `String` | `Scalar` | converted by [`crate::convert`] |
//! | `Option<T>` | any | a present key is `Some(..)` |
//! | struct / map | `Nested` | fields looked up by (renamed) field name |
//! | `Vec<scalar>` | `Scalar` | text split on the list delimiter, each token trimmed |
//! | `Vec<scalar>` | `Tokens` | one element per token, taken as is |
//! | `Vec<struct>` | `List` | one element per section, in order |
//!
//! Any other pairing is an [`Error::TypeMismatch`]. Errors raised inside a
//! field are attributed to the field's dotted path.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_kitty::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     #[serde(rename = "host")]
//!     hostname: String,
//!     port: i32,
//!     #[serde(rename = "group")]
//!     groups: Vec<String>,
//! }
//!
//! let server: Server = from_str("host = x\nport = 8080\ngroup = a, b , c\n").unwrap();
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.groups, vec!["a", "b", "c"]);
//! ```

use crate::convert::{convert, Kind, Scalar};
use crate::{Error, Options, Result, Section, Value};
use serde::de::{self, Deserializer as _, IntoDeserializer};

/// A deserializer for one kitty value.
pub struct Deserializer {
    value: Value,
    options: Options,
}

impl Deserializer {
    #[must_use]
    pub fn new(value: Value, options: Options) -> Self {
        Deserializer { value, options }
    }

    /// Wraps a root section so it maps onto a record.
    #[must_use]
    pub fn from_section(section: Section, options: Options) -> Self {
        Deserializer::new(Value::Nested(section), options)
    }

    fn into_scalar(self, kind: Kind) -> Result<String> {
        match self.value {
            Value::Scalar(text) => Ok(text),
            other => Err(Error::type_mismatch(&format!("a scalar ({})", kind), other)),
        }
    }
}

/// Hands a converted primitive to the visitor.
fn visit_scalar<'de, V>(scalar: Scalar, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    match scalar {
        Scalar::Bool(b) => visitor.visit_bool(b),
        Scalar::Int(i) => visitor.visit_i64(i),
        Scalar::UInt(u) => visitor.visit_u64(u),
        Scalar::Float32(f) => visitor.visit_f32(f),
        Scalar::Float64(f) => visitor.visit_f64(f),
        Scalar::Char(c) => visitor.visit_char(c),
        Scalar::Str(s) => visitor.visit_string(s),
    }
}

macro_rules! forward_to_scalar {
    ($($method:ident => $kind:expr,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let text = self.into_scalar($kind)?;
                ScalarDeserializer::new(text).$method(visitor)
            }
        )*
    };
}

macro_rules! convert_scalar {
    ($($method:ident => $kind:expr,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visit_scalar(convert($kind, &self.text)?, visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    /// Without a type to guide it, text stays text.
    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Scalar(text) => visitor.visit_string(text),
            Value::Nested(section) => visitor.visit_map(SectionAccess::new(section, self.options)),
            Value::List(sections) => visitor.visit_seq(ListAccess::new(sections, self.options)),
            Value::Tokens(tokens) => visitor.visit_seq(TokenAccess::new(tokens)),
        }
    }

    forward_to_scalar! {
        deserialize_bool => Kind::Bool,
        deserialize_i8 => Kind::Int8,
        deserialize_i16 => Kind::Int16,
        deserialize_i32 => Kind::Int,
        deserialize_i64 => Kind::Int64,
        deserialize_u8 => Kind::UInt8,
        deserialize_u16 => Kind::UInt16,
        deserialize_u32 => Kind::UInt32,
        deserialize_u64 => Kind::UInt64,
        deserialize_f32 => Kind::Float32,
        deserialize_f64 => Kind::Float64,
        deserialize_char => Kind::Char,
        deserialize_str => Kind::Str,
        deserialize_string => Kind::Str,
        deserialize_identifier => Kind::Str,
    }

    fn deserialize_bytes<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("bytes"))
    }

    fn deserialize_byte_buf<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("bytes"))
    }

    /// A key that is present always maps to `Some`.
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("unit"))
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type(&format!("unit struct {}", name)))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Scalar(text) => {
                let delimiter = self.options.list_delimiter.as_char();
                let tokens: Vec<String> = text
                    .split(delimiter)
                    .map(|token| token.trim().to_string())
                    .collect();
                visitor.visit_seq(TokenAccess::new(tokens))
            }
            Value::List(sections) => visitor.visit_seq(ListAccess::new(sections, self.options)),
            Value::Tokens(tokens) => visitor.visit_seq(TokenAccess::new(tokens)),
            other => Err(Error::type_mismatch(
                "a delimited scalar or a list of sections",
                other,
            )),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Nested(section) => visitor.visit_map(SectionAccess::new(section, self.options)),
            other => Err(Error::type_mismatch("a section", other)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    /// Only unit variants are supported, named by a scalar.
    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.into_scalar(Kind::Other("enum"))?;
        ScalarDeserializer::new(text).deserialize_enum(name, variants, visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// A deserializer for one token of scalar text.
///
/// Used directly for sequence elements, where nothing but primitives fits.
struct ScalarDeserializer {
    text: String,
}

impl ScalarDeserializer {
    fn new(text: String) -> Self {
        ScalarDeserializer { text }
    }

    fn mismatch(self, expected: &str) -> Error {
        Error::type_mismatch(expected, Value::Scalar(self.text))
    }
}

impl<'de> de::Deserializer<'de> for ScalarDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    convert_scalar! {
        deserialize_bool => Kind::Bool,
        deserialize_i8 => Kind::Int8,
        deserialize_i16 => Kind::Int16,
        deserialize_i32 => Kind::Int,
        deserialize_i64 => Kind::Int64,
        deserialize_u8 => Kind::UInt8,
        deserialize_u16 => Kind::UInt16,
        deserialize_u32 => Kind::UInt32,
        deserialize_u64 => Kind::UInt64,
        deserialize_f32 => Kind::Float32,
        deserialize_f64 => Kind::Float64,
        deserialize_char => Kind::Char,
        deserialize_bytes => Kind::Other("bytes"),
        deserialize_byte_buf => Kind::Other("bytes"),
        deserialize_unit => Kind::Other("unit"),
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type(&format!("unit struct {}", name)))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.mismatch("a sequence"))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.mismatch("a tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.mismatch("a tuple"))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.mismatch("a section"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.mismatch("a section"))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.text.into_deserializer())
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Walks a section's bindings as a serde map.
struct SectionAccess {
    iter: indexmap::map::IntoIter<String, Value>,
    pending: Option<(String, Value)>,
    options: Options,
}

impl SectionAccess {
    fn new(section: Section, options: Options) -> Self {
        SectionAccess {
            iter: section.into_iter(),
            pending: None,
            options,
        }
    }
}

impl<'de> de::MapAccess<'de> for SectionAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                let parsed = seed.deserialize(ScalarDeserializer::new(key.clone()))?;
                self.pending = Some((key, value));
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((key, value)) => {
                log::trace!("mapping `{}` from {}", key, value);
                seed.deserialize(Deserializer::new(value, self.options))
                    .map_err(|e| e.in_field(&key))
            }
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Walks the sections of a `[[header]]` list as a serde sequence.
struct ListAccess {
    iter: std::iter::Enumerate<std::vec::IntoIter<Section>>,
    options: Options,
}

impl ListAccess {
    fn new(sections: Vec<Section>, options: Options) -> Self {
        ListAccess {
            iter: sections.into_iter().enumerate(),
            options,
        }
    }
}

impl<'de> de::SeqAccess<'de> for ListAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((index, section)) => seed
                .deserialize(Deserializer::from_section(section, self.options))
                .map(Some)
                .map_err(|e| e.in_field(&index.to_string())),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Walks the tokens of a delimited scalar as a serde sequence.
struct TokenAccess {
    iter: std::iter::Enumerate<std::vec::IntoIter<String>>,
}

impl TokenAccess {
    fn new(tokens: Vec<String>) -> Self {
        TokenAccess {
            iter: tokens.into_iter().enumerate(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for TokenAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((index, token)) => seed
                .deserialize(ScalarDeserializer::new(token))
                .map(Some)
                .map_err(|e| e.in_field(&index.to_string())),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}
