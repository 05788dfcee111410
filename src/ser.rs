//! Snapshotting typed records into a [`Section`].
//!
//! [`SectionSerializer`] is the inverse of the mapping rules in [`crate::de`]:
//! primitives become `Scalar` text, records become `Nested` sections,
//! sequences of records become a `List`, and sequences of primitives become
//! `Tokens`, one per element with no joining or trimming. `None` fields are
//! left out, so a snapshot never contains a key the record does not actually
//! hold.
//!
//! [`crate::Config::unmarshal`] uses a snapshot of the destination as the base
//! layer under the parsed tree, which is how keys absent from the input keep
//! the destination's prior values.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use serde_kitty::{to_section, Value};
//!
//! #[derive(Serialize)]
//! struct Conf { port: i32, order: Vec<i32>, web: Option<String> }
//!
//! let section = to_section(&Conf { port: 43, order: vec![1, 2], web: None }).unwrap();
//! assert_eq!(section.get("port"), Some(&Value::from("43")));
//! assert_eq!(section.get("order"), Some(&Value::Tokens(vec!["1".into(), "2".into()])));
//! assert!(section.get("web").is_none());
//! ```

use crate::{Error, Result, Section, Value};
use serde::{ser, Serialize};

/// Serializes a value into an optional [`Value`]; `None` means "leave the key out".
#[derive(Clone, Copy, Debug, Default)]
pub struct SectionSerializer;

impl SectionSerializer {
    #[must_use]
    pub fn new() -> Self {
        SectionSerializer
    }

    fn scalar(self, text: impl ToString) -> Result<Option<Value>> {
        Ok(Some(Value::Scalar(text.to_string())))
    }
}

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    section: Section,
    current_key: Option<String>,
}

impl ser::Serializer for SectionSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Option<Value>, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<Option<Value>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        self.scalar(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Option<Value>> {
        Err(Error::unsupported_type("bytes"))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        self.scalar(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            section: Section::new(),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(SectionSerializer)? {
            Some(value) => {
                self.vec.push(value);
                Ok(())
            }
            None => Err(Error::unsupported_type("empty sequence element")),
        }
    }

    /// Sections form a list; scalars stay separate tokens.
    fn finish(self) -> Result<Option<Value>> {
        if self.vec.iter().all(Value::is_section) {
            let sections = self
                .vec
                .into_iter()
                .filter_map(|value| match value {
                    Value::Nested(section) => Some(section),
                    _ => None,
                })
                .collect();
            return Ok(Some(Value::List(sections)));
        }

        let mut tokens = Vec::with_capacity(self.vec.len());
        for value in self.vec {
            match value {
                Value::Scalar(text) => tokens.push(text),
                _ => {
                    return Err(Error::unsupported_type(
                        "sequence elements must be all scalars or all records",
                    ))
                }
            }
        }
        Ok(Some(Value::Tokens(tokens)))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl SerializeMap {
    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(value) = value.serialize(SectionSerializer)? {
            self.section.insert(key, value);
        }
        Ok(())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(SectionSerializer)? {
            Some(Value::Scalar(s)) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be scalars")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Nested(self.section)))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Nested(self.section)))
    }
}

/// Snapshots a record into a [`Section`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_kitty::{to_section, Value};
///
/// #[derive(Serialize)]
/// struct Groups { group: Vec<String> }
///
/// let section = to_section(&Groups { group: vec!["a,b".into(), " x ".into()] }).unwrap();
/// assert_eq!(section.get("group").and_then(Value::as_tokens).map(<[String]>::len), Some(2));
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if `value` is not a record, and
/// [`Error::UnsupportedType`] for shapes the mapper could not read back.
pub fn to_section<T>(value: &T) -> Result<Section>
where
    T: ?Sized + Serialize,
{
    match value.serialize(SectionSerializer)? {
        Some(Value::Nested(section)) => Ok(section),
        Some(other) => Err(Error::type_mismatch("a record", other)),
        None => Err(Error::type_mismatch("a record", "nothing")),
    }
}
