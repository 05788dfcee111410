//! Conversion of scalar text into primitive values.
//!
//! Every leaf in a kitty file is text; the destination field decides which
//! [`Kind`] that text is converted to.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The primitive kinds a scalar can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    /// A 32-bit signed integer, the default integer kind.
    Int,
    Int8,
    Int16,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Char,
    Str,
    /// Anything the converter does not handle, named for the error message.
    Other(&'static str),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "i8",
            Kind::Int16 => "i16",
            Kind::Int64 => "i64",
            Kind::UInt8 => "u8",
            Kind::UInt16 => "u16",
            Kind::UInt32 => "u32",
            Kind::UInt64 => "u64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Char => "char",
            Kind::Str => "string",
            Kind::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// A converted primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Char(char),
    Str(String),
}

/// Converts `text` to a primitive of the requested kind.
///
/// # Examples
///
/// ```rust
/// use serde_kitty::convert::{convert, Kind, Scalar};
///
/// assert_eq!(convert(Kind::Int, "8080").unwrap(), Scalar::Int(8080));
/// assert_eq!(convert(Kind::Bool, "T").unwrap(), Scalar::Bool(true));
/// assert!(convert(Kind::Int, "3000000000").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Conversion`] for malformed or out-of-range text and
/// [`Error::UnsupportedType`] for [`Kind::Other`].
pub fn convert(kind: Kind, text: &str) -> Result<Scalar> {
    match kind {
        Kind::Bool => parse_bool(text).map(Scalar::Bool),
        Kind::Int => parse_number::<i32>(kind, text).map(|v| Scalar::Int(v.into())),
        Kind::Int8 => parse_number::<i8>(kind, text).map(|v| Scalar::Int(v.into())),
        Kind::Int16 => parse_number::<i16>(kind, text).map(|v| Scalar::Int(v.into())),
        Kind::Int64 => parse_number::<i64>(kind, text).map(Scalar::Int),
        Kind::UInt8 => parse_number::<u8>(kind, text).map(|v| Scalar::UInt(v.into())),
        Kind::UInt16 => parse_number::<u16>(kind, text).map(|v| Scalar::UInt(v.into())),
        Kind::UInt32 => parse_number::<u32>(kind, text).map(|v| Scalar::UInt(v.into())),
        Kind::UInt64 => parse_number::<u64>(kind, text).map(Scalar::UInt),
        Kind::Float32 => parse_number::<f32>(kind, text).map(Scalar::Float32),
        Kind::Float64 => parse_number::<f64>(kind, text).map(Scalar::Float64),
        Kind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Scalar::Char(c)),
                _ => Err(Error::conversion(kind, text, "expected a single character")),
            }
        }
        Kind::Str => Ok(Scalar::Str(text.to_string())),
        Kind::Other(name) => Err(Error::unsupported_type(name)),
    }
}

/// Accepts the usual spellings: `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::conversion(Kind::Bool, text, "invalid boolean literal")),
    }
}

fn parse_number<T>(kind: Kind, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| Error::conversion(kind, text, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literals() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(convert(Kind::Bool, text).unwrap(), Scalar::Bool(true));
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(convert(Kind::Bool, text).unwrap(), Scalar::Bool(false));
        }
        assert!(convert(Kind::Bool, "yes").is_err());
        assert!(convert(Kind::Bool, "on").is_err());
    }

    #[test]
    fn test_int_is_range_checked_to_32_bits() {
        assert_eq!(convert(Kind::Int, "-2147483648").unwrap(), Scalar::Int(-2147483648));
        assert_eq!(convert(Kind::Int, "+7").unwrap(), Scalar::Int(7));
        let err = convert(Kind::Int, "2147483648").unwrap_err();
        assert!(matches!(err, Error::Conversion { ref kind, .. } if kind == "int"));
        assert!(convert(Kind::Int, "12abc").is_err());
        assert!(convert(Kind::Int, "1.5").is_err());
        assert!(convert(Kind::Int, "").is_err());
    }

    #[test]
    fn test_wider_and_unsigned_ints() {
        assert_eq!(
            convert(Kind::Int64, "3000000000").unwrap(),
            Scalar::Int(3_000_000_000)
        );
        assert_eq!(convert(Kind::UInt16, "65535").unwrap(), Scalar::UInt(65535));
        assert!(convert(Kind::UInt8, "-1").is_err());
        assert!(convert(Kind::Int8, "128").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(convert(Kind::Float64, "36.8").unwrap(), Scalar::Float64(36.8));
        assert_eq!(
            convert(Kind::Float32, "8848.996").unwrap(),
            Scalar::Float32(8848.996)
        );
        assert_eq!(convert(Kind::Float64, "10").unwrap(), Scalar::Float64(10.0));
        assert!(convert(Kind::Float32, "high").is_err());
        assert!(convert(Kind::Float64, "1.2.3").is_err());
    }

    #[test]
    fn test_strings_and_chars() {
        assert_eq!(
            convert(Kind::Str, "what are you doing").unwrap(),
            Scalar::Str("what are you doing".to_string())
        );
        assert_eq!(convert(Kind::Char, "x").unwrap(), Scalar::Char('x'));
        assert!(convert(Kind::Char, "xy").is_err());
        assert!(convert(Kind::Char, "").is_err());
    }

    #[test]
    fn test_other_kind_is_unsupported() {
        let err = convert(Kind::Other("bytes"), "abc").unwrap_err();
        assert_eq!(err, Error::unsupported_type("bytes"));
    }
}
