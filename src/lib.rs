//! # serde_ogson
//!
//! A codec for OGSON, a sentinel-delimited data notation, with a Serde bridge.
//!
//! ## What is OGSON?
//!
//! OGSON describes the same tree of values as JSON, but every construct is delimited by
//! a fixed three-character marker instead of quotes, braces and commas:
//!
//! | Construct | Begin | End |
//! |-----------|-------|-----|
//! | Value     | `@@@` | `!!!` |
//! | Object    | `###` | `^^^` |
//! | Array     | `[[[` | `]]]` |
//!
//! There is no escaping. Scalar types are not written down; the decoder infers
//! booleans and numbers from the payload text and keeps everything else as a string.
//!
//! ## Key Features
//!
//! - **Never-failing decoder**: the default lenient mode returns a best-effort tree
//!   for any input, including text outside sentinels
//! - **Strict mode**: reports unterminated constructs and dangling keys with line and
//!   column
//! - **Depth-counted nesting**: optional decoding of arbitrarily deep trees
//! - **Serde Compatible**: convert your own types through [`to_string`] and
//!   [`from_str`]
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_ogson::{decode, encode, Value};
//!
//! let value = decode("###@@@name!!!@@@ogson!!!@@@private!!!@@@true!!!^^^");
//! assert_eq!(value["name"], Value::from("ogson"));
//! assert_eq!(value["private"], Value::Bool(true));
//!
//! assert_eq!(encode(&value), "###@@@name!!!@@@ogson!!!@@@private!!!@@@true!!!^^^");
//! ```
//!
//! ### Serde Types
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ogson::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Package {
//!     name: String,
//!     version: String,
//!     keywords: Vec<String>,
//! }
//!
//! let package = Package {
//!     name: "ogson".to_string(),
//!     version: "1.0.0".to_string(),
//!     keywords: vec!["wheel".to_string()],
//! };
//!
//! let text = to_string(&package).unwrap();
//! assert_eq!(
//!     text,
//!     "###@@@name!!!@@@ogson!!!@@@version!!!@@@1.0.0!!!@@@keywords!!!@@@[[[@@@wheel!!!]]]!!!^^^"
//! );
//! let back: Package = from_str(&text).unwrap();
//! assert_eq!(package, back);
//! ```
//!
//! ## Limitations
//!
//! - Payloads containing a sentinel substring do not decode back to themselves
//! - Strings that look like booleans or numbers come back as booleans or numbers
//! - In the default [`Nesting::SingleLevel`] mode an object member may hold a
//!   container only if that container's own members are scalars
//!
//! ## Demos
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Encoding and decoding a package manifest
//! - **`dynamic_values.rs`** - Working with [`Value`] trees and decode options
//!
//! Run any demo with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod sentinel;
pub mod ser;
pub mod value;

pub use de::Decoder;
pub use error::{Error, Result};
pub use map::Map;
pub use options::{DecodeOptions, Mode, Nesting};
pub use ser::{encode, Encoder, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decodes OGSON text into a [`Value`] without ever failing.
///
/// Text outside sentinels is ignored, a range without any sentinel is read as a
/// scalar, and malformed input yields a partial tree.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{decode, Value};
///
/// assert_eq!(decode("@@@true!!!"), Value::Bool(true));
/// assert_eq!(decode("[[[@@@foo!!!@@@bar!!!]]]")[1], Value::from("bar"));
/// assert_eq!(decode("no sentinels here"), Value::from("no sentinels here"));
/// ```
#[must_use]
pub fn decode(text: &str) -> Value {
    // Lenient decoding has no error paths.
    Decoder::new(text, DecodeOptions::new())
        .decode()
        .unwrap_or_default()
}

/// Decodes OGSON text, reporting the first malformed construct.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{decode_strict, Error};
///
/// assert!(decode_strict("@@@42!!!").is_ok());
/// assert_eq!(
///     decode_strict("###@@@key!!!^^^"),
///     Err(Error::missing_member_value("key", 1, 4))
/// );
/// ```
///
/// # Errors
///
/// Returns an error for unterminated values or containers, object keys without a
/// value, and members nested deeper than single-level decoding supports.
pub fn decode_strict(text: &str) -> Result<Value> {
    Decoder::new(text, DecodeOptions::strict()).decode()
}

/// Decodes OGSON text with custom options.
///
/// # Errors
///
/// Only in [`Mode::Strict`]: see [`decode_strict`].
pub fn decode_with_options(text: &str, options: &DecodeOptions) -> Result<Value> {
    Decoder::new(text, options.clone()).decode()
}

/// Serialize any `T: Serialize` to an OGSON string.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::to_string;
///
/// assert_eq!(to_string(&vec![1, 2]).unwrap(), "[[[@@@1!!!@@@2!!!]]]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g., maps with non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(encode(&to_value(value)?))
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value["y"], Value::from(2));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Convert a [`Value`] into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{decode, from_value};
///
/// let ports: Vec<u16> = from_value(decode("[[[@@@80!!!@@@443!!!]]]")).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not fit the shape of `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}

/// Serialize any `T: Serialize` to a writer in OGSON format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from OGSON text, decoding leniently.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("###@@@x!!!@@@1!!!@@@y!!!@@@2!!!^^^").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the decoded tree cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(s))
}

/// Deserialize an instance of type `T` from OGSON text with custom decode options.
///
/// # Errors
///
/// Returns an error if strict decoding fails or the tree cannot be deserialized to
/// type `T`.
pub fn from_str_with_options<T>(s: &str, options: &DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_with_options(s, options)?)
}

/// Deserialize an instance of type `T` from an I/O stream of OGSON.
///
/// # Errors
///
/// Returns an error if reading from the reader fails or the data cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of OGSON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be deserialized to
/// type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        nickname: Option<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            nickname: None,
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "###@@@x!!!@@@1!!!@@@y!!!@@@2!!!^^^");
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = alice();
        let text = to_string(&user).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("x"), Some(&Value::Number(1.0)));
        assert_eq!(obj.get("y"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();
        let user: User = from_reader(std::io::Cursor::new(&buffer)).unwrap();
        assert_eq!(user, alice());
        let user: User = from_slice(&buffer).unwrap();
        assert_eq!(user, alice());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let result: Result<Point> = from_slice(&[0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Custom(_))));
    }

    #[test]
    fn test_from_str_with_strict_options() {
        let result: Result<Point> =
            from_str_with_options("###@@@x!!!@@@1!!!@@@y!!!^^^", &DecodeOptions::strict());
        assert_eq!(result, Err(Error::missing_member_value("y", 1, 18)));
    }

    #[test]
    fn test_decode_never_fails() {
        for text in ["", "!!!", "^^^]]]", "###", "[[[", "@@@", "###@@@a"] {
            let _ = decode(text);
        }
        assert_eq!(decode(""), Value::from(""));
        assert_eq!(decode("###"), Value::Object(Map::new()));
        assert_eq!(decode("[[["), Value::Array(vec![]));
    }
}
