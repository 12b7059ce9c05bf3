//! OGSON encoding.
//!
//! This module provides the [`Encoder`], which writes a [`Value`] tree as notation
//! text, and the [`ValueSerializer`], which converts any `Serialize` type into a
//! [`Value`].
//!
//! ## Overview
//!
//! Encoding is a single pass with no configuration:
//!
//! - **Scalars** are wrapped as `@@@text!!!`. Booleans print `true`/`false`, numbers
//!   use Rust's shortest decimal form (so `42.0` prints `42`), and `Null` prints an
//!   empty payload
//! - **Arrays** concatenate their encoded elements inside `[[[ ]]]`
//! - **Objects** emit `@@@key!!!` followed by the encoded member inside `### ^^^`; a
//!   member holding a container gets one extra `@@@ !!!` wrapper
//!
//! Payloads are written verbatim. The format has no escaping, so text containing a
//! sentinel will not decode back to itself.
//!
//! ## Usage
//!
//! ```rust
//! use serde_ogson::{encode, ogson};
//!
//! let value = ogson!({"name": "ogson", "keywords": ["wheel"]});
//! assert_eq!(
//!     encode(&value),
//!     "###@@@name!!!@@@ogson!!!@@@keywords!!!@@@[[[@@@wheel!!!]]]!!!^^^"
//! );
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use serde_ogson::{Encoder, Value};
//!
//! let mut encoder = Encoder::new();
//! encoder.write_value(&Value::from(true));
//! encoder.write_value(&Value::from("x"));
//! assert_eq!(encoder.into_inner(), "@@@true!!!@@@x!!!");
//! ```

use crate::sentinel::Construct;
use crate::{to_value, Error, Map, Result, Value};
use serde::{ser, Serialize};
use tracing::debug;

/// The OGSON encoder.
///
/// Appends the notation for each value passed to [`Encoder::write_value`] to an
/// internal buffer. Created via [`Encoder::new`].
pub struct Encoder {
    output: String,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the notation for `value`.
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Array(elements) => {
                self.output.push_str(Construct::Array.begin());
                for element in elements {
                    self.write_value(element);
                }
                self.output.push_str(Construct::Array.end());
            }
            Value::Object(members) => self.write_object(members),
            Value::Null => self.write_scalar(""),
            Value::Bool(b) => self.write_scalar(if *b { "true" } else { "false" }),
            Value::Number(n) => self.write_scalar(&n.to_string()),
            Value::String(s) => self.write_scalar(s),
        }
    }

    fn write_object(&mut self, members: &Map) {
        self.output.push_str(Construct::Object.begin());
        for (key, member) in members {
            self.write_scalar(key);
            if member.is_container() {
                self.output.push_str(Construct::Value.begin());
                self.write_value(member);
                self.output.push_str(Construct::Value.end());
            } else {
                self.write_value(member);
            }
        }
        self.output.push_str(Construct::Object.end());
    }

    #[inline]
    fn write_scalar(&mut self, text: &str) {
        if contains_sentinel(text) {
            debug!(payload = text, "payload contains a sentinel and will not decode verbatim");
        }
        self.output.push_str(Construct::Value.begin());
        self.output.push_str(text);
        self.output.push_str(Construct::Value.end());
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_sentinel(text: &str) -> bool {
    Construct::ALL
        .iter()
        .any(|construct| text.contains(construct.begin()) || text.contains(construct.end()))
}

/// Encodes a value tree as OGSON text.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{encode, Value};
///
/// assert_eq!(encode(&Value::from(42)), "@@@42!!!");
/// assert_eq!(encode(&Value::from("hey there homey")), "@@@hey there homey!!!");
/// ```
#[must_use]
pub fn encode(value: &Value) -> String {
    let mut encoder = Encoder::new();
    encoder.write_value(value);
    encoder.into_inner()
}

/// Serializes any `Serialize` type into a [`Value`].
///
/// Integers and floats become [`Value::Number`], `None` and unit become
/// [`Value::Null`], unit variants become their name, and data-carrying enum
/// variants become a single-key object keyed by the variant name.
///
/// Numbers are held as `f64`, so 64-bit integers beyond 2^53 lose
/// precision: `9_007_199_254_740_993_u64` serializes as `9007199254740992`.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: &'static str,
    map: Map,
}

fn variant_object(name: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(name.to_string(), value);
    Value::Object(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v.iter().map(|&b| Value::Number(f64::from(b))).collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(variant_object(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: Map::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: Map::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(variant_object(self.name, Value::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be strings")),
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
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(variant_object(self.name, Value::Object(self.map)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(encode(&Value::Bool(true)), "@@@true!!!");
        assert_eq!(encode(&Value::Number(42.0)), "@@@42!!!");
        assert_eq!(encode(&Value::Number(-0.5)), "@@@-0.5!!!");
        assert_eq!(encode(&Value::Null), "@@@!!!");
    }

    #[test]
    fn test_container_member_gets_wrapper() {
        let mut inner = Map::new();
        inner.insert("k".to_string(), Value::from("v"));
        let mut outer = Map::new();
        outer.insert("plain".to_string(), Value::from(1));
        outer.insert("list".to_string(), Value::Array(vec![Value::from(2)]));
        outer.insert("obj".to_string(), Value::Object(inner));

        assert_eq!(
            encode(&Value::Object(outer)),
            "###@@@plain!!!@@@1!!!@@@list!!!@@@[[[@@@2!!!]]]!!!@@@obj!!!@@@###@@@k!!!@@@v!!!^^^!!!^^^"
        );
    }

    #[test]
    fn test_array_elements_are_not_wrapped() {
        let value = Value::Array(vec![Value::Array(vec![Value::from("a")]), Value::from("b")]);
        assert_eq!(encode(&value), "[[[[[[@@@a!!!]]]@@@b!!!]]]");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(encode(&Value::Array(vec![])), "[[[]]]");
        assert_eq!(encode(&Value::Object(Map::new())), "###^^^");
    }

    #[test]
    fn test_encoder_appends() {
        let mut encoder = Encoder::default();
        encoder.write_value(&Value::from(1));
        encoder.write_value(&Value::from(2));
        assert_eq!(encoder.into_inner(), "@@@1!!!@@@2!!!");
    }

    #[test]
    fn test_large_integers_round_to_f64() {
        assert_eq!(
            to_value(&9_007_199_254_740_993_u64).unwrap(),
            Value::Number(9_007_199_254_740_992.0)
        );
        assert_eq!(
            to_value(&i64::MIN).unwrap(),
            Value::Number(-9_223_372_036_854_775_808.0)
        );
        assert_eq!(to_value(&(1_u64 << 53)).unwrap(), Value::from(1_u64 << 53));
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Point(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(
            to_value(&Shape::Circle(1.5)).unwrap()["Circle"],
            Value::Number(1.5)
        );
        assert_eq!(
            to_value(&Shape::Point(1, 2)).unwrap()["Point"],
            Value::Array(vec![Value::from(1), Value::from(2)])
        );
        let rect = to_value(&Shape::Rect { w: 3, h: 4 }).unwrap();
        assert_eq!(rect["Rect"]["w"], Value::from(3));
        assert_eq!(rect["Rect"]["h"], Value::from(4));
    }

    #[test]
    fn test_non_string_map_keys_rejected() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(1, "one");
        assert!(matches!(to_value(&map), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_option_and_unit_become_null() {
        assert_eq!(to_value(&None::<i32>).unwrap(), Value::Null);
        assert_eq!(to_value(&Some(3)).unwrap(), Value::from(3));
        assert_eq!(to_value(&()).unwrap(), Value::Null);
    }
}
