//! OGSON decoding.
//!
//! This module provides the [`Decoder`], which turns notation text into a [`Value`]
//! tree, and a serde `Deserializer` implementation on [`Value`] that maps a decoded
//! tree onto Rust types.
//!
//! ## Overview
//!
//! The decoder does not tokenize. It works on the original buffer with byte offsets
//! and sentinel substring searches:
//!
//! - **Dispatch**: the leftmost opener (`@@@`, `###` or `[[[`) decides what a range
//!   holds; a range with no opener is a scalar
//! - **Outer bounds are greedy**: a range runs from the first opener to the *last*
//!   matching closer
//! - **Members are not**: array elements and object members end at the *first*
//!   closer, unless [`Nesting::DepthCounted`] is selected
//! - **Scalar inference**: `true`/`false` (any case), then finite numbers, then the
//!   untrimmed text as a string
//!
//! ## Usage
//!
//! ```rust
//! use serde_ogson::{decode, Value};
//!
//! assert_eq!(decode("@@@    true !!!"), Value::Bool(true));
//! assert_eq!(decode("@@@ 100 !!!"), Value::Number(100.0));
//! assert_eq!(decode("@@@ 43 booboo !!!"), Value::from(" 43 booboo "));
//! ```
//!
//! ## Leniency
//!
//! In the default [`Mode::Lenient`](crate::Mode::Lenient) nothing fails: truncated
//! containers come back partially filled and keys without values keep
//! [`Value::Null`]. Each degradation is reported as a `tracing` debug event.
//!
//! ## Depth
//!
//! Value wrappers are peeled without recursion, so `@@@@@@x!!!!!!` may nest as deep as
//! the input allows. Containers nest at most [`MAX_DEPTH`] levels: beyond that, strict
//! mode reports [`Error::UnexpectedNestingDepth`] and lenient mode keeps the remaining
//! text as a scalar.

use crate::options::{DecodeOptions, Nesting};
use crate::sentinel::{
    find_from, first_container_opener, first_opener, matching_end, rfind_within, Construct,
    SENTINEL_LEN,
};
use crate::value::whole_number;
use crate::{Error, Map, Result, Value};
use serde::de::value::{MapDeserializer, SeqDeserializer, StringDeserializer};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use tracing::{debug, trace};

/// Maximum number of nested objects and arrays the decoder descends into.
pub const MAX_DEPTH: usize = 128;

/// The OGSON decoder.
///
/// Holds the input and the options for one decode call. Created via [`Decoder::new`].
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{DecodeOptions, Decoder};
///
/// let decoder = Decoder::new("[[[@@@foo!!!@@@bar!!!]]]", DecodeOptions::new());
/// let value = decoder.decode().unwrap();
/// assert_eq!(value[1].as_str(), Some("bar"));
/// ```
pub struct Decoder<'a> {
    input: &'a str,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str, options: DecodeOptions) -> Self {
        Decoder { input, options }
    }

    /// Decodes the whole input.
    ///
    /// # Errors
    ///
    /// Only in strict mode: returns the first malformed construct found.
    pub fn decode(&self) -> Result<Value> {
        self.decode_range(0, self.input.len(), 0)
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.input.get(start..end).unwrap_or_default()
    }

    /// Converts a byte offset into a 1-based line and column.
    fn line_col(&self, offset: usize) -> (usize, usize) {
        let before = self.slice(0, offset);
        let line = before.matches('\n').count() + 1;
        let col = before
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            + 1;
        (line, col)
    }

    fn unterminated(&self, construct: Construct, at: usize) -> Error {
        let (line, col) = self.line_col(at);
        match construct {
            Construct::Value => Error::unterminated_value(line, col),
            Construct::Object | Construct::Array => {
                Error::unterminated_container(construct, line, col)
            }
        }
    }

    /// Decodes `start..end` holding `depth` enclosing containers.
    fn decode_range(&self, mut start: usize, mut end: usize, depth: usize) -> Result<Value> {
        loop {
            let Some((construct, at)) = first_opener(self.input, start, end) else {
                return Ok(infer_scalar(self.slice(start, end)));
            };
            trace!(offset = at, %construct, depth, "dispatch");
            match construct {
                Construct::Value => (start, end) = self.body(construct, at, end)?,
                _ if depth >= MAX_DEPTH => return self.too_deep(start, end, at),
                Construct::Array => return self.decode_array(at, end, depth + 1),
                Construct::Object => return self.decode_object(at, end, depth + 1),
            }
        }
    }

    fn too_deep(&self, start: usize, end: usize, at: usize) -> Result<Value> {
        if self.options.is_strict() {
            let (line, col) = self.line_col(at);
            return Err(Error::unexpected_nesting_depth(line, col));
        }
        debug!(offset = at, limit = MAX_DEPTH, "nesting limit reached, keeping text");
        Ok(infer_scalar(self.slice(start, end)))
    }

    /// Returns the range between the opener at `at` and the last matching closer
    /// before `end`.
    fn body(&self, construct: Construct, at: usize, end: usize) -> Result<(usize, usize)> {
        let body_start = at + SENTINEL_LEN;
        match rfind_within(self.input, construct.end(), body_start, end) {
            Some(close) => Ok((body_start, close)),
            None if self.options.is_strict() => Err(self.unterminated(construct, at)),
            None => {
                debug!(offset = at, %construct, "missing closer, reading to end of input");
                Ok((body_start, end))
            }
        }
    }

    fn decode_array(&self, at: usize, end: usize, depth: usize) -> Result<Value> {
        let (mut cursor, body_end) = self.body(Construct::Array, at, end)?;
        let mut elements = Vec::new();

        while cursor < body_end {
            let Some((open, close)) = self.next_element(cursor, body_end)? else {
                break;
            };
            elements.push(self.decode_range(open, close + SENTINEL_LEN, depth)?);
            cursor = close + SENTINEL_LEN;
        }

        Ok(Value::Array(elements))
    }

    /// Locates the next array element inside `cursor..body_end` as an opener offset and
    /// the offset of its closer.
    fn next_element(&self, cursor: usize, body_end: usize) -> Result<Option<(usize, usize)>> {
        let found = match self.options.nesting {
            Nesting::SingleLevel => {
                let Some(open) = find_from(self.input, Construct::Value.begin(), cursor, body_end)
                else {
                    return Ok(None);
                };
                if self.options.is_strict() {
                    if let Some((_, nested)) = first_container_opener(self.input, cursor, open) {
                        let (line, col) = self.line_col(nested);
                        return Err(Error::unexpected_nesting_depth(line, col));
                    }
                }
                let close = find_from(
                    self.input,
                    Construct::Value.end(),
                    open + SENTINEL_LEN,
                    body_end,
                );
                (Construct::Value, open, close)
            }
            Nesting::DepthCounted => {
                let Some((construct, open)) = first_opener(self.input, cursor, body_end) else {
                    return Ok(None);
                };
                let close = matching_end(self.input, construct, open, body_end);
                (construct, open, close)
            }
        };

        match found {
            (_, open, Some(close)) => Ok(Some((open, close))),
            (construct, open, None) if self.options.is_strict() => {
                Err(self.unterminated(construct, open))
            }
            (construct, open, None) => {
                debug!(offset = open, %construct, "unterminated array element, stopping");
                Ok(None)
            }
        }
    }

    fn decode_object(&self, at: usize, end: usize, depth: usize) -> Result<Value> {
        let (mut cursor, body_end) = self.body(Construct::Object, at, end)?;
        let mut members = Map::new();

        while cursor < body_end {
            let Some(key_open) =
                find_from(self.input, Construct::Value.begin(), cursor, body_end)
            else {
                break;
            };
            let key_start = key_open + SENTINEL_LEN;
            let Some(key_close) = find_from(self.input, Construct::Value.end(), key_start, body_end)
            else {
                if self.options.is_strict() {
                    return Err(self.unterminated(Construct::Value, key_open));
                }
                debug!(offset = key_open, "unterminated key, stopping");
                break;
            };

            let key = self.slice(key_start, key_close);
            members.insert(key.to_string(), Value::Null);
            cursor = key_close + SENTINEL_LEN;

            let member = match self.options.nesting {
                Nesting::SingleLevel => self.single_level_member(cursor, body_end, depth)?,
                Nesting::DepthCounted => self.depth_counted_member(cursor, body_end, depth)?,
            };

            match member {
                Some((value, next)) => {
                    if let Some(slot) = members.get_mut(key) {
                        *slot = value;
                    }
                    cursor = next;
                }
                None if self.options.is_strict() => {
                    let (line, col) = self.line_col(key_open);
                    return Err(Error::missing_member_value(key, line, col));
                }
                None => {
                    debug!(offset = key_open, key, "key without value, keeping null");
                    break;
                }
            }
        }

        Ok(Value::Object(members))
    }

    /// Decodes the member value following a key, using first-closer matching.
    ///
    /// A member value is plain when its `!!!` comes before any container opener.
    /// Otherwise the earliest container runs to its first closer, and the `!!!`
    /// wrapping it is skipped.
    fn single_level_member(
        &self,
        cursor: usize,
        body_end: usize,
        depth: usize,
    ) -> Result<Option<(Value, usize)>> {
        let Some(value_open) = find_from(self.input, Construct::Value.begin(), cursor, body_end)
        else {
            return Ok(None);
        };
        let Some(value_close) = find_from(
            self.input,
            Construct::Value.end(),
            value_open + SENTINEL_LEN,
            body_end,
        ) else {
            if self.options.is_strict() {
                return Err(self.unterminated(Construct::Value, value_open));
            }
            return Ok(None);
        };

        let container = first_container_opener(self.input, cursor, body_end)
            .filter(|&(_, at)| at < value_close);

        let Some((construct, open)) = container else {
            let value = self.decode_range(value_open + SENTINEL_LEN, value_close, depth)?;
            return Ok(Some((value, value_close + SENTINEL_LEN)));
        };

        let body_start = open + SENTINEL_LEN;
        let Some(close) = find_from(self.input, construct.end(), body_start, body_end) else {
            if self.options.is_strict() {
                return Err(self.unterminated(construct, open));
            }
            debug!(offset = open, %construct, "unterminated nested member, reading to end");
            return Ok(Some((self.decode_range(open, body_end, depth)?, body_end)));
        };

        if self.options.is_strict() {
            if let Some((_, at)) = first_container_opener(self.input, body_start, close) {
                let (line, col) = self.line_col(at);
                return Err(Error::unexpected_nesting_depth(line, col));
            }
        }

        let value = self.decode_range(open, close + SENTINEL_LEN, depth)?;
        let after = close + SENTINEL_LEN;
        let wrapped = value_open < open;
        let next = match find_from(self.input, Construct::Value.end(), after, body_end) {
            Some(wrapper_close) => wrapper_close + SENTINEL_LEN,
            None if wrapped && self.options.is_strict() => {
                return Err(self.unterminated(Construct::Value, value_open));
            }
            None => body_end,
        };
        Ok(Some((value, next)))
    }

    /// Decodes the member value following a key, matching each opener with its
    /// depth-counted closer.
    fn depth_counted_member(
        &self,
        cursor: usize,
        body_end: usize,
        depth: usize,
    ) -> Result<Option<(Value, usize)>> {
        let Some((construct, open)) = first_opener(self.input, cursor, body_end) else {
            return Ok(None);
        };
        match matching_end(self.input, construct, open, body_end) {
            Some(close) => {
                let value = self.decode_range(open, close + SENTINEL_LEN, depth)?;
                Ok(Some((value, close + SENTINEL_LEN)))
            }
            None if self.options.is_strict() => Err(self.unterminated(construct, open)),
            None => {
                debug!(offset = open, %construct, "unbalanced member, reading to end");
                Ok(Some((self.decode_range(open, body_end, depth)?, body_end)))
            }
        }
    }
}

/// Infers the type of a sentinel-free payload.
///
/// Surrounding whitespace is ignored when matching booleans and numbers but kept in
/// string results.
pub(crate) fn infer_scalar(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    match parse_number(trimmed) {
        Some(n) => Value::Number(n),
        None => Value::String(text.to_string()),
    }
}

/// Parses finite decimal numbers. Empty text and `inf`/`nan` spellings are rejected.
fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

/// Maps a decoded tree onto Rust types.
///
/// The notation carries no type information beyond scalar inference, so the mapping
/// is forgiving: numbers and booleans satisfy string fields, whole numbers satisfy
/// integer fields, and `Null` or an empty string satisfy `Option::None` and `()`.
impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => match whole_number(n) {
                Some(i) => visitor.visit_i64(i),
                None => visitor.visit_f64(n),
            },
            Value::String(s) => visitor.visit_string(s),
            Value::Array(elements) => {
                let mut seq = SeqDeserializer::<_, Error>::new(elements.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            Value::Object(members) => {
                let mut map = MapDeserializer::<_, Error>::new(members.into_iter());
                let value = visitor.visit_map(&mut map)?;
                map.end()?;
                Ok(value)
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            Value::String(ref s) if s.is_empty() => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::String(ref s) if s.is_empty() => visitor.visit_unit(),
            other => Err(Error::type_mismatch("unit", kind_name(&other))),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Bool(b) => visitor.visit_string(b.to_string()),
            Value::Number(n) => visitor.visit_string(n.to_string()),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Object(members) if members.len() == 1 => {
                let Some((variant, value)) = members.into_iter().next() else {
                    return Err(Error::type_mismatch("enum variant", "empty object"));
                };
                visitor.visit_enum(EnumDeserializer { variant, value })
            }
            other => Err(Error::type_mismatch(
                "string or single-key object",
                kind_name(&other),
            )),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 bytes byte_buf
        seq tuple tuple_struct map struct identifier
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let deserializer: StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(deserializer)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        de::Deserialize::deserialize(self.value)
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.value)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.value, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self.value, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Mode;

    fn decode(text: &str) -> Value {
        Decoder::new(text, DecodeOptions::new()).decode().unwrap()
    }

    fn decode_strict(text: &str) -> Result<Value> {
        Decoder::new(text, DecodeOptions::strict()).decode()
    }

    #[test]
    fn test_infer_scalar() {
        assert_eq!(infer_scalar("TRUE"), Value::Bool(true));
        assert_eq!(infer_scalar(" False\n"), Value::Bool(false));
        assert_eq!(infer_scalar("-2.5e3"), Value::Number(-2500.0));
        assert_eq!(infer_scalar("  7 "), Value::Number(7.0));
        assert_eq!(infer_scalar(""), Value::from(""));
        assert_eq!(infer_scalar("   "), Value::from("   "));
        assert_eq!(infer_scalar("NaN"), Value::from("NaN"));
        assert_eq!(infer_scalar("inf"), Value::from("inf"));
        assert_eq!(infer_scalar("1e400"), Value::from("1e400"));
        assert_eq!(infer_scalar("1.0.0"), Value::from("1.0.0"));
    }

    #[test]
    fn test_value_wrapper_uses_last_closer() {
        assert_eq!(decode("@@@a!!!b!!!"), Value::from("a!!!b"));
    }

    #[test]
    fn test_unterminated_value_reads_to_end() {
        assert_eq!(decode("@@@ open"), Value::from(" open"));
        assert_eq!(decode("!!! @@@tail"), Value::from("tail"));
        assert_eq!(
            decode_strict("@@@ open"),
            Err(Error::unterminated_value(1, 1))
        );
    }

    #[test]
    fn test_array_stops_at_unterminated_element() {
        assert_eq!(
            decode("[[[@@@a!!!@@@b]]]"),
            Value::Array(vec![Value::from("a")])
        );
        assert_eq!(
            decode_strict("[[[@@@a!!!@@@b]]]"),
            Err(Error::unterminated_value(1, 11))
        );
    }

    #[test]
    fn test_array_ignores_text_between_elements() {
        assert_eq!(
            decode("[[[ @@@1!!! , @@@2!!! ]]]"),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_object_key_is_raw_text() {
        let value = decode("###@@@ 42 !!!@@@x!!!^^^");
        assert_eq!(value.get(" 42 "), Some(&Value::from("x")));
    }

    #[test]
    fn test_plain_member_before_later_array() {
        let value = decode("###@@@a!!!@@@x!!!@@@b!!!@@@[[[@@@y!!!]]]!!!^^^");
        assert_eq!(value["a"], Value::from("x"));
        assert_eq!(value["b"], Value::Array(vec![Value::from("y")]));
    }

    #[test]
    fn test_array_member_before_later_object() {
        let text = "###@@@list!!!@@@[[[@@@1!!!@@@2!!!]]]!!!@@@obj!!!@@@###@@@k!!!@@@v!!!^^^!!!^^^";
        let value = decode(text);
        assert_eq!(
            value["list"],
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        );
        assert_eq!(value["obj"]["k"], Value::from("v"));
    }

    #[test]
    fn test_dangling_key_keeps_null() {
        let value = decode("###@@@a!!!@@@1!!!@@@b!!!^^^");
        let members = value.as_object().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(members.get("b"), Some(&Value::Null));

        assert_eq!(
            decode_strict("###@@@a!!!@@@1!!!@@@b!!!^^^"),
            Err(Error::missing_member_value("b", 1, 18))
        );
    }

    #[test]
    fn test_strict_rejects_deep_member_in_single_level() {
        let text = "###@@@a!!!@@@###@@@b!!!@@@###@@@c!!!@@@1!!!^^^!!!^^^!!!^^^";
        assert_eq!(
            decode_strict(text),
            Err(Error::unexpected_nesting_depth(1, 27))
        );
    }

    #[test]
    fn test_strict_rejects_bare_container_element() {
        let text = "[[[[[[@@@a!!!]]]]]]";
        assert_eq!(
            decode_strict(text),
            Err(Error::unexpected_nesting_depth(1, 4))
        );
        // Lenient single-level decoding flattens it.
        assert_eq!(decode(text), Value::Array(vec![Value::from("a")]));
    }

    #[test]
    fn test_depth_counted_nested_arrays() {
        let options = DecodeOptions::extended();
        let text = "[[[[[[@@@a!!!@@@b!!!]]][[[@@@c!!!]]]@@@d!!!]]]";
        let value = Decoder::new(text, options).decode().unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Array(vec![Value::from("a"), Value::from("b")]),
                Value::Array(vec![Value::from("c")]),
                Value::from("d"),
            ])
        );
    }

    #[test]
    fn test_depth_counted_strict_unbalanced() {
        let options = DecodeOptions::extended().with_mode(Mode::Strict);
        let text = "###@@@a!!!@@@###@@@b!!!@@@1!!!^^^^^^";
        let err = Decoder::new(text, options).decode().unwrap_err();
        assert!(matches!(err, Error::UnterminatedValue { .. }));
    }

    #[test]
    fn test_depth_counted_lenient_unbalanced_member() {
        let text = "###@@@a!!!@@@###@@@b!!!@@@1!!!^^^";
        let value = Decoder::new(text, DecodeOptions::extended()).decode().unwrap();
        assert_eq!(value["a"]["b"], Value::Number(1.0));
        assert_eq!(value.as_object().unwrap().len(), 1);

        let options = DecodeOptions::extended().with_mode(Mode::Strict);
        assert_eq!(
            Decoder::new(text, options).decode(),
            Err(Error::unterminated_value(1, 11))
        );
    }

    #[test]
    fn test_nested_member_without_closer_reads_to_end() {
        let value = decode("###@@@k!!!@@@###@@@a!!!@@@1!!!");
        let members = value.as_object().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(value["k"]["a"], Value::Number(1.0));
        assert_eq!(value["k"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_wrapped_container_missing_wrapper_closer() {
        let text = "###@@@k!!!@@@[[[@@@1!!!]]]^^^";
        let value = decode(text);
        assert_eq!(value["k"], Value::Array(vec![Value::Number(1.0)]));
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(decode_strict(text), Err(Error::unterminated_value(1, 11)));
    }

    #[test]
    fn test_deep_value_wrappers_are_peeled() {
        let depth = 20_000;
        let text = format!("{}x{}", "@@@".repeat(depth), "!!!".repeat(depth));
        assert_eq!(decode(&text), Value::from("x"));
        assert_eq!(decode_strict(&text), Ok(Value::from("x")));
        let extended = Decoder::new(&text, DecodeOptions::extended()).decode();
        assert_eq!(extended, Ok(Value::from("x")));
    }

    #[test]
    fn test_container_depth_limit() {
        let levels = MAX_DEPTH + 72;
        let text = format!("{}@@@x!!!{}", "[[[".repeat(levels), "]]]".repeat(levels));

        let value = Decoder::new(&text, DecodeOptions::extended()).decode().unwrap();
        let mut node = &value;
        for _ in 0..MAX_DEPTH {
            assert!(node.is_array());
            node = &node[0];
        }
        let rest = format!("{}@@@x!!!{}", "[[[".repeat(72), "]]]".repeat(72));
        assert_eq!(node.as_str(), Some(rest.as_str()));

        let options = DecodeOptions::extended().with_mode(Mode::Strict);
        assert_eq!(
            Decoder::new(&text, options).decode(),
            Err(Error::unexpected_nesting_depth(1, MAX_DEPTH * 3 + 1))
        );
    }

    #[test]
    fn test_unterminated_nested_members_stay_bounded() {
        let text = "###@@@k!!!@@@".repeat(1_000);
        let value = decode(&text);
        let mut node = &value;
        for _ in 0..MAX_DEPTH {
            assert!(node.is_object());
            node = &node["k"];
        }
        assert!(node.is_string());
    }

    #[test]
    fn test_line_col_counts_chars() {
        let decoder = Decoder::new("ab\ncé\n@@@x", DecodeOptions::strict());
        assert_eq!(decoder.line_col(0), (1, 1));
        assert_eq!(decoder.line_col(3), (2, 1));
        assert_eq!(decoder.line_col(7), (3, 1));
        assert_eq!(decoder.decode(), Err(Error::unterminated_value(3, 1)));
    }
}
