//! A dynamic, self-describing decode target for input whose full schema
//! isn't known ahead of time — a debugging/exploration aid, not the
//! recommended way to consume a symbol graph document (write a `Decode` impl
//! over the schema instead; it keeps the wide-compare key-match ladder and
//! skips the intermediate allocation this type always pays for).

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::decode::{Decode, Decoder, JsonScalar};
use crate::error::{DecodingError, FoundDescription};
use crate::scan;

/// Any JSON value, decoded without a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A number with no fractional part or exponent.
    Integer(i64),
    /// A number with a fractional part and/or exponent.
    Float(f64),
    /// A JSON string, already escape-decoded.
    String(String),
    /// A JSON array, in source order.
    Array(Vec<Value>),
    /// A JSON object, keyed by field name; duplicate keys keep the
    /// last-seen value, matching the rest of the decoder.
    Object(BTreeMap<String, Value>),
}

impl Decode for Value {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(dec.cursor_mut());
        match dec.cursor().peek() {
            Some(b'{') => dec.decode_map::<Value>().map(Value::Object),
            Some(b'[') => dec.decode_array::<Value>().map(Value::Array),
            Some(b'"' | b't' | b'f' | b'n' | b'-' | b'0'..=b'9') => match JsonScalar::decode(dec)? {
                JsonScalar::Null => Ok(Value::Null),
                JsonScalar::Bool(b) => Ok(Value::Bool(b)),
                JsonScalar::String(s) => Ok(Value::String(s)),
                JsonScalar::Integer(i) => Ok(Value::Integer(i)),
                JsonScalar::Float(f) => Ok(Value::Float(f)),
            },
            other => Err(DecodingError::TypeMismatch {
                expected_type_name: "a value",
                path: dec.render_path(),
                found: FoundDescription::classify(other),
            }),
        }
    }
}
