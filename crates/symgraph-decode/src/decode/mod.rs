//! The keyed-object driver: [`Decoder`], the five operations schema code
//! drives it with, and the [`Decode`] trait plus its built-in implementations.
//!
//! A `Decoder` wraps a [`Cursor`] over the whole input, a [`PathStack`] used
//! only for diagnostics, and the active [`DecoderOptions`]. Schema authors
//! never touch the cursor or path stack directly; they write a `Decode` impl
//! shaped like:
//!
//! ```rust
//! use symgraph_decode::{Decode, DecodingError};
//! # use symgraph_decode::Decoder;
//!
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl Decode for Point {
//!     fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
//!         dec.descend_into_object()?;
//!         let mut x = None;
//!         let mut y = None;
//!         while dec.advance_to_next_key()? {
//!             if dec.match_key(b"x") {
//!                 x = Some(dec.decode()?);
//!             } else if dec.match_key(b"y") {
//!                 y = Some(dec.decode()?);
//!             } else {
//!                 dec.ignore_value()?;
//!             }
//!         }
//!         Ok(Point {
//!             x: dec.require(x, "x")?,
//!             y: dec.require(y, "y")?,
//!         })
//!     }
//! }
//! ```

pub(crate) mod key_match;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::instrument;

use crate::cursor::Cursor;
use crate::error::{DecodingError, FoundDescription, ScanError};
use crate::options::DecoderOptions;
use crate::path::{PathStack, RenderedPath};
use crate::scan;

/// Types that can be produced from a keyed-object (or scalar) decode driver.
///
/// Implemented for `bool`, `i64`, `String`, `Vec<T>`, `Option<T>`,
/// `BTreeMap<String, T>`, [`crate::value::Value`], and any schema type whose
/// own `decode` function is written in terms of the five driver operations on
/// [`Decoder`].
pub trait Decode: Sized {
    /// Decodes one value of `Self` starting at the decoder's current
    /// position, leaving the cursor immediately past it on success.
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError>;
}

/// Drives a single top-to-bottom decode of one input buffer against one
/// schema type `T: Decode`.
///
/// Every recursive entry point is [`Decoder::decode`], which snapshots the
/// path stack's depth on entry and unwinds back to it on exit — success or
/// failure — so a partially-decoded nested value can never leave stray
/// components on the stack for an enclosing frame to trip over.
pub struct Decoder<'src> {
    cursor: Cursor<'src>,
    path: PathStack,
    options: DecoderOptions,
    /// Base depths of currently-open objects, one entry per nested
    /// `descend_into_object` call still in progress. Lets
    /// `advance_to_next_key` tell "a key this object pushed is still
    /// pending" apart from "the path-stack top belongs to an enclosing
    /// object's key", even though both share one `PathStack`.
    object_bases: Vec<usize>,
}

impl<'src> Decoder<'src> {
    fn new(bytes: &'src [u8], options: DecoderOptions) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            path: PathStack::new(options.max_path_depth),
            options,
            object_bases: Vec::new(),
        }
    }

    pub(crate) fn render_path(&self) -> RenderedPath {
        self.path.render(self.cursor.input())
    }

    fn depth_exceeded(&self) -> DecodingError {
        DecodingError::DataCorrupted {
            path: self.render_path(),
            detail: "path depth exceeded",
        }
    }

    fn corrupted(&self, detail: &'static str) -> DecodingError {
        DecodingError::DataCorrupted {
            path: self.render_path(),
            detail,
        }
    }

    fn mismatch(&self, err: ScanError, expected_type_name: &'static str) -> DecodingError {
        let found = FoundDescription::classify(self.cursor.peek());
        err.into_type_mismatch(expected_type_name, self.render_path(), found)
    }

    fn structural(&self, err: ScanError, detail: &'static str) -> DecodingError {
        err.into_data_corrupted(self.render_path(), detail)
    }

    /// Requires that a schema-declared field was actually seen, turning a
    /// missing `Option` accumulator into a [`DecodingError::KeyNotFound`].
    pub fn require<T>(&self, value: Option<T>, key_name: &str) -> Result<T, DecodingError> {
        value.ok_or_else(|| DecodingError::KeyNotFound {
            key_name: String::from(key_name),
            path: self.render_path(),
        })
    }

    /// Descends into an object: skips whitespace, requires `{`, and opens a
    /// new key-tracking scope for the subsequent `advance_to_next_key` calls.
    pub fn descend_into_object(&mut self) -> Result<(), DecodingError> {
        scan::descend_object(&mut self.cursor).map_err(|e| self.mismatch(e, "a dictionary"))?;
        self.object_bases.push(self.path.depth());
        Ok(())
    }

    /// Advances to the next key of the object opened by the innermost
    /// still-open [`Decoder::descend_into_object`] call.
    ///
    /// Pops the previously pushed key (if any) for *this* object before
    /// looking at the next token, so a schema author's `while` loop never has
    /// to manage path bookkeeping itself. Returns `false` once `}` is
    /// reached, having consumed it and closed this object's scope.
    pub fn advance_to_next_key(&mut self) -> Result<bool, DecodingError> {
        let base = *self
            .object_bases
            .last()
            .expect("advance_to_next_key called without a matching descend_into_object");
        if self.path.depth() > base {
            self.path.pop();
        }
        scan::skip_whitespace(&mut self.cursor);
        match self.cursor.peek() {
            Some(b'}') => {
                self.cursor.advance(1);
                self.object_bases.pop();
                Ok(false)
            }
            Some(b',') => {
                self.cursor.advance(1);
                scan::skip_whitespace(&mut self.cursor);
                self.begin_key()
            }
            Some(b'"') => self.begin_key(),
            _ => Err(self.corrupted("expected ',' or '}'")),
        }
    }

    fn begin_key(&mut self) -> Result<bool, DecodingError> {
        if self.cursor.peek() != Some(b'"') {
            return Err(self.corrupted("expected an object key"));
        }
        self.cursor.advance(1);
        let key_byte_ptr = self.cursor.pos();
        if !self.path.push_key(key_byte_ptr) {
            return Err(self.depth_exceeded());
        }
        Ok(true)
    }

    /// Tests the current key against a compile-time ASCII literal. On a
    /// match, advances past the key's closing `"` and the following `:`
    /// (plus any intervening whitespace), positioning the cursor at the
    /// value. On a miss, the cursor is left exactly where it was.
    #[must_use]
    pub fn match_key<const N: usize>(&mut self, literal: &[u8; N]) -> bool {
        if !key_match::key_matches(&self.cursor, literal, 0) {
            return false;
        }
        self.cursor.advance(N + 1); // remaining key content/quote already matched, plus the closing quote
        self.finish_key_match()
    }

    /// The *encoding trick* variant of [`Decoder::match_key`]: `literal` bakes
    /// the leading `"` into byte 0 (so `byte_offset = -1` reaches back to the
    /// quote `advance_to_next_key` just consumed) and the trailing `"` into
    /// its last byte, folding the terminator check into the same wide
    /// compare instead of checking it separately.
    #[must_use]
    pub fn match_key_packed<const N: usize>(&mut self, literal: &[u8; N]) -> bool {
        debug_assert!(N >= 2, "packed literal must bake in at least the trailing quote");
        if !key_match::key_matches_packed(&self.cursor, literal, -1) {
            return false;
        }
        self.cursor.advance(N - 1); // pos is one byte past the opening quote; literal covers it plus N-1 more
        self.finish_key_match()
    }

    fn finish_key_match(&mut self) -> bool {
        scan::skip_whitespace(&mut self.cursor);
        if self.cursor.peek() == Some(b':') {
            self.cursor.advance(1);
            scan::skip_whitespace(&mut self.cursor);
            true
        } else {
            // Malformed input: a colon must follow a key. Schema code reads
            // a `false` here as "try the next key", which will fail loudly
            // on the very next operation since the cursor didn't move past
            // valid JSON; there's no silent misparse.
            false
        }
    }

    /// Skips the unknown value belonging to the key `advance_to_next_key`
    /// just returned, without allocating or surfacing its shape. The key's
    /// own bytes (content + closing quote) haven't been consumed yet, since
    /// no `match_key` call claimed them; this rewinds to the opening quote
    /// and lets the ordinary string scanner consume them before the `:` and
    /// the value.
    pub fn ignore_value(&mut self) -> Result<(), DecodingError> {
        self.cursor.rewind_one();
        scan::scan_string(&mut self.cursor).map_err(|e| self.structural(e, "invalid object key"))?;
        scan::skip_whitespace(&mut self.cursor);
        if self.cursor.peek() != Some(b':') {
            return Err(self.corrupted("expected ':' after object key"));
        }
        self.cursor.advance(1);
        scan::skip_value(&mut self.cursor).map_err(|e| self.structural(e, "invalid value"))?;
        Ok(())
    }

    /// Decodes one value of type `T`, restoring the path stack to the depth
    /// it had on entry regardless of whether `T::decode` succeeds — this is
    /// what makes every other driver operation's push/pop pairing safe to
    /// reason about locally, even across an error exit via `?`.
    pub fn decode<T: Decode>(&mut self) -> Result<T, DecodingError> {
        let path_depth_before = self.path.depth();
        let bases_before = self.object_bases.len();
        let result = T::decode(self);
        while self.path.depth() > path_depth_before {
            self.path.pop();
        }
        self.object_bases.truncate(bases_before);
        result
    }

    /// Decodes a string-keyed map by descending into an object and, for each
    /// key, recovering its spelling via the one controlled cursor rewind
    /// rather than matching it against a fixed literal set.
    ///
    /// Each entry's `Key` path component is pushed and popped by the same
    /// `advance_to_next_key`/`object_bases` bookkeeping that keyed-struct
    /// decoding uses; there is no separate index to track here.
    pub fn decode_map<T: Decode>(&mut self) -> Result<BTreeMap<String, T>, DecodingError> {
        self.descend_into_object()?;
        self.decode_map_entries::<T>()
    }

    fn decode_map_entries<T: Decode>(&mut self) -> Result<BTreeMap<String, T>, DecodingError> {
        let mut out = BTreeMap::new();
        while self.advance_to_next_key()? {
            self.cursor.rewind_one();
            let raw = scan::scan_string(&mut self.cursor).map_err(|e| self.structural(e, "invalid object key"))?;
            let key = if raw.is_trivial {
                core::str::from_utf8(raw.bytes)
                    .map_err(|_| self.corrupted("object key is not valid UTF-8"))?
                    .into()
            } else {
                scan::decode_string_escapes(raw.bytes).map_err(|e| self.structural(e, "invalid key escape"))?
            };
            scan::skip_whitespace(&mut self.cursor);
            if self.cursor.peek() != Some(b':') {
                return Err(self.corrupted("expected ':' after object key"));
            }
            self.cursor.advance(1);
            scan::skip_whitespace(&mut self.cursor);
            let value = self.decode::<T>()?;
            out.insert(key, value);
        }
        Ok(out)
    }

    /// Decodes a JSON array of `T`, tracking the in-progress element's index
    /// for diagnostics.
    pub fn decode_array<T: Decode>(&mut self) -> Result<Vec<T>, DecodingError> {
        scan::descend_array(&mut self.cursor).map_err(|e| self.mismatch(e, "an array"))?;
        if !self.path.push_index() {
            return Err(self.depth_exceeded());
        }
        let result = self.decode_array_elements::<T>();
        self.path.pop();
        result
    }

    fn decode_array_elements<T: Decode>(&mut self) -> Result<Vec<T>, DecodingError> {
        let mut out = Vec::new();
        scan::skip_whitespace(&mut self.cursor);
        if self.cursor.peek() == Some(b']') {
            self.cursor.advance(1);
            return Ok(out);
        }
        loop {
            out.push(self.decode::<T>()?);
            self.path.increment_index();
            scan::skip_whitespace(&mut self.cursor);
            match self.cursor.peek() {
                Some(b',') => {
                    self.cursor.advance(1);
                    scan::skip_whitespace(&mut self.cursor);
                }
                Some(b']') => {
                    self.cursor.advance(1);
                    return Ok(out);
                }
                _ => return Err(self.corrupted("expected ',' or ']'")),
            }
        }
    }

    /// True iff the current position is the start of a `null` literal
    /// (without consuming it). Used by [`Option<T>`]'s `Decode` impl and
    /// available to hand-written schema code that wants the same probe.
    #[must_use]
    pub fn peek_is_null(&self) -> bool {
        let mut probe = self.cursor;
        scan::skip_whitespace(&mut probe);
        probe.input()[probe.pos()..].starts_with(b"null")
    }

    pub(crate) fn options(&self) -> DecoderOptions {
        self.options
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut Cursor<'src> {
        &mut self.cursor
    }

    pub(crate) fn cursor(&self) -> &Cursor<'src> {
        &self.cursor
    }
}

impl Decode for bool {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        if dec.cursor.peek() == Some(b'n') && scan::scan_null(&mut dec.cursor) {
            return Err(DecodingError::ValueNotFound {
                expected_type_name: "bool",
                path: dec.render_path(),
            });
        }
        scan::scan_bool(&mut dec.cursor).map_err(|e| dec.mismatch(e, "bool"))
    }
}

impl Decode for i64 {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        if dec.cursor.peek() == Some(b'n') && scan::scan_null(&mut dec.cursor) {
            return Err(DecodingError::ValueNotFound {
                expected_type_name: "i64",
                path: dec.render_path(),
            });
        }
        let strict = dec.options.strict_leading_zeros;
        scan::scan_integer(&mut dec.cursor, strict).map_err(|e| dec.mismatch(e, "i64"))
    }
}

impl Decode for String {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        if dec.cursor.peek() == Some(b'n') && scan::scan_null(&mut dec.cursor) {
            return Err(DecodingError::ValueNotFound {
                expected_type_name: "String",
                path: dec.render_path(),
            });
        }
        let raw = scan::scan_string(&mut dec.cursor).map_err(|e| dec.mismatch(e, "a string"))?;
        if raw.is_trivial {
            core::str::from_utf8(raw.bytes)
                .map(String::from)
                .map_err(|_| dec.corrupted("string is not valid UTF-8"))
        } else {
            scan::decode_string_escapes(raw.bytes).map_err(|e| dec.structural(e, "invalid string escape"))
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        if dec.cursor.peek() == Some(b'n') && scan::scan_null(&mut dec.cursor) {
            return Ok(None);
        }
        T::decode(dec).map(Some)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        if dec.cursor.peek() == Some(b'n') && scan::scan_null(&mut dec.cursor) {
            return Err(DecodingError::ValueNotFound {
                expected_type_name: "array",
                path: dec.render_path(),
            });
        }
        dec.decode_array::<T>()
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        if dec.cursor.peek() == Some(b'n') && scan::scan_null(&mut dec.cursor) {
            return Err(DecodingError::ValueNotFound {
                expected_type_name: "dictionary",
                path: dec.render_path(),
            });
        }
        dec.decode_map::<T>()
    }
}

/// A JSON number whose lexical shape (integer vs. floating-point) is not
/// known ahead of time. One of the two extension points the engine hardcodes
/// private cursor access for, since distinguishing the two shapes requires
/// re-running `number_scan` rather than dispatching through `Decode`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    /// A digit run with no `.` or exponent, parsed as `i64`.
    Integer(i64),
    /// Any number with a fractional part or exponent, parsed as `f64`.
    Float(f64),
}

impl Decode for JsonNumber {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        if dec.cursor.peek() == Some(b'n') && scan::scan_null(&mut dec.cursor) {
            return Err(DecodingError::ValueNotFound {
                expected_type_name: "number",
                path: dec.render_path(),
            });
        }
        let strict = dec.options.strict_leading_zeros;
        let info = scan::number_scan(dec.cursor(), strict).map_err(|e| dec.mismatch(e, "number"))?;
        if info.is_float || info.has_exponent {
            let start = dec.cursor().pos();
            let text = core::str::from_utf8(&dec.cursor().input()[start..start + info.len])
                .expect("number_scan only ever matches ASCII bytes");
            let value: f64 = text.parse().map_err(|_| dec.corrupted("malformed floating-point literal"))?;
            dec.cursor_mut().advance(info.len);
            Ok(JsonNumber::Float(value))
        } else {
            scan::scan_integer(&mut dec.cursor, strict)
                .map(JsonNumber::Integer)
                .map_err(|e| dec.mismatch(e, "number"))
        }
    }
}

/// Any JSON scalar: string, bool, null, integer, or float, but never an
/// array or object. The second hardcoded extension point, used by
/// [`crate::value::Value`] to recurse without re-deriving number-shape
/// detection.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonScalar {
    /// A literal `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A JSON string, already escape-decoded.
    String(String),
    /// A number with no fractional part or exponent.
    Integer(i64),
    /// A number with a fractional part and/or exponent.
    Float(f64),
}

impl Decode for JsonScalar {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        scan::skip_whitespace(&mut dec.cursor);
        match dec.cursor.peek() {
            Some(b'n') if scan::scan_null(&mut dec.cursor) => Ok(JsonScalar::Null),
            Some(b't' | b'f') => scan::scan_bool(&mut dec.cursor)
                .map(JsonScalar::Bool)
                .map_err(|e| dec.mismatch(e, "a scalar")),
            Some(b'"') => String::decode(dec).map(JsonScalar::String),
            Some(b'-' | b'0'..=b'9') => match JsonNumber::decode(dec)? {
                JsonNumber::Integer(i) => Ok(JsonScalar::Integer(i)),
                JsonNumber::Float(f) => Ok(JsonScalar::Float(f)),
            },
            _ => Err(DecodingError::TypeMismatch {
                expected_type_name: "a scalar",
                path: dec.render_path(),
                found: FoundDescription::classify(dec.cursor.peek()),
            }),
        }
    }
}

/// Decodes a full document of type `T` from `bytes`, using `options` to
/// configure path-depth capacity and numeric leniency.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_with_options<T: Decode>(bytes: &[u8], options: DecoderOptions) -> Result<T, DecodingError> {
    let mut dec = Decoder::new(bytes, options);
    let result = dec.decode::<T>();
    // Every push onto the path stack is paired with a pop on all exits,
    // including error exits, via `Decoder::decode`'s depth-snapshot-and-
    // truncate restoration; under fuzzing this is checked on every call
    // instead of only in the test suite, so a counterexample aborts where it
    // was produced rather than needing a dedicated property test to surface.
    #[cfg(any(test, feature = "fuzzing"))]
    assert_eq!(dec.path.depth(), 0, "path stack imbalanced after top-level decode");
    let value = result?;
    scan::skip_whitespace(&mut dec.cursor);
    if dec.cursor.remaining() != 0 {
        return Err(dec.corrupted("trailing data after top-level value"));
    }
    tracing::debug!("document decoded");
    Ok(value)
}

/// Decodes a full document of type `T` from `bytes` using
/// [`DecoderOptions::default`].
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T, DecodingError> {
    decode_with_options(bytes, DecoderOptions::default())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Decode for Point {
        fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
            dec.descend_into_object()?;
            let mut x = None;
            let mut y = None;
            while dec.advance_to_next_key()? {
                if dec.match_key(b"x") {
                    x = Some(dec.decode()?);
                } else if dec.match_key(b"y") {
                    y = Some(dec.decode()?);
                } else {
                    dec.ignore_value()?;
                }
            }
            Ok(Point {
                x: dec.require(x, "x")?,
                y: dec.require(y, "y")?,
            })
        }
    }

    #[test]
    fn decodes_a_flat_object() {
        let p: Point = decode(br#"{"x": 1, "y": 2}"#).unwrap();
        assert_eq!(p, Point { x: 1, y: 2 });
    }

    #[test]
    fn field_order_is_irrelevant() {
        let p: Point = decode(br#"{"y": 2, "x": 1}"#).unwrap();
        assert_eq!(p, Point { x: 1, y: 2 });
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let p: Point = decode(br#"{"z": [1,2,{"q":null}], "x": 1, "y": 2}"#).unwrap();
        assert_eq!(p, Point { x: 1, y: 2 });
    }

    #[test]
    fn missing_required_key_is_key_not_found() {
        let err = decode::<Point>(br#"{"x": 1}"#).unwrap_err();
        assert!(matches!(err, DecodingError::KeyNotFound { .. }));
    }

    #[test]
    fn wrong_shape_is_type_mismatch() {
        let err = decode::<Point>(br#"{"x": "nope", "y": 2}"#).unwrap_err();
        assert!(matches!(err, DecodingError::TypeMismatch { .. }));
    }

    #[test]
    fn null_on_required_field_is_value_not_found() {
        let err = decode::<Point>(br#"{"x": null, "y": 2}"#).unwrap_err();
        assert!(matches!(err, DecodingError::ValueNotFound { .. }));
    }

    #[test]
    fn nested_objects_and_arrays_round_trip() {
        #[derive(Debug, PartialEq)]
        struct Doc {
            points: Vec<Point>,
            label: Option<String>,
        }
        impl Decode for Doc {
            fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
                dec.descend_into_object()?;
                let mut points = None;
                let mut label = None;
                while dec.advance_to_next_key()? {
                    if dec.match_key(b"points") {
                        points = Some(dec.decode()?);
                    } else if dec.match_key(b"label") {
                        label = Some(dec.decode()?);
                    } else {
                        dec.ignore_value()?;
                    }
                }
                Ok(Doc {
                    points: dec.require(points, "points")?,
                    label: label.flatten(),
                })
            }
        }
        let doc: Doc = decode(br#"{"points": [{"x":1,"y":2},{"x":3,"y":4}], "label": null}"#).unwrap();
        assert_eq!(
            doc,
            Doc {
                points: vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }],
                label: None,
            }
        );
    }

    #[test]
    fn map_decode_recovers_arbitrary_keys() {
        let m: BTreeMap<String, i64> = decode(br#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m["b"], 2);
    }

    #[test]
    fn path_stack_balances_after_a_failing_nested_decode() {
        #[derive(Debug)]
        struct Outer {
            #[allow(dead_code)]
            inner: Point,
        }
        impl Decode for Outer {
            fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
                dec.descend_into_object()?;
                let mut inner = None;
                while dec.advance_to_next_key()? {
                    if dec.match_key(b"inner") {
                        inner = Some(dec.decode()?);
                    } else {
                        dec.ignore_value()?;
                    }
                }
                Ok(Outer {
                    inner: dec.require(inner, "inner")?,
                })
            }
        }
        let bytes = br#"{"inner": {"x": "not a number", "y": 2}}"#;
        let err = decode::<Outer>(bytes).unwrap_err();
        assert!(matches!(err, DecodingError::TypeMismatch { .. }));
    }

    #[test]
    fn path_and_object_bases_are_empty_after_a_failing_decode() {
        // Same shape as the black-box test above, but drives a `Decoder`
        // directly so the internal bookkeeping can be inspected.
        #[derive(Debug)]
        struct Outer {
            #[allow(dead_code)]
            inner: Point,
        }
        impl Decode for Outer {
            fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
                dec.descend_into_object()?;
                let mut inner = None;
                while dec.advance_to_next_key()? {
                    if dec.match_key(b"inner") {
                        inner = Some(dec.decode()?);
                    } else {
                        dec.ignore_value()?;
                    }
                }
                Ok(Outer {
                    inner: dec.require(inner, "inner")?,
                })
            }
        }
        let bytes: &[u8] = br#"{"inner": {"x": "not a number", "y": 2}}"#;
        let mut dec = Decoder::new(bytes, DecoderOptions::default());
        let result = dec.decode::<Outer>();
        assert!(result.is_err());
        assert_eq!(dec.path.depth(), 0);
        assert!(dec.object_bases.is_empty());
    }

    #[test]
    fn path_is_empty_after_a_successful_nested_decode() {
        let bytes: &[u8] = br#"{"points": [{"x":1,"y":2}], "label": null}"#;
        #[derive(Debug)]
        struct Doc {
            #[allow(dead_code)]
            points: Vec<Point>,
        }
        impl Decode for Doc {
            fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
                dec.descend_into_object()?;
                let mut points = None;
                while dec.advance_to_next_key()? {
                    if dec.match_key(b"points") {
                        points = Some(dec.decode()?);
                    } else {
                        dec.ignore_value()?;
                    }
                }
                Ok(Doc {
                    points: dec.require(points, "points")?,
                })
            }
        }
        let mut dec = Decoder::new(bytes, DecoderOptions::default());
        let result = dec.decode::<Doc>();
        assert!(result.is_ok());
        assert_eq!(dec.path.depth(), 0);
        assert!(dec.object_bases.is_empty());
    }

    #[test]
    fn json_number_distinguishes_integer_and_float() {
        assert_eq!(decode::<JsonNumber>(b"42").unwrap(), JsonNumber::Integer(42));
        assert_eq!(decode::<JsonNumber>(b"4.5").unwrap(), JsonNumber::Float(4.5));
    }

    #[test]
    fn json_scalar_covers_every_leaf_shape() {
        assert_eq!(decode::<JsonScalar>(b"null").unwrap(), JsonScalar::Null);
        assert_eq!(decode::<JsonScalar>(b"true").unwrap(), JsonScalar::Bool(true));
        assert_eq!(
            decode::<JsonScalar>(br#""hi""#).unwrap(),
            JsonScalar::String(std::string::String::from("hi"))
        );
        assert_eq!(decode::<JsonScalar>(b"7").unwrap(), JsonScalar::Integer(7));
        assert_eq!(decode::<JsonScalar>(b"7.5").unwrap(), JsonScalar::Float(7.5));
    }
}
