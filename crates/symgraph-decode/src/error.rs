//! Error taxonomy.
//!
//! Two tiers, mirroring the teacher crate's `ParserError`/`SyntaxError` split:
//! a tiny internal [`ScanError`] used to unwind within the low-level scanner,
//! and the external [`DecodingError`] that the public `decode` entry point
//! returns, carrying a rendered [`crate::path`] for diagnostics.

use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::path::RenderedPath;

/// Internal scanner error. Never escapes the crate; every public boundary
/// maps it into a [`DecodingError`] variant (see [`ScanError::into_type_mismatch`]
/// and [`ScanError::into_data_corrupted`]).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanError {
    /// A structural or literal byte did not match what was expected.
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// The cursor ran past the end of the buffer mid-token.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A digit run was too long to represent losslessly; always a corruption,
    /// never a "wrong shape" type mismatch, regardless of decode context.
    #[error("integer literal overflowed")]
    Overflow,
}

/// A human-readable description of what byte-shape was actually found at the
/// point of a type mismatch, derived by peeking at the current byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundDescription {
    /// Current byte starts a JSON string (`"`).
    AString,
    /// Current byte starts a JSON boolean literal (`t`/`f`).
    Bool,
    /// Current byte starts a JSON number (`-` or `0`..=`9`).
    Number,
    /// Current byte starts a JSON object (`{`).
    ADictionary,
    /// Current byte starts a JSON array (`[`).
    AnArray,
    /// The input is exhausted or the byte does not start any JSON value.
    InvalidJson,
}

impl fmt::Display for FoundDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FoundDescription::AString => "a string",
            FoundDescription::Bool => "bool",
            FoundDescription::Number => "number",
            FoundDescription::ADictionary => "a dictionary",
            FoundDescription::AnArray => "an array",
            FoundDescription::InvalidJson => "invalid JSON",
        };
        f.write_str(s)
    }
}

impl FoundDescription {
    /// Classifies the byte at the decoder's current position, for embedding
    /// in a [`DecodingError::TypeMismatch`].
    #[must_use]
    pub(crate) fn classify(byte: Option<u8>) -> Self {
        match byte {
            Some(b'"') => FoundDescription::AString,
            Some(b't' | b'f') => FoundDescription::Bool,
            Some(b'-' | b'0'..=b'9') => FoundDescription::Number,
            Some(b'{') => FoundDescription::ADictionary,
            Some(b'[') => FoundDescription::AnArray,
            _ => FoundDescription::InvalidJson,
        }
    }
}

/// The public error surface returned by [`crate::decode::decode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodingError {
    /// A schema-declared required field was never seen.
    #[error("key not found: {key_name:?} at {path}")]
    KeyNotFound {
        /// The field's declared name.
        key_name: String,
        /// Path to the enclosing object.
        path: RenderedPath,
    },
    /// A value's JSON shape did not match the type the schema expected.
    #[error("type mismatch: expected {expected_type_name}, found {found} at {path}")]
    TypeMismatch {
        /// The schema type that was being decoded.
        expected_type_name: &'static str,
        /// Path to the offending value.
        path: RenderedPath,
        /// What shape was actually present.
        found: FoundDescription,
    },
    /// A literal `null` was found where a non-optional `T` was expected.
    /// Reported distinctly from [`DecodingError::TypeMismatch`] so consumers
    /// can distinguish "wrong shape" from "present-but-absent".
    #[error("value not found: expected {expected_type_name} at {path}")]
    ValueNotFound {
        /// The schema type that was being decoded.
        expected_type_name: &'static str,
        /// Path to the offending value.
        path: RenderedPath,
    },
    /// Any structural violation: integer overflow, unrecognized escape,
    /// path-stack depth exceeded, or unexpected end of file.
    #[error("data corrupted at {path}: {detail}")]
    DataCorrupted {
        /// Path to the point of failure.
        path: RenderedPath,
        /// A short, static description of what went wrong.
        detail: &'static str,
    },
}

impl ScanError {
    /// Maps a scanner error observed while decoding a concrete type into a
    /// `TypeMismatch`/`ValueNotFound` diagnostic.
    pub(crate) fn into_type_mismatch(
        self,
        expected_type_name: &'static str,
        path: RenderedPath,
        found: FoundDescription,
    ) -> DecodingError {
        match self {
            ScanError::UnexpectedCharacter => DecodingError::TypeMismatch {
                expected_type_name,
                path,
                found,
            },
            ScanError::UnexpectedEof => DecodingError::DataCorrupted {
                path,
                detail: "unexpected end of input",
            },
            ScanError::Overflow => DecodingError::DataCorrupted {
                path,
                detail: "integer literal too large",
            },
        }
    }

    /// Maps a scanner error observed while skipping an unknown value (or any
    /// other structural operation) into `DataCorrupted`.
    pub(crate) fn into_data_corrupted(self, path: RenderedPath, detail: &'static str) -> DecodingError {
        let _ = self;
        DecodingError::DataCorrupted { path, detail }
    }
}
