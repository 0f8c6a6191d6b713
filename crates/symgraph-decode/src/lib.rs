//! A streaming, schema-directed JSON decoder specialized for symbol-graph
//! documents: schema code drives the decoder field-by-field instead of the
//! decoder building a generic value tree first, so unrecognized structure is
//! skipped without ever being materialized.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod byte_search;
mod cursor;
mod decode;
mod error;
mod options;
mod path;
mod scan;
mod value;

pub use decode::{Decode, Decoder, JsonNumber, JsonScalar, decode, decode_with_options};
pub use error::{DecodingError, FoundDescription};
pub use options::DecoderOptions;
pub use path::{RenderedComponent, RenderedPath};
pub use value::Value;
