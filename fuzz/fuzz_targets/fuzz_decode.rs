#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value as JsonValue};
use symgraph_decode::{Decode, Decoder, DecodingError, Value, decode};

thread_local! {
    // One SmallRng per thread, seeded once from the host OS.
    static RNG: std::cell::RefCell<SmallRng> = std::cell::RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// A small, bounded generator for arbitrary JSON documents. Skewed toward
/// producing well-formed JSON (rather than raw byte soup) so the decoder's
/// structural paths — nested objects/arrays, every escape, every number
/// shape — get exercised far more often than libFuzzer's default byte
/// mutations would manage on their own.
#[derive(Debug)]
struct ArbitraryDocument(JsonValue);

impl<'a> Arbitrary<'a> for ArbitraryDocument {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => JsonValue::Null,
            1 => JsonValue::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                JsonValue::Number(serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?)
            }
            3..=10 => JsonValue::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryDocument> = u.arbitrary()?;
                JsonValue::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let entries: Vec<(String, ArbitraryDocument)> = u.arbitrary()?;
                JsonValue::Object(Map::from_iter(entries.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => return Err(arbitrary::Error::IncorrectFormat),
        };
        Ok(ArbitraryDocument(value))
    }
}

/// Periodically overwrites the corpus entry with a freshly generated,
/// well-formed JSON document instead of deferring to libFuzzer's generic byte
/// mutator, the same trick the teacher lineage uses to keep a byte-oriented
/// fuzzer from spending almost all its budget on inputs that die at the very
/// first lexical token.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if seed.is_multiple_of(4) {
        return fuzzer_mutate(data, size, max_size);
    }
    let value = loop {
        let sample_len = with_rng(|rng| rng.random_range(size.max(1)..=max_size.max(size.max(1) + 1)));
        let scratch: Vec<u8> = with_rng(|rng| (0..sample_len).map(|_| rng.random::<u8>()).collect());
        match ArbitraryDocument::arbitrary(&mut arbitrary::Unstructured::new(&scratch)) {
            Ok(doc) => break doc,
            Err(_) => continue,
        }
    };
    let serialized = serde_json::to_vec(&value.0).expect("arbitrary JSON always serializes");
    let len = serialized.len().min(max_size);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// A schema shaped like a small slice of a symbol graph document, so the
/// key-match fast paths and `ignore_value` get driven alongside the dynamic
/// `Value` target rather than only the latter.
struct Symbol {
    id: String,
    kind: String,
    doc: Option<String>,
    tags: Vec<String>,
}

impl Decode for Symbol {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut id = None;
        let mut kind = None;
        let mut doc = None;
        let mut tags = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"id") {
                id = Some(dec.decode()?);
            } else if dec.match_key(b"kind") {
                kind = Some(dec.decode()?);
            } else if dec.match_key(b"doc") {
                doc = Some(dec.decode()?);
            } else if dec.match_key(b"tags") {
                tags = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Symbol {
            id: dec.require(id, "id")?,
            kind: dec.require(kind, "kind")?,
            doc: doc.flatten(),
            tags: tags.unwrap_or_default(),
        })
    }
}

fn run(data: &[u8]) {
    // No equivalence check against `serde_json` here: this decoder's
    // documented leniences (accepted leading zeros) and deliberate
    // over-approximations (any digit run of 19+ rejected as corrupted even
    // when it would fit a `u64`) mean "serde_json accepted it" and "we
    // accept it" are expected to diverge on crafted inputs. The property
    // under test is simply that no input, however malformed, ever panics —
    // every path through the dynamic `Value` target and the keyed-object
    // driver's fast paths must return a `DecodingError` instead.
    let _: Result<Value, DecodingError> = decode(data);
    let _: Result<Symbol, DecodingError> = decode(data);
    let _: Result<Vec<Symbol>, DecodingError> = decode(data);
}

fuzz_target!(|data: &[u8]| run(data));
