//! Decodes a small symbol-graph fixture against a hand-written schema,
//! exercising `descend_into_object`/`match_key`/`ignore_value` end to end.

use symgraph_decode::{Decode, Decoder, DecodingError, decode};

#[derive(Debug)]
struct Relationship {
    from: String,
    to: String,
    kind: String,
}

impl Decode for Relationship {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut from = None;
        let mut to = None;
        let mut kind = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"from") {
                from = Some(dec.decode()?);
            } else if dec.match_key(b"to") {
                to = Some(dec.decode()?);
            } else if dec.match_key(b"kind") {
                kind = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Relationship {
            from: dec.require(from, "from")?,
            to: dec.require(to, "to")?,
            kind: dec.require(kind, "kind")?,
        })
    }
}

#[derive(Debug)]
struct Symbol {
    id: String,
    kind: String,
    doc: Option<String>,
}

impl Decode for Symbol {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut id = None;
        let mut kind = None;
        let mut doc = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"id") {
                id = Some(dec.decode()?);
            } else if dec.match_key(b"kind") {
                kind = Some(dec.decode()?);
            } else if dec.match_key(b"doc") {
                doc = Some(dec.decode()?);
            } else {
                // Unrecognized fields (e.g. `location`, `visibility`) are
                // skipped without being parsed into anything.
                dec.ignore_value()?;
            }
        }
        Ok(Symbol {
            id: dec.require(id, "id")?,
            kind: dec.require(kind, "kind")?,
            doc: doc.flatten(),
        })
    }
}

#[derive(Debug)]
struct SymbolGraph {
    symbols: Vec<Symbol>,
    relationships: Vec<Relationship>,
}

impl Decode for SymbolGraph {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut symbols = None;
        let mut relationships = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"symbols") {
                symbols = Some(dec.decode()?);
            } else if dec.match_key(b"relationships") {
                relationships = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(SymbolGraph {
            symbols: dec.require(symbols, "symbols")?,
            relationships: dec.require(relationships, "relationships")?,
        })
    }
}

fn main() {
    let input = br#"{
        "schemaVersion": "1.0",
        "symbols": [
            {"id": "Foo", "kind": "struct", "doc": "A foo.", "location": {"file": "foo.rs", "line": 1}},
            {"id": "Foo::bar", "kind": "method", "doc": null, "visibility": "pub"}
        ],
        "relationships": [
            {"from": "Foo::bar", "to": "Foo", "kind": "memberOf"}
        ]
    }"#;

    let graph: SymbolGraph = decode(input).expect("fixture decodes cleanly");
    println!("{graph:#?}");
}
