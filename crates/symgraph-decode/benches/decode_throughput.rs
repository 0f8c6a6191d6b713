//! Throughput of schema-directed decoding versus the dynamic `Value` target,
//! over a representative symbol-graph-shaped document.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use symgraph_decode::{Decode, DecodingError, Value, decode};

fn sample_document(symbol_count: usize) -> String {
    let mut out = String::from(r#"{"symbols": ["#);
    for i in 0..symbol_count {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!(
            r#"{{"id": "sym_{i}", "kind": "function", "doc": "does the thing", "tags": ["rust", "public"]}}"#
        ));
    }
    out.push_str(r#"], "relationships": []}"#);
    out
}

struct Symbol {
    id: String,
    #[allow(dead_code)]
    kind: String,
}

impl Decode for Symbol {
    fn decode(dec: &mut symgraph_decode::Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut id = None;
        let mut kind = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"id") {
                id = Some(dec.decode()?);
            } else if dec.match_key(b"kind") {
                kind = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Symbol {
            id: dec.require(id, "id")?,
            kind: dec.require(kind, "kind")?,
        })
    }
}

struct Document {
    symbols: Vec<Symbol>,
}

impl Decode for Document {
    fn decode(dec: &mut symgraph_decode::Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut symbols = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"symbols") {
                symbols = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Document {
            symbols: dec.require(symbols, "symbols")?,
        })
    }
}

fn bench_schema_directed(c: &mut Criterion) {
    let json = sample_document(500);
    let bytes = json.as_bytes();
    c.bench_function("decode_schema_directed_500_symbols", |b| {
        b.iter(|| {
            let doc: Document = decode(black_box(bytes)).unwrap();
            black_box(doc.symbols.len())
        });
    });
}

fn bench_dynamic_value(c: &mut Criterion) {
    let json = sample_document(500);
    let bytes = json.as_bytes();
    c.bench_function("decode_dynamic_value_500_symbols", |b| {
        b.iter(|| {
            let v: Value = decode(black_box(bytes)).unwrap();
            black_box(v)
        });
    });
}

criterion_group!(benches, bench_schema_directed, bench_dynamic_value);
criterion_main!(benches);
