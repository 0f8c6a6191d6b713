#![expect(missing_docs)]
//! End-to-end scenarios against hand-written schema types, one per
//! documented decoder behavior.

use rstest::rstest;
use symgraph_decode::{Decode, Decoder, DecodingError, decode};

struct Pair {
    a: i64,
    b: String,
}

impl Decode for Pair {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut a = None;
        let mut b = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"a") {
                a = Some(dec.decode()?);
            } else if dec.match_key(b"b") {
                b = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Pair {
            a: dec.require(a, "a")?,
            b: dec.require(b, "b")?,
        })
    }
}

#[test]
fn s1_flat_record_decodes_in_source_order() {
    let p: Pair = decode(br#"{"a":1,"b":"x"}"#).unwrap();
    assert_eq!(p.a, 1);
    assert_eq!(p.b, "x");
}

#[test]
fn s2_unknown_key_is_skipped_and_whole_input_is_consumed() {
    let bytes = br#"{"b":"x","a":1,"z":[1,2]}"#;
    let p: Pair = decode(bytes).unwrap();
    assert_eq!(p.a, 1);
    assert_eq!(p.b, "x");
}

#[test]
fn s3_adjacent_backslash_and_quote_escapes_decode_correctly() {
    struct Wrapper {
        s: String,
    }
    impl Decode for Wrapper {
        fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
            dec.descend_into_object()?;
            let mut s = None;
            while dec.advance_to_next_key()? {
                if dec.match_key(b"s") {
                    s = Some(dec.decode()?);
                } else {
                    dec.ignore_value()?;
                }
            }
            Ok(Wrapper { s: dec.require(s, "s")? })
        }
    }
    let w: Wrapper = decode(br#"{"s":"a\\\"b"}"#).unwrap();
    assert_eq!(w.s, "a\\\"b");
}

#[rstest]
#[case::in_range(br#"{"n":12345}"#, Some(12345))]
#[case::eighteen_digits(br#"{"n":123456789012345678}"#, Some(123_456_789_012_345_678))]
fn s4_integers_in_range_decode(#[case] bytes: &[u8], #[case] expected: Option<i64>) {
    struct N {
        n: i64,
    }
    impl Decode for N {
        fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
            dec.descend_into_object()?;
            let mut n = None;
            while dec.advance_to_next_key()? {
                if dec.match_key(b"n") {
                    n = Some(dec.decode()?);
                } else {
                    dec.ignore_value()?;
                }
            }
            Ok(N { n: dec.require(n, "n")? })
        }
    }
    let n: N = decode(bytes).unwrap();
    assert_eq!(Some(n.n), expected);
}

#[test]
fn s4_nineteen_digits_is_data_corrupted() {
    struct N {
        #[allow(dead_code)]
        n: i64,
    }
    impl Decode for N {
        fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
            dec.descend_into_object()?;
            let mut n = None;
            while dec.advance_to_next_key()? {
                if dec.match_key(b"n") {
                    n = Some(dec.decode()?);
                } else {
                    dec.ignore_value()?;
                }
            }
            Ok(N { n: dec.require(n, "n")? })
        }
    }
    let err = decode::<N>(br#"{"n":1234567890123456789}"#).unwrap_err();
    assert!(matches!(err, DecodingError::DataCorrupted { .. }));
}

struct Keyed {
    k: i64,
}

impl Decode for Keyed {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut k = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"k") {
                k = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Keyed { k: dec.require(k, "k")? })
    }
}

struct Listing {
    xs: Vec<Keyed>,
}

impl Decode for Listing {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut xs = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"xs") {
                xs = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Listing { xs: dec.require(xs, "xs")? })
    }
}

#[test]
fn s5_array_of_records_decodes_in_order() {
    let l: Listing = decode(br#"{"xs":[ {"k":1}, {"k":2}, {"k":3} ]}"#).unwrap();
    assert_eq!(l.xs.iter().map(|k| k.k).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn s5_failure_in_second_element_reports_that_elements_path() {
    let bytes = br#"{"xs":[ {"k":1}, {"k":"oops"}, {"k":3} ]}"#;
    let err = decode::<Listing>(bytes).unwrap_err();
    let DecodingError::TypeMismatch { path, .. } = err else {
        panic!("expected TypeMismatch, got {err:?}")
    };
    assert_eq!(path.to_string(), "xs / 1 / k");
}

struct Optional {
    opt: Option<i64>,
}

impl Decode for Optional {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self, DecodingError> {
        dec.descend_into_object()?;
        let mut opt = None;
        while dec.advance_to_next_key()? {
            if dec.match_key(b"opt") {
                opt = Some(dec.decode()?);
            } else {
                dec.ignore_value()?;
            }
        }
        Ok(Optional { opt: dec.require(opt, "opt")? })
    }
}

#[rstest]
#[case::absent_on_null(br#"{"opt":null}"#.as_slice(), Ok(None))]
#[case::present_value(br#"{"opt":5}"#.as_slice(), Ok(Some(5)))]
fn s6_optional_field_null_vs_present(#[case] bytes: &[u8], #[case] expected: Result<Option<i64>, ()>) {
    let o: Optional = decode(bytes).unwrap();
    assert_eq!(Ok(o.opt), expected);
}

#[test]
fn s6_optional_field_wrong_shape_is_type_mismatch_at_the_field_path() {
    let err = decode::<Optional>(br#"{"opt":"x"}"#).unwrap_err();
    let DecodingError::TypeMismatch { path, .. } = err else {
        panic!("expected TypeMismatch, got {err:?}")
    };
    assert_eq!(path.to_string(), "opt");
}
