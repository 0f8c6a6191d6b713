//! Low-level scanner: whitespace, literals, numbers, strings, and structural
//! descent. Free functions over a borrowed [`Cursor`]; none of them allocate
//! except [`decode_string_escapes`], which is only reached on the slow path
//! once an escape has actually been observed.
//!
//! Every operation here assumes the caller has left `pos` at a meaningful
//! byte; leading whitespace is skipped explicitly wherever the grammar allows
//! it, never implicitly.

use alloc::{string::String, vec::Vec};

use crate::byte_search::{ByteMask, splat};
use crate::cursor::Cursor;
use crate::error::ScanError;


/// JSON whitespace is exactly this 4-byte set (RFC 8259 §2).
#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, 0x20 | 0x09 | 0x0A | 0x0D)
}

/// Advances past any run of JSON whitespace. Does not bounds-check; the
/// caller is responsible for having left headroom (or accepting that `peek`
/// simply returns `None` at EOF, which is not whitespace).
pub(crate) fn skip_whitespace(cur: &mut Cursor<'_>) {
    while let Some(b) = cur.peek() {
        if is_whitespace(b) {
            cur.advance(1);
        } else {
            break;
        }
    }
}

/// Recognizes the exact ASCII prefix `true` or `false`, advancing past it.
/// Any other byte sequence fails with [`ScanError::UnexpectedCharacter`].
pub(crate) fn scan_bool(cur: &mut Cursor<'_>) -> Result<bool, ScanError> {
    if cur.input()[cur.pos()..].starts_with(b"true") {
        cur.advance(4);
        Ok(true)
    } else if cur.input()[cur.pos()..].starts_with(b"false") {
        cur.advance(5);
        Ok(false)
    } else {
        Err(ScanError::UnexpectedCharacter)
    }
}

/// Recognizes the exact ASCII literal `null`, advancing past it if found.
/// Does not fail on mismatch; used by the optional-value decoder, which
/// needs to know whether `null` was present without consuming anything on a
/// miss.
pub(crate) fn scan_null(cur: &mut Cursor<'_>) -> bool {
    if cur.input()[cur.pos()..].starts_with(b"null") {
        cur.advance(4);
        true
    } else {
        false
    }
}

/// Length and lexical shape of the number starting at `pos`, without
/// consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberInfo {
    pub(crate) len: usize,
    pub(crate) is_negative: bool,
    pub(crate) is_float: bool,
    pub(crate) has_exponent: bool,
}

/// Scans (without consuming) the number at `pos`, per the lenient grammar
/// `-? digit+ ('.' digit+)? ([eE] [+-]? digit+)?`. Leading zeros are
/// accepted (matching the reference decoder's leniency; see
/// `DecoderOptions::strict_leading_zeros` for the opt-in tightening).
pub(crate) fn number_scan(cur: &Cursor<'_>, strict_leading_zeros: bool) -> Result<NumberInfo, ScanError> {
    let buf = &cur.input()[cur.pos()..];
    let mut i = 0usize;
    let is_negative = buf.first() == Some(&b'-');
    if is_negative {
        i += 1;
    }
    let digits_start = i;
    while buf.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let int_digits = i - digits_start;
    if int_digits == 0 {
        return Err(ScanError::UnexpectedCharacter);
    }
    if strict_leading_zeros && int_digits > 1 && buf[digits_start] == b'0' {
        return Err(ScanError::UnexpectedCharacter);
    }

    let mut is_float = false;
    if buf.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while buf.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j == frac_start {
            return Err(ScanError::UnexpectedCharacter);
        }
        is_float = true;
        i = j;
    }

    let mut has_exponent = false;
    if matches!(buf.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(buf.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while buf.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j == exp_start {
            return Err(ScanError::UnexpectedCharacter);
        }
        has_exponent = true;
        i = j;
    }

    Ok(NumberInfo {
        len: i,
        is_negative,
        is_float,
        has_exponent,
    })
}

/// Scans and decodes a signed 64-bit integer at `pos`, consuming it.
/// Rejects floats, numbers with an exponent, and any digit run of 19 or more
/// digits (the only compile-time-safe overflow guard available without
/// per-digit overflow checks; some 19-digit values do fit in `i64`, but the
/// reference decoder over-approximates deliberately).
pub(crate) fn scan_integer(cur: &mut Cursor<'_>, strict_leading_zeros: bool) -> Result<i64, ScanError> {
    let info = number_scan(cur, strict_leading_zeros)?;
    if info.is_float || info.has_exponent {
        return Err(ScanError::UnexpectedCharacter);
    }
    let start = cur.pos();
    let buf = &cur.input()[start..start + info.len];
    let digits = if info.is_negative { &buf[1..] } else { buf };
    if digits.len() >= 19 {
        return Err(ScanError::Overflow);
    }
    let mut value: i64 = 0;
    for &d in digits {
        value = value.wrapping_mul(10).wrapping_add(i64::from(d - b'0'));
    }
    if info.is_negative {
        value = -value;
    }
    cur.advance(info.len);
    cur.bounds_check()?;
    Ok(value)
}

/// The raw interior of a scanned string, plus whether it is trivially
/// decodable (byte-for-byte equal to its UTF-8 payload because no escape was
/// observed before the terminator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StringSlice<'src> {
    pub(crate) bytes: &'src [u8],
    pub(crate) is_trivial: bool,
}

/// Scans a JSON string starting at the opening `"`, consuming through the
/// closing `"`. Uses the SWAR byte-search primitive to skip 8-byte chunks
/// containing neither `"` nor `\` at a time; falls back to a per-byte slow
/// path once a candidate terminator or escape introducer is found, since
/// disambiguating an escaped quote from a terminator requires counting the
/// (potentially chunk-crossing) run of contiguous preceding backslashes.
pub(crate) fn scan_string<'src>(cur: &mut Cursor<'src>) -> Result<StringSlice<'src>, ScanError> {
    if cur.peek() != Some(b'"') {
        return Err(ScanError::UnexpectedCharacter);
    }
    cur.advance(1);

    let buf = cur.input();
    let end = cur.end();
    let start = cur.pos();
    let mut pos = start;
    let mut is_trivial = true;

    loop {
        if pos >= end {
            return Err(ScanError::UnexpectedEof);
        }

        if end - pos >= 8 {
            // Safety: headroom guaranteed by the `end - pos >= 8` check above.
            let chunk = unsafe { buf.as_ptr().add(pos).cast::<u64>().read_unaligned() };
            let quote = ByteMask::new(chunk, splat(b'"'));
            let backslash = ByteMask::new(chunk, splat(b'\\'));
            if !quote.has_matches() && !backslash.has_matches() {
                pos += 8;
                continue;
            }
        }

        match buf[pos] {
            b'"' => {
                let mut run = 0usize;
                let mut i = pos;
                while i > start && buf[i - 1] == b'\\' {
                    run += 1;
                    i -= 1;
                }
                if run % 2 == 0 {
                    let content = &buf[start..pos];
                    cur.set_pos(pos + 1);
                    return Ok(StringSlice { bytes: content, is_trivial });
                }
                is_trivial = false;
                pos += 1;
            }
            b'\\' => {
                is_trivial = false;
                if pos + 1 >= end {
                    return Err(ScanError::UnexpectedEof);
                }
                pos += 2;
            }
            _ => pos += 1,
        }
    }
}

/// Decodes a string's escape sequences from its raw interior bytes.
/// Allocates a buffer of capacity equal to `raw.len()` (an upper bound on the
/// decoded length, since every escape shrinks or preserves length).
///
/// Unicode `\uXXXX` escapes are decoded per the standard UTF-16 surrogate
/// rules: a lone high surrogate (`0xD800..=0xDBFF`) must be immediately
/// followed by a `\uXXXX` low surrogate (`0xDC00..=0xDFFF`); the pair is then
/// combined into its scalar value. A lone high or low surrogate is rejected
/// with `DataCorrupted` (via `UnexpectedCharacter`) rather than silently
/// producing a corrupt scalar.
pub(crate) fn decode_string_escapes(raw: &[u8]) -> Result<String, ScanError> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0usize;
    while i < raw.len() {
        match raw[i] {
            b'\\' => {
                i += 1;
                let esc = *raw.get(i).ok_or(ScanError::UnexpectedEof)?;
                match esc {
                    b'"' => out.push(b'"'),
                    b'\\' => out.push(b'\\'),
                    b'/' => out.push(b'/'),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0C),
                    b'u' => {
                        let hi = read_hex4(raw, i + 1)?;
                        i += 4;
                        let scalar = if (0xD800..=0xDBFF).contains(&hi) {
                            if raw.get(i + 1) != Some(&b'\\') || raw.get(i + 2) != Some(&b'u') {
                                return Err(ScanError::UnexpectedCharacter);
                            }
                            let lo = read_hex4(raw, i + 3)?;
                            if !(0xDC00..=0xDFFF).contains(&lo) {
                                return Err(ScanError::UnexpectedCharacter);
                            }
                            i += 6;
                            0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
                        } else if (0xDC00..=0xDFFF).contains(&hi) {
                            // Lone low surrogate with no preceding high surrogate.
                            return Err(ScanError::UnexpectedCharacter);
                        } else {
                            hi
                        };
                        let ch = char::from_u32(scalar).ok_or(ScanError::UnexpectedCharacter)?;
                        let mut tmp = [0u8; 4];
                        out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
                    }
                    _ => return Err(ScanError::UnexpectedCharacter),
                }
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    // Safety: every branch above only ever appends bytes copied verbatim from
    // a UTF-8 `raw` slice or the UTF-8 encoding of a validated `char`.
    Ok(unsafe { String::from_utf8_unchecked(out) })
}

/// Reads 4 ASCII hex digits starting at `at`, returning their value.
fn read_hex4(raw: &[u8], at: usize) -> Result<u32, ScanError> {
    let digits = raw.get(at..at + 4).ok_or(ScanError::UnexpectedEof)?;
    let mut value = 0u32;
    for &d in digits {
        let nibble = match d {
            b'0'..=b'9' => u32::from(d - b'0'),
            b'a'..=b'f' => u32::from(d - b'a') + 10,
            b'A'..=b'F' => u32::from(d - b'A') + 10,
            _ => return Err(ScanError::UnexpectedCharacter),
        };
        value = (value << 4) | nibble;
    }
    Ok(value)
}

/// Skips whitespace, requires `{`, advances past it.
pub(crate) fn descend_object(cur: &mut Cursor<'_>) -> Result<(), ScanError> {
    skip_whitespace(cur);
    if cur.peek() != Some(b'{') {
        return Err(ScanError::UnexpectedCharacter);
    }
    cur.advance(1);
    Ok(())
}

/// Skips whitespace, requires `[`, advances past it.
pub(crate) fn descend_array(cur: &mut Cursor<'_>) -> Result<(), ScanError> {
    skip_whitespace(cur);
    if cur.peek() != Some(b'[') {
        return Err(ScanError::UnexpectedCharacter);
    }
    cur.advance(1);
    Ok(())
}

/// Skips one full JSON value of arbitrary shape, without allocating or
/// surfacing its content. Used by the decode driver's `ignore_value` when
/// schema code does not recognize a key.
pub(crate) fn skip_value(cur: &mut Cursor<'_>) -> Result<(), ScanError> {
    skip_whitespace(cur);
    match cur.peek() {
        Some(b'"') => {
            scan_string(cur)?;
            Ok(())
        }
        Some(b't' | b'f') => {
            scan_bool(cur)?;
            Ok(())
        }
        Some(b'n') => {
            if scan_null(cur) {
                Ok(())
            } else {
                Err(ScanError::UnexpectedCharacter)
            }
        }
        Some(b'-' | b'0'..=b'9') => {
            let info = number_scan(cur, false)?;
            cur.advance(info.len);
            Ok(())
        }
        Some(b'{') => {
            cur.advance(1);
            skip_whitespace(cur);
            if cur.peek() == Some(b'}') {
                cur.advance(1);
                return Ok(());
            }
            loop {
                skip_whitespace(cur);
                scan_string(cur)?;
                skip_whitespace(cur);
                if cur.peek() != Some(b':') {
                    return Err(ScanError::UnexpectedCharacter);
                }
                cur.advance(1);
                skip_value(cur)?;
                skip_whitespace(cur);
                match cur.peek() {
                    Some(b',') => {
                        cur.advance(1);
                    }
                    Some(b'}') => {
                        cur.advance(1);
                        break;
                    }
                    _ => return Err(ScanError::UnexpectedCharacter),
                }
            }
            Ok(())
        }
        Some(b'[') => {
            cur.advance(1);
            skip_whitespace(cur);
            if cur.peek() == Some(b']') {
                cur.advance(1);
                return Ok(());
            }
            loop {
                skip_value(cur)?;
                skip_whitespace(cur);
                match cur.peek() {
                    Some(b',') => {
                        cur.advance(1);
                        skip_whitespace(cur);
                    }
                    Some(b']') => {
                        cur.advance(1);
                        break;
                    }
                    _ => return Err(ScanError::UnexpectedCharacter),
                }
            }
            Ok(())
        }
        None => Err(ScanError::UnexpectedEof),
        _ => Err(ScanError::UnexpectedCharacter),
    }
}
