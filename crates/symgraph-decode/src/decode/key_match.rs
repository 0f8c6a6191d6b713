//! The key-match fast path: a straight-line, wide-integer comparison ladder
//! for compile-time ASCII object keys.
//!
//! For a literal of length `N`, [`key_matches`] generates the comparison
//! shape described for that `N` in the decoder's design: single byte/16/32/64
//! bit loads for the round lengths, masked loads for the awkward ones
//! (3/5/6/7), and a combination of loads (with the final one deliberately
//! overlapping the previous region) for longer keys. `N` is a const generic,
//! so each instantiation compiles down to exactly the branch for its own
//! length.
//!
//! A match additionally requires that the byte immediately following the
//! compared region is the closing `"` — otherwise a short literal would
//! "match" as a prefix of a longer key. [`key_matches_packed`] is the
//! alternative the spec calls the *encoding trick*: the caller folds the
//! leading and/or trailing quote into the literal itself (using
//! `byte_offset = -1` to reach back to the opening quote), which validates
//! the terminator for free as part of the same wide compare and needs no
//! separate check.

use crate::cursor::Cursor;

fn literal_u32(literal: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf[..literal.len()].copy_from_slice(literal);
    u32::from_le_bytes(buf)
}

fn literal_u64(literal: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..literal.len()].copy_from_slice(literal);
    u64::from_le_bytes(buf)
}

fn mask32(n: usize) -> u32 {
    if n >= 4 { u32::MAX } else { (1u32 << (n * 8)) - 1 }
}

fn mask64(n: usize) -> u64 {
    if n >= 8 { u64::MAX } else { (1u64 << (n * 8)) - 1 }
}

/// Bytes that must be readable from `pos + byte_offset` for the wide-compare
/// ladder below to stay in bounds, for a literal of length `n`.
const fn ladder_headroom(n: usize) -> usize {
    match n {
        0 => 0,
        1 => 1,
        2 => 2,
        3 | 4 => 4,
        5..=8 => 8,
        _ => n,
    }
}

/// Straight-line comparison of `literal` (length `N`) against the bytes at
/// `pos + byte_offset`, per the length-indexed ladder. Does not itself check
/// a trailing quote; callers that need exact-key-length semantics use
/// [`key_matches`] instead.
fn compare_ladder<const N: usize>(cur: &Cursor<'_>, literal: &[u8; N], byte_offset: isize) -> bool {
    match N {
        0 => true,
        1 => cur.load_u8_at(byte_offset) == literal[0],
        2 => cur.load_u16_at(byte_offset) == u16::from_le_bytes([literal[0], literal[1]]),
        3 => (cur.load_u32_at(byte_offset) & mask32(3)) == (literal_u32(literal) & mask32(3)),
        4 => cur.load_u32_at(byte_offset) == literal_u32(literal),
        5 => (cur.load_u64_at(byte_offset) & mask64(5)) == (literal_u64(literal) & mask64(5)),
        6 => (cur.load_u64_at(byte_offset) & mask64(6)) == (literal_u64(literal) & mask64(6)),
        7 => (cur.load_u64_at(byte_offset) & mask64(7)) == (literal_u64(literal) & mask64(7)),
        8 => cur.load_u64_at(byte_offset) == literal_u64(literal),
        9 => {
            cur.load_u64_at(byte_offset) == literal_u64(&literal[0..8])
                && cur.load_u8_at(byte_offset + 8) == literal[8]
        }
        10 => {
            cur.load_u64_at(byte_offset) == literal_u64(&literal[0..8])
                && cur.load_u16_at(byte_offset + 8) == u16::from_le_bytes([literal[8], literal[9]])
        }
        11 => {
            // Overlapping loads: bytes 0..8 and bytes 7..11, both landing on
            // real (not masked-off) data; byte 7 is compared twice.
            cur.load_u64_at(byte_offset) == literal_u64(&literal[0..8])
                && cur.load_u32_at(byte_offset + 7) == literal_u32(&literal[7..11])
        }
        12 => {
            cur.load_u64_at(byte_offset) == literal_u64(&literal[0..8])
                && cur.load_u32_at(byte_offset + 8) == literal_u32(&literal[8..12])
        }
        _ => {
            let mut i = 0usize;
            while i + 8 <= N {
                if cur.load_u64_at(byte_offset + i as isize) != literal_u64(&literal[i..i + 8]) {
                    return false;
                }
                i += 8;
            }
            if i == N {
                return true;
            }
            // Final chunk overlaps the previous one so it always reads a
            // full 8 bytes even when N is not a multiple of 8.
            let tail_start = N - 8;
            cur.load_u64_at(byte_offset + tail_start as isize) == literal_u64(&literal[tail_start..N])
        }
    }
}

/// True iff the buffer has at least `n` readable bytes starting at
/// `pos + byte_offset`.
fn has_headroom(cur: &Cursor<'_>, byte_offset: isize, n: usize) -> bool {
    let base = cur.pos() as isize + byte_offset;
    base >= 0 && (base as usize) + n <= cur.end()
}

/// A plain, always-correct byte-wise fallback used near the end of the
/// buffer, where the wide-compare ladder isn't safe to apply.
fn compare_bytewise(cur: &Cursor<'_>, literal: &[u8], byte_offset: isize) -> bool {
    let base = cur.pos() as isize + byte_offset;
    if base < 0 {
        return false;
    }
    let base = base as usize;
    cur.input().get(base..base + literal.len()) == Some(literal)
}

/// Compares a compile-time ASCII key of length `N` against the object key at
/// `pos + byte_offset`, additionally requiring the byte right after the
/// compared region to be `"` (so a short literal can't "match" as a prefix
/// of a longer key).
pub(crate) fn key_matches<const N: usize>(cur: &Cursor<'_>, literal: &[u8; N], byte_offset: isize) -> bool {
    let ladder_room = ladder_headroom(N);
    let needed = ladder_room.max(N + 1);
    if has_headroom(cur, byte_offset, needed) {
        // Safety: `has_headroom` established that `pos + byte_offset + needed`
        // is within the buffer, and `needed >= ladder_room`, so every load the
        // ladder performs for this `N` stays in bounds.
        compare_ladder(cur, literal, byte_offset) && cur.load_u8_at(byte_offset + N as isize) == b'"'
    } else {
        compare_bytewise(cur, literal, byte_offset) && {
            let base = (cur.pos() as isize + byte_offset + N as isize) as usize;
            cur.input().get(base).copied() == Some(b'"')
        }
    }
}

/// The *encoding trick*: `literal` bakes in the leading and/or trailing `"`
/// so the terminator is validated as part of the same wide compare. Typical
/// use is a 6-byte key compared in one 8-byte load with `byte_offset = -1`
/// (valid only immediately after `advance_to_next_key`, which leaves `pos`
/// one byte past the opening quote), or a 3-/7-byte key rounded up to 4/8
/// bytes by including only the trailing quote at `byte_offset = 0`.
pub(crate) fn key_matches_packed<const N: usize>(cur: &Cursor<'_>, literal: &[u8; N], byte_offset: isize) -> bool {
    let needed = ladder_headroom(N);
    if has_headroom(cur, byte_offset, needed) {
        compare_ladder(cur, literal, byte_offset)
    } else {
        compare_bytewise(cur, literal, byte_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cur(s: &str) -> Cursor<'_> {
        Cursor::new(s.as_bytes())
    }

    #[test]
    fn matches_each_ladder_length_exactly() {
        for key in [
            "", "a", "ab", "abc", "abcd", "abcde", "abcdef", "abcdefg", "abcdefgh", "abcdefghi",
            "abcdefghij", "abcdefghijk", "abcdefghijkl", "abcdefghijklmnopqrstuvwxyz",
        ] {
            let input = alloc::format!("{key}\": tail tail tail");
            let c = cur(&input);
            let literal = key.as_bytes();
            assert!(key_matches_const(&c, literal), "key {key:?} should match itself");
        }
    }

    #[test]
    fn rejects_prefix_of_longer_key() {
        let c = cur("name_extra\": 1");
        assert!(!key_matches(&c, b"name", 0));
    }

    #[test]
    fn rejects_wrong_bytes() {
        let c = cur("name\": 1");
        assert!(!key_matches(&c, b"nam3", 0));
    }

    #[test]
    fn near_end_of_buffer_falls_back_safely() {
        let c = cur("ab");
        assert!(key_matches(&c, b"ab", 0));
        let c = cur("ab");
        assert!(!key_matches(&c, b"abc", 0));
    }

    #[test]
    fn packed_adjacency_trick_matches_with_offset_minus_one() {
        // pos is one byte past the opening quote, as advance_to_next_key
        // leaves it; byte_offset=-1 reaches back to that quote.
        let input = r#""abcdef": 1"#;
        let mut c = cur(input);
        c.advance(1); // simulate advance_to_next_key's one-past-opening-quote
        assert!(key_matches_packed(&c, br#""abcdef""#, -1));
    }

    // Helper to call key_matches with a const-generic array regardless of
    // the runtime-length test-table above (which can't name `N` directly).
    fn key_matches_const(cur: &Cursor<'_>, literal: &[u8]) -> bool {
        match literal.len() {
            0 => key_matches::<0>(cur, literal.try_into().unwrap(), 0),
            1 => key_matches::<1>(cur, literal.try_into().unwrap(), 0),
            2 => key_matches::<2>(cur, literal.try_into().unwrap(), 0),
            3 => key_matches::<3>(cur, literal.try_into().unwrap(), 0),
            4 => key_matches::<4>(cur, literal.try_into().unwrap(), 0),
            5 => key_matches::<5>(cur, literal.try_into().unwrap(), 0),
            6 => key_matches::<6>(cur, literal.try_into().unwrap(), 0),
            7 => key_matches::<7>(cur, literal.try_into().unwrap(), 0),
            8 => key_matches::<8>(cur, literal.try_into().unwrap(), 0),
            9 => key_matches::<9>(cur, literal.try_into().unwrap(), 0),
            10 => key_matches::<10>(cur, literal.try_into().unwrap(), 0),
            11 => key_matches::<11>(cur, literal.try_into().unwrap(), 0),
            12 => key_matches::<12>(cur, literal.try_into().unwrap(), 0),
            26 => key_matches::<26>(cur, literal.try_into().unwrap(), 0),
            _ => unreachable!(),
        }
    }
}
