//! Cursor: a bare pointer/end pair over an immutable, borrowed byte buffer.
//!
//! This is the innermost layer of the decoder. It never allocates and never
//! bounds-checks a single load; callers establish enough headroom before
//! calling into the unaligned load family, then call [`Cursor::bounds_check`]
//! once at the public boundary. See [`crate::scan`] for the scanner built on
//! top of this.

use crate::error::ScanError;

/// A pointer into an immutable UTF-8 byte buffer plus a one-past-end
/// sentinel.
///
/// `pos` never moves backward except for the single controlled one-byte
/// rewind used by [`crate::decode::Decoder::decode_map`] to recover a map
/// key's spelling. Every public entry/exit point upholds `pos <= end`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'src> {
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// Wraps `bytes` with the cursor positioned at offset 0.
    #[must_use]
    pub fn new(bytes: &'src [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    #[must_use]
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// One-past-the-last-valid-byte offset.
    #[must_use]
    #[inline]
    pub fn end(&self) -> usize {
        self.bytes.len()
    }

    /// The full input buffer, independent of cursor position.
    #[must_use]
    #[inline]
    pub fn input(&self) -> &'src [u8] {
        self.bytes
    }

    /// Number of bytes remaining, including the byte at `pos` if any.
    #[must_use]
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end().saturating_sub(self.pos)
    }

    /// Reads one byte at `pos + offset` with no bounds check.
    ///
    /// # Safety invariant
    /// Caller must ensure `pos + offset` is within `0..bytes.len()`.
    #[inline]
    pub fn load_u8_at(&self, offset: isize) -> u8 {
        let addr = self.checked_addr(offset);
        unsafe { *self.bytes.as_ptr().add(addr) }
    }

    /// Unaligned little-endian 16-bit load at `pos + offset`, no bounds check.
    #[inline]
    pub fn load_u16_at(&self, offset: isize) -> u16 {
        let addr = self.checked_addr(offset);
        unsafe { self.bytes.as_ptr().add(addr).cast::<u16>().read_unaligned() }
    }

    /// Unaligned little-endian 32-bit load at `pos + offset`, no bounds check.
    #[inline]
    pub fn load_u32_at(&self, offset: isize) -> u32 {
        let addr = self.checked_addr(offset);
        unsafe { self.bytes.as_ptr().add(addr).cast::<u32>().read_unaligned() }
    }

    /// Unaligned little-endian 64-bit load at `pos + offset`, no bounds check.
    #[inline]
    pub fn load_u64_at(&self, offset: isize) -> u64 {
        let addr = self.checked_addr(offset);
        unsafe { self.bytes.as_ptr().add(addr).cast::<u64>().read_unaligned() }
    }

    /// Translate a signed offset from `pos` into an absolute index.
    ///
    /// Debug-asserts the address would be representable; does not bounds
    /// check against `end` (that is the caller's job via
    /// [`Cursor::bounds_check`] or an explicit headroom check before the
    /// wide-compare fast paths).
    #[inline]
    fn checked_addr(&self, offset: isize) -> usize {
        let addr = self.pos as isize + offset;
        debug_assert!(addr >= 0, "cursor read underflowed the buffer start");
        addr as usize
    }

    /// Equivalent to `self.load_u8_at(0)` but returns `None` past `end`.
    #[must_use]
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Peeks `offset` bytes ahead of `pos`, returning `None` past `end`.
    #[must_use]
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Advances `pos` by `n` bytes. No bounds check; callers must re-establish
    /// `pos <= end` via [`Cursor::bounds_check`] before the next public call.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Moves `pos` back by one byte. The only permitted backward motion,
    /// used to recover a dictionary key's opening quote.
    #[inline]
    pub fn rewind_one(&mut self) {
        debug_assert!(self.pos > 0, "rewind_one underflowed the buffer start");
        self.pos -= 1;
    }

    /// Sets `pos` to an absolute offset. Used when resuming from a saved
    /// position (e.g. array-index bookkeeping in the decode driver).
    #[inline]
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns `Ok(())` iff `pos <= end`, else `Err(ScanError::UnexpectedEof)`.
    #[inline]
    pub fn bounds_check(&self) -> Result<(), ScanError> {
        if self.pos > self.end() {
            Err(ScanError::UnexpectedEof)
        } else {
            Ok(())
        }
    }

    /// True iff at least `n` bytes are readable starting at `pos`.
    #[must_use]
    #[inline]
    pub fn has_headroom(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    /// Borrows the raw slice `[pos, pos + len)`. Caller guarantees headroom.
    #[must_use]
    #[inline]
    pub fn slice(&self, len: usize) -> &'src [u8] {
        &self.bytes[self.pos..self.pos + len]
    }

    /// Borrows the raw slice `[start, end)` of the whole buffer, independent
    /// of the current cursor position. Used by the path tracker to recover a
    /// key's spelling from a saved byte pointer.
    #[must_use]
    #[inline]
    pub fn slice_abs(&self, start: usize, end: usize) -> &'src [u8] {
        &self.bytes[start..end]
    }
}
