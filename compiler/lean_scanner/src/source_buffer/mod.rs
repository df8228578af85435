//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! so the sub-scanners can peek one or two bytes past any position (the
//! two-byte `/-` and `-/` comment markers, `|>` operator checks) without
//! explicit bounds checking. The total buffer size is rounded up to the next
//! 64-byte boundary, which also provides the padding for those peeks.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The parser host owns one buffer per lex session and hands out
/// [`Cursor`]s into it. The buffer is read-only from the scanner's side, so
/// any number of speculative parse branches may hold cursors at once.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source code.
    ///
    /// # File Size
    ///
    /// Sources larger than `u32::MAX` bytes are truncated to `u32::MAX`
    /// bytes of content; scanner spans are 32-bit.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len().min(u32::MAX as usize);

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(&source_bytes[..source_len]);

        let source_len = u32::try_from(source_len).unwrap_or(u32::MAX);
        Self { buf, source_len }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len, 0, 0)
    }

    /// Create a [`Cursor`] positioned at byte `offset`.
    ///
    /// Used when the host re-lexes from the middle of a file. The start of
    /// the enclosing line is recovered so column queries stay correct.
    /// Returns `None` if `offset` is past the end of the source or does not
    /// fall on a UTF-8 character boundary.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "line start <= offset <= source_len which fits in u32"
    )]
    pub fn cursor_at(&self, offset: u32) -> Option<Cursor<'_>> {
        if offset > self.source_len || is_continuation_byte(self.buf[offset as usize]) {
            return None;
        }
        let line_start = memchr::memrchr(b'\n', &self.buf[..offset as usize])
            .map_or(0, |nl| nl as u32 + 1);
        Some(Cursor::new(&self.buf, self.source_len, offset, line_start))
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

/// UTF-8 continuation bytes (`0b10xx_xxxx`) never start a character.
#[inline]
pub(crate) fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
