//! Cursors over a sentinel-terminated buffer.
//!
//! [`Cursor`] is the raw position: it advances byte-by-byte or
//! codepoint-by-codepoint and keeps track of where the current line starts
//! so layout columns are O(line length) to compute. EOF is detected when the
//! current byte equals the sentinel (`0x00`) and the position has reached
//! the source length.
//!
//! [`ScanCursor`] layers the parser-scanner protocol on top: bytes can be
//! *skipped* (trivia, not part of the token) or *advanced* (part of the
//! token), and `mark_end` pins the token end while the scanner keeps
//! looking ahead.
//!
//! # Columns
//!
//! A column is the number of Unicode scalar values between the start of the
//! line and the position, counted from 0. Tabs are one column, like any
//! other character, and so is `\r` (only `\n` starts a new line).

use crate::source_buffer::is_continuation_byte;
use crate::Span;

/// Bytes skipped as trivia before layout, bracket, and EOF tokens.
#[inline]
pub(crate) fn is_trivia(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Cheap-to-copy cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor) or
/// [`SourceBuffer::cursor_at()`](crate::SourceBuffer::cursor_at).
/// The cursor is [`Copy`]: every scan candidate works on its own copy and a
/// rejected candidate leaves nothing behind.
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`, and
/// `line_start <= pos` with no `\n` in `buf[line_start..pos]`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Byte index of the first byte of the current line.
    line_start: u32,
}

/// &[u8] = 16 (fat pointer), 3 x u32 = 12, + 4 padding => 32 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 32);

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32, pos: u32, line_start: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        debug_assert!(line_start <= pos && pos <= source_len);
        Self {
            buf,
            pos,
            source_len,
            line_start,
        }
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe at any position: the sentinel and padding guarantee valid reads.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns `true` if the bytes at the current position start with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.buf[self.pos as usize..].starts_with(prefix)
    }

    /// Returns `true` if the cursor has reached EOF.
    ///
    /// Interior null bytes (`pos < source_len`) are not EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Decode the codepoint at the current position, or `None` at EOF.
    pub fn lookahead_char(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let start = self.pos as usize;
        let width = Self::utf8_char_width(self.current()) as usize;
        let end = (start + width).min(self.source_len as usize);
        std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|s| s.chars().next())
    }

    /// Advance the cursor by one byte, tracking line starts.
    #[inline]
    pub fn advance(&mut self) {
        let byte = self.current();
        self.pos += 1;
        if byte == b'\n' {
            self.line_start = self.pos;
        }
    }

    /// Advance the cursor by `n` bytes that contain no `\n`.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        debug_assert!(
            !self.buf[self.pos as usize..(self.pos + n) as usize].contains(&b'\n'),
            "advance_n must not cross a line break"
        );
        self.pos += n;
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character. No-op at EOF.
    #[inline]
    pub fn advance_char(&mut self) {
        if self.is_eof() {
            return;
        }
        let width = Self::utf8_char_width(self.current());
        if width == 1 {
            self.advance();
        } else {
            self.pos = (self.pos + width).min(self.source_len);
        }
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` and `pred(b'\n')` must both return `false`: the sentinel
    /// terminates the loop and line tracking is not updated here.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Advance past spaces, tabs, carriage returns, and newlines.
    #[inline]
    pub fn skip_trivia(&mut self) {
        while is_trivia(self.current()) {
            self.advance();
        }
    }

    /// Advance to the next occurrence of `byte`, or to EOF.
    ///
    /// Returns `true` if the byte was found. SIMD-accelerated via `memchr`;
    /// line tracking is recovered from the skipped region afterwards.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_byte(&mut self, byte: u8) -> bool {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        let (target, found) = match memchr::memchr(byte, remaining) {
            Some(offset) => (self.pos + offset as u32, true),
            None => (self.source_len, false),
        };
        self.jump_to(target);
        found
    }

    /// Advance to the next occurrence of either `a` or `b`, or to EOF.
    ///
    /// Returns the byte found, or `None` at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_either(&mut self, a: u8, b: u8) -> Option<u8> {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr2(a, b, remaining) {
            Some(offset) => {
                self.jump_to(self.pos + offset as u32);
                Some(self.current())
            }
            None => {
                self.jump_to(self.source_len);
                None
            }
        }
    }

    /// Move forward to `target`, updating the line start if a `\n` was passed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub(crate) fn jump_to(&mut self, target: u32) {
        debug_assert!(target >= self.pos);
        let skipped = &self.buf[self.pos as usize..target as usize];
        if let Some(nl) = memchr::memrchr(b'\n', skipped) {
            self.line_start = self.pos + nl as u32 + 1;
        }
        self.pos = target;
    }

    /// Column of the current position: codepoints since the line start.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "column <= line length <= source_len which fits in u32"
    )]
    pub fn column(&self) -> u32 {
        self.buf[self.line_start as usize..self.pos as usize]
            .iter()
            .filter(|&&b| !is_continuation_byte(b))
            .count() as u32
    }

    /// Returns `true` if only horizontal whitespace precedes the current
    /// position on its line, i.e. the next token is the first on the line.
    pub fn at_line_head(&self) -> bool {
        self.buf[self.line_start as usize..self.pos as usize]
            .iter()
            .all(|&b| matches!(b, b' ' | b'\t' | b'\r'))
    }

    /// Extract a source substring as `&str`.
    ///
    /// Returns `""` if the range does not fall on character boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        std::str::from_utf8(&self.buf[start as usize..end as usize]).unwrap_or_default()
    }

    /// Extract the source text covered by `span`.
    pub fn text(&self, span: Span) -> &'a str {
        self.slice(span.start, span.end)
    }
}

/// A [`Cursor`] with token-boundary tracking.
///
/// Mirrors the lexer handle a table-driven parser passes to an external
/// scanner: `skip` consumes trivia in front of the token, `advance` consumes
/// token text, and `mark_end` freezes the token end so the scanner can keep
/// reading ahead (the raw-string content scanner reads the closing `"#…#`
/// before deciding where content stops). Without a `mark_end` call the
/// token ends at the current position.
#[derive(Clone, Copy, Debug)]
pub struct ScanCursor<'a> {
    cursor: Cursor<'a>,
    /// Position the host handed in.
    origin: u32,
    /// First byte of the token (after skipped trivia).
    token_start: u32,
    marked_end: Option<u32>,
}

impl<'a> ScanCursor<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        let pos = cursor.pos();
        Self {
            cursor,
            origin: pos,
            token_start: pos,
            marked_end: None,
        }
    }

    /// Codepoint under the cursor, `None` at EOF.
    #[inline]
    pub fn lookahead(&self) -> Option<char> {
        self.cursor.lookahead_char()
    }

    #[inline]
    pub fn current(&self) -> u8 {
        self.cursor.current()
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.cursor.peek()
    }

    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.cursor.starts_with(prefix)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    #[inline]
    pub fn at_line_head(&self) -> bool {
        self.cursor.at_line_head()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Consume one codepoint as part of the token.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor.advance_char();
    }

    /// Consume `n` ASCII bytes (no line breaks) as part of the token.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.cursor.advance_n(n);
    }

    /// Consume one codepoint as trivia in front of the token.
    #[inline]
    pub fn skip(&mut self) {
        debug_assert!(
            self.token_start == self.cursor.pos(),
            "skip after token text was consumed"
        );
        self.cursor.advance_char();
        self.token_start = self.cursor.pos();
    }

    /// Skip all whitespace and line breaks in front of the token.
    pub fn skip_trivia(&mut self) {
        while is_trivia(self.cursor.current()) {
            self.skip();
        }
    }

    /// Consume token text up to the next `byte` (or EOF).
    #[inline]
    pub fn advance_to_byte(&mut self, byte: u8) -> bool {
        self.cursor.skip_to_byte(byte)
    }

    /// Consume token text up to the next `a` or `b` (or EOF).
    #[inline]
    pub fn advance_to_either(&mut self, a: u8, b: u8) -> Option<u8> {
        self.cursor.skip_to_either(a, b)
    }

    /// Freeze the token end at the current position.
    #[inline]
    pub fn mark_end(&mut self) {
        self.marked_end = Some(self.cursor.pos());
    }

    /// The token's extent: from after skipped trivia to the marked end.
    pub fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.marked_end.unwrap_or_else(|| self.cursor.pos()),
        )
    }

    /// Bytes of trivia skipped in front of the token.
    pub fn skipped(&self) -> u32 {
        self.token_start - self.origin
    }
}
