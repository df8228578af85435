//! Raw-String Scanner: run-length-delimited literals.
//!
//! ```text
//! r##"she said "#hi"# twice"##
//! └┬┘└──────────┬──────────┘└┬┘
//! start      content        end
//! ```
//!
//! The opener records the marker run length *N*. Content is taken verbatim
//! (no escapes) until a `"` followed by a marker run of exactly *N*; the
//! whole run is counted, so a shorter or longer run is content. The literal
//! spans three scanner calls and the phase in between lives in the
//! snapshot.

use crate::cursor::ScanCursor;
use crate::snapshot::Effect;

/// Character that introduces a raw literal.
pub const PREFIX: u8 = b'r';

/// Repeated delimiter character.
pub const MARKER: u8 = b'#';

/// Where the scanner is inside a raw literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawPhase {
    /// Opener consumed; content comes next.
    Content,
    /// Content consumed; the cursor sits on the closing `"`.
    Close,
}

/// Persisted raw-literal state, present only inside a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawLiteral {
    pub marker_len: u8,
    pub phase: RawPhase,
}

/// `r`, up to 255 markers, `"`.
pub(crate) fn scan_start(cur: &mut ScanCursor<'_>) -> Option<Effect> {
    cur.skip_trivia();
    if cur.current() != PREFIX {
        return None;
    }
    cur.advance();
    let mut marker_len: u8 = 0;
    while cur.current() == MARKER {
        marker_len = marker_len.checked_add(1)?;
        cur.advance();
    }
    if cur.current() != b'"' {
        return None;
    }
    cur.advance();
    Some(Effect::EnterRawString(marker_len))
}

/// Content up to the closing `"` + exactly `marker_len` markers.
///
/// Fails at EOF: an unterminated literal is a parse error, not a token.
pub(crate) fn scan_content(cur: &mut ScanCursor<'_>, marker_len: u8) -> Option<Effect> {
    loop {
        if !cur.advance_to_byte(b'"') {
            return None;
        }
        cur.mark_end();
        cur.advance();
        if count_markers(cur) == u32::from(marker_len) {
            return Some(Effect::RawContentDone);
        }
    }
}

/// The closing `"` and its markers.
pub(crate) fn scan_end(cur: &mut ScanCursor<'_>, marker_len: u8) -> Option<Effect> {
    if cur.current() != b'"' {
        return None;
    }
    cur.advance();
    for _ in 0..marker_len {
        if cur.current() != MARKER {
            return None;
        }
        cur.advance();
    }
    Some(Effect::ExitRawString)
}

/// Consume a full marker run, returning its length.
fn count_markers(cur: &mut ScanCursor<'_>) -> u32 {
    let mut run = 0;
    while cur.current() == MARKER {
        cur.advance();
        run += 1;
    }
    run
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
