//! Comment Scanner: nested block comments.
//!
//! `/-` opens and `-/` closes, and comments nest to any depth, so a fixed
//! delimiter match (as for raw strings) is not enough: the body ends at the
//! close that brings the depth from 1 to 0. The token covers the whole
//! comment, opener and final closer included:
//!
//! ```text
//! /- a /- b -/ c -/
//! 1    2    1    0
//! ```
//!
//! Doc comments (`/--`) and module docs (`/-!`) are the same token;
//! [`flavor`] tells them apart from the token text.

use crate::cursor::ScanCursor;
use crate::snapshot::Effect;

const OPEN: &[u8] = b"/-";

/// What a block comment documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommentFlavor {
    /// `/- … -/`
    Block,
    /// `/-- … -/`, attached to the next declaration.
    Doc,
    /// `/-! … -/`, module-level documentation.
    ModuleDoc,
}

/// Classify comment text starting with its opener.
///
/// `/--/` is a plain comment: its `-` belongs to the closer.
pub fn flavor(text: &str) -> CommentFlavor {
    let bytes = text.as_bytes();
    match bytes.get(2) {
        Some(b'-') if bytes.get(3) != Some(&b'/') => CommentFlavor::Doc,
        Some(b'!') => CommentFlavor::ModuleDoc,
        _ => CommentFlavor::Block,
    }
}

/// A whole comment starting at the next `/-`.
pub(crate) fn scan_comment(cur: &mut ScanCursor<'_>) -> Option<Effect> {
    cur.skip_trivia();
    if !cur.starts_with(OPEN) {
        return None;
    }
    cur.advance_n(2);
    scan_to_close(cur, 1).then_some(Effect::None)
}

/// Finish a comment whose first `depth` openers were consumed earlier.
pub(crate) fn resume_comment(cur: &mut ScanCursor<'_>, depth: u32) -> Option<Effect> {
    scan_to_close(cur, depth).then_some(Effect::ExitComment)
}

/// Consume until the depth returns to zero. `false` at EOF.
fn scan_to_close(cur: &mut ScanCursor<'_>, mut depth: u32) -> bool {
    debug_assert!(depth > 0);
    loop {
        match cur.advance_to_either(b'/', b'-') {
            None => return false,
            Some(b'/') => {
                cur.advance();
                if cur.current() == b'-' {
                    cur.advance();
                    depth = depth.saturating_add(1);
                }
            }
            Some(_) => {
                cur.advance();
                if cur.current() == b'/' {
                    cur.advance();
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
