//! Column Stack Manager: off-side rule blocks.
//!
//! Tactic sequences, `do` blocks, match alternatives, structure-instance
//! fields and `where` clauses are delimited by indentation. The grammar
//! opens a block with [`PushColumn`](crate::ExternalKind::PushColumn) at the
//! block's first token; the scanner then answers three questions about each
//! later line against the innermost threshold:
//!
//! ```text
//! theorem t : p := by
//!   intro h          -- PushColumn (threshold 2)
//!   exact h          -- EqualColumnStart: sibling at column 2
//! def next := 1      -- Dedent: column 0 < 2, block closes
//! ```
//!
//! Bar and `else` guards ask the opposite question: does a `|` / `else`
//! sit to the right of the threshold (continuing the current construct)
//! rather than at or left of it (starting something new)?
//!
//! All tokens here are zero-width except the guards, which consume their
//! `|` or `else`.

use smallvec::SmallVec;

use crate::cursor::ScanCursor;
use crate::snapshot::Effect;

/// Indentation thresholds of the open layout blocks, innermost on top.
///
/// Monotonic non-decreasing bottom-to-top. Only ever compared against the
/// column of the current line's first significant token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColumnStack {
    columns: SmallVec<[u32; 8]>,
}

impl ColumnStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stack from persisted columns, rejecting non-monotonic input.
    pub(crate) fn from_columns(columns: &[u32]) -> Option<Self> {
        if columns.windows(2).any(|pair| pair[0] > pair[1]) {
            return None;
        }
        Some(Self {
            columns: SmallVec::from_slice(columns),
        })
    }

    /// Open a block whose items start at `column`.
    ///
    /// A column left of the enclosing threshold is raised to it, so an inner
    /// block never outlives its parent. Returns the recorded threshold.
    pub fn push_column(&mut self, column: u32) -> u32 {
        let column = self.top().map_or(column, |top| column.max(top));
        self.columns.push(column);
        column
    }

    /// Close the innermost block. `None` if no block is open.
    pub fn pop_column(&mut self) -> Option<u32> {
        self.columns.pop()
    }

    /// Close the innermost block if `column` is left of its threshold.
    pub fn dedent_if_below(&mut self, column: u32) -> bool {
        if self.is_below_top(column) {
            self.columns.pop();
            true
        } else {
            false
        }
    }

    /// `column` starts a sibling item of the innermost block.
    pub fn matches_top(&self, column: u32) -> bool {
        self.top() == Some(column)
    }

    /// `column` is right of the innermost threshold. With no open block
    /// every column qualifies.
    pub fn greater_than_top(&self, column: u32) -> bool {
        match self.top() {
            Some(top) => column > top,
            None => true,
        }
    }

    /// `column` is left of the innermost threshold.
    pub fn is_below_top(&self, column: u32) -> bool {
        self.top().is_some_and(|top| column < top)
    }

    pub fn top(&self) -> Option<u32> {
        self.columns.last().copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Thresholds bottom-to-top.
    pub fn as_slice(&self) -> &[u32] {
        &self.columns
    }
}

// ─── Candidates ─────────────────────────────────────────────────

/// Implicit block close: the next line starts left of the threshold, or
/// input ended with the block still open.
pub(crate) fn scan_dedent(
    cur: &mut ScanCursor<'_>,
    stack: &ColumnStack,
    close_at_eof: bool,
) -> Option<Effect> {
    if stack.is_empty() {
        return None;
    }
    cur.skip_trivia();
    if cur.is_eof() {
        return close_at_eof.then_some(Effect::PopColumn);
    }
    let column = cur.column();
    (cur.at_line_head() && stack.is_below_top(column)).then_some(Effect::Dedent(column))
}

/// Sibling item: the next line starts exactly at the threshold.
pub(crate) fn scan_equal_column(cur: &mut ScanCursor<'_>, stack: &ColumnStack) -> Option<Effect> {
    cur.skip_trivia();
    if cur.is_eof() || !cur.at_line_head() {
        return None;
    }
    stack.matches_top(cur.column()).then_some(Effect::None)
}

/// `|` right of the threshold. Not claimed when it begins a longer
/// operator (`||`, `|>`, `|>.`, `|||`).
pub(crate) fn scan_greater_bar(cur: &mut ScanCursor<'_>, stack: &ColumnStack) -> Option<Effect> {
    cur.skip_trivia();
    if cur.current() != b'|' || matches!(cur.peek(), b'|' | b'>' | b'.') {
        return None;
    }
    if !stack.greater_than_top(cur.column()) {
        return None;
    }
    cur.advance();
    Some(Effect::None)
}

/// `else` right of the threshold, as a whole word.
pub(crate) fn scan_greater_else(cur: &mut ScanCursor<'_>, stack: &ColumnStack) -> Option<Effect> {
    const ELSE: &[u8] = b"else";
    cur.skip_trivia();
    if !cur.starts_with(ELSE) || !stack.greater_than_top(cur.column()) {
        return None;
    }
    cur.advance_n(4);
    if is_ident_continue(cur.current()) {
        return None;
    }
    Some(Effect::None)
}

/// Open a block at the column of the next token. Always succeeds.
pub(crate) fn scan_push(cur: &mut ScanCursor<'_>) -> Option<Effect> {
    cur.skip_trivia();
    Some(Effect::PushColumn(cur.column()))
}

/// Explicit block close. Fails on an empty stack.
pub(crate) fn scan_pop(cur: &mut ScanCursor<'_>, stack: &ColumnStack) -> Option<Effect> {
    if stack.is_empty() {
        return None;
    }
    cur.skip_trivia();
    Some(Effect::PopColumn)
}

/// Bytes that may continue an identifier. Non-ASCII bytes count, so
/// `elseα` stays one identifier.
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'\'' | b'!' | b'?') || byte >= 0x80
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
