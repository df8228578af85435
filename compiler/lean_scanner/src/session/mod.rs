//! Reference parser host.
//!
//! A real host is a table-driven parser that knows which external kinds are
//! legal at each state. [`LexSession`] models the rest of that host: it owns
//! the input position and the snapshot, advances past what the scanner
//! consumed, falls back to a minimal ordinary tokenizer when no external
//! token matches, and forks for speculative branches.
//!
//! Checkpoints persist a position plus an encoded snapshot. Resuming from a
//! checkpoint that cannot be decoded restarts from offset 0 with a fresh
//! snapshot; it never continues from a partially restored state.

use tracing::debug;

use crate::scanner::{ExternalToken, Scan, Scanner};
use crate::snapshot::{Snapshot, SnapshotError};
use crate::{Cursor, LegalKinds, SourceBuffer, Span};

/// Scanning state over one source buffer.
#[derive(Clone, Debug)]
pub struct LexSession<'src> {
    cursor: Cursor<'src>,
    snapshot: Snapshot,
    scanner: Scanner,
}

/// A persisted resume point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub offset: u32,
    /// [`Snapshot::to_bytes`] output.
    pub state: Vec<u8>,
}

/// How [`LexSession::resume`] got its state.
#[derive(Debug)]
pub enum Resumption {
    Resumed,
    /// The checkpoint was unusable; scanning restarts from the beginning.
    Relexed(SnapshotError),
}

impl Resumption {
    pub fn is_resumed(&self) -> bool {
        matches!(self, Self::Resumed)
    }
}

impl<'src> LexSession<'src> {
    pub fn new(buffer: &'src SourceBuffer, scanner: Scanner) -> Self {
        Self {
            cursor: buffer.cursor(),
            snapshot: Snapshot::new(),
            scanner,
        }
    }

    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn cursor(&self) -> Cursor<'src> {
        self.cursor
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// What the scanner would return here, without moving.
    pub fn peek_external(&self, legal: LegalKinds) -> Scan {
        self.scanner.scan(&self.snapshot, self.cursor, legal)
    }

    /// Scan one external token and, on a match, advance past it and adopt
    /// the new snapshot. No match leaves the session untouched.
    pub fn next_external(&mut self, legal: LegalKinds) -> Option<ExternalToken> {
        let Scan { token, snapshot } = self.peek_external(legal);
        let token = token?;
        self.cursor.jump_to(self.cursor.pos() + token.consumed());
        self.snapshot = snapshot;
        Some(token)
    }

    /// A speculative branch. Dropping it discards everything it scanned.
    #[must_use]
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Consume one ordinary token: a `--` line comment, a word, or a single
    /// codepoint. Leading trivia is skipped. `None` at end of input.
    pub fn advance_ordinary(&mut self) -> Option<Span> {
        self.cursor.skip_trivia();
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.pos();
        if self.cursor.starts_with(b"--") {
            self.cursor.eat_while(|b| b != b'\n' && b != 0);
        } else if self.cursor.lookahead_char().is_some_and(is_word_char) {
            while self.cursor.lookahead_char().is_some_and(is_word_char) {
                self.cursor.advance_char();
            }
        } else {
            self.cursor.advance_char();
        }
        Some(Span::new(start, self.cursor.pos()))
    }

    pub fn text(&self, span: Span) -> &'src str {
        self.cursor.text(span)
    }

    /// Persist the current position and snapshot.
    pub fn checkpoint(&self) -> Result<Checkpoint, SnapshotError> {
        Ok(Checkpoint {
            offset: self.pos(),
            state: self.snapshot.to_bytes()?,
        })
    }

    /// Restore a session from `checkpoint`, or start over if it is unusable.
    pub fn resume(
        buffer: &'src SourceBuffer,
        scanner: Scanner,
        checkpoint: &Checkpoint,
    ) -> (Self, Resumption) {
        match Self::restore(buffer, scanner, checkpoint) {
            Ok(session) => (session, Resumption::Resumed),
            Err(err) => {
                debug!(
                    offset = checkpoint.offset,
                    error = %err,
                    "checkpoint unusable, re-lexing from start"
                );
                (Self::new(buffer, scanner), Resumption::Relexed(err))
            }
        }
    }

    fn restore(
        buffer: &'src SourceBuffer,
        scanner: Scanner,
        checkpoint: &Checkpoint,
    ) -> Result<Self, SnapshotError> {
        let snapshot = Snapshot::from_bytes(&checkpoint.state)?;
        let cursor = buffer
            .cursor_at(checkpoint.offset)
            .ok_or(SnapshotError::BadOffset {
                offset: checkpoint.offset,
            })?;
        Ok(Self {
            cursor,
            snapshot,
            scanner,
        })
    }
}

/// Identifier and number characters, including `.` for dotted names.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '\'' | '.' | '!' | '?')
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
