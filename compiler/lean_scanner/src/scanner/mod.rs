//! Scanner Dispatcher: the entry point the parser calls.
//!
//! `scan(snapshot, cursor, legal) -> Scan` is a pure function. Every
//! candidate sub-scanner runs on its own copy of the cursor and only
//! *describes* the state change it wants; the winning effect is applied to
//! a clone of the snapshot, so a call that matches nothing returns the
//! input snapshot unchanged and consumes nothing.
//!
//! # Priority
//!
//! ```text
//! mid-literal ─► raw-string content/end only
//! mid-comment ─► comment body only
//! otherwise   ─► layout   (dedent, equal, bar, else, push, pop)
//!             ─► lexical  (raw-string start, comment, brackets)
//!             ─► terminal (eof, sentinel)
//! ```
//!
//! The first stage with a match wins. Inside a stage the longest match
//! wins and ties go to the kind listed first. Maximal munch does not
//! reach across stages: a zero-width layout token requested by
//! the grammar beats a bracket at the same position.

use tracing::{debug, trace};

use crate::cursor::ScanCursor;
use crate::kind::{ExternalKind, LegalKinds};
use crate::raw_string::{RawLiteral, RawPhase};
use crate::snapshot::{Effect, Snapshot};
use crate::{bracket, comment, layout, raw_string, terminal, Cursor, Span};

/// Knobs for host conventions that differ between parser drivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Treat a call that lists [`ExternalKind::ErrorSentinel`] as legal as
    /// error recovery and match nothing, so the parser's own recovery runs.
    pub recovery_bailout: bool,
    /// Close open layout blocks (one `Dedent` per block) at end of input.
    pub close_blocks_at_eof: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            recovery_bailout: false,
            close_blocks_at_eof: true,
        }
    }
}

/// A matched external token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExternalToken {
    pub kind: ExternalKind,
    /// Token text, after any skipped trivia. Empty for zero-width kinds.
    pub span: Span,
    /// Trivia bytes skipped in front of the token.
    pub skipped: u32,
}

impl ExternalToken {
    /// Input units the parser must advance past.
    pub fn consumed(&self) -> u32 {
        self.skipped + self.span.len()
    }
}

/// Result of one dispatcher call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scan {
    pub token: Option<ExternalToken>,
    /// State for the next call. Equal to the input on no match.
    pub snapshot: Snapshot,
}

impl Scan {
    fn no_match(snapshot: &Snapshot) -> Self {
        Self {
            token: None,
            snapshot: snapshot.clone(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.token.is_some()
    }

    pub fn consumed(&self) -> u32 {
        self.token.map_or(0, |token| token.consumed())
    }
}

/// The external scanner. Holds configuration only; all lexing state lives in
/// the [`Snapshot`] the caller threads through.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ScannerConfig {
        self.config
    }

    /// Try to produce one external token at `cursor`.
    pub fn scan(&self, snapshot: &Snapshot, cursor: Cursor<'_>, legal: LegalKinds) -> Scan {
        if self.config.recovery_bailout && legal.admits(ExternalKind::ErrorSentinel) {
            debug!(pos = cursor.pos(), "error recovery in progress, yielding");
            return Scan::no_match(snapshot);
        }

        let origin = ScanCursor::new(cursor);
        let winner = if let Some(literal) = snapshot.literal() {
            literal_stage(origin, literal, legal)
        } else if let Some(depth) = snapshot.comment_depth() {
            attempt(ExternalKind::CommentBody, origin, legal, |c| {
                comment::resume_comment(c, depth)
            })
        } else {
            self.layout_stage(origin, snapshot, legal)
                .or_else(|| lexical_stage(origin, snapshot, legal))
                .or_else(|| terminal_stage(origin, legal))
        };

        let Some(winner) = winner else {
            return Scan::no_match(snapshot);
        };
        let token = winner.token();
        trace!(
            kind = token.kind.name(),
            span_start = token.span.start,
            span_end = token.span.end,
            skipped = token.skipped,
            "external token"
        );
        let mut next = snapshot.clone();
        next.apply(winner.effect);
        Scan {
            token: Some(token),
            snapshot: next,
        }
    }

    fn layout_stage<'a>(
        &self,
        origin: ScanCursor<'a>,
        snapshot: &Snapshot,
        legal: LegalKinds,
    ) -> Option<Candidate<'a>> {
        if !legal.intersects(LegalKinds::LAYOUT) {
            return None;
        }
        let stack = snapshot.columns();
        let close_at_eof = self.config.close_blocks_at_eof;
        longest([
            attempt(ExternalKind::Dedent, origin, legal, |c| {
                layout::scan_dedent(c, stack, close_at_eof)
            }),
            attempt(ExternalKind::EqualColumnStart, origin, legal, |c| {
                layout::scan_equal_column(c, stack)
            }),
            attempt(ExternalKind::GreaterColumnBar, origin, legal, |c| {
                layout::scan_greater_bar(c, stack)
            }),
            attempt(ExternalKind::GreaterColumnElse, origin, legal, |c| {
                layout::scan_greater_else(c, stack)
            }),
            attempt(ExternalKind::PushColumn, origin, legal, layout::scan_push),
            attempt(ExternalKind::PopColumn, origin, legal, |c| {
                layout::scan_pop(c, stack)
            }),
        ])
    }
}

/// [`Scanner::scan`] with the default configuration.
pub fn scan(snapshot: &Snapshot, cursor: Cursor<'_>, legal: LegalKinds) -> Scan {
    Scanner::default().scan(snapshot, cursor, legal)
}

// ─── Stages ─────────────────────────────────────────────────────

fn literal_stage<'a>(
    origin: ScanCursor<'a>,
    literal: RawLiteral,
    legal: LegalKinds,
) -> Option<Candidate<'a>> {
    let RawLiteral { marker_len, phase } = literal;
    match phase {
        RawPhase::Content => attempt(ExternalKind::RawStringContent, origin, legal, |c| {
            raw_string::scan_content(c, marker_len)
        }),
        RawPhase::Close => attempt(ExternalKind::RawStringEnd, origin, legal, |c| {
            raw_string::scan_end(c, marker_len)
        }),
    }
}

fn lexical_stage<'a>(
    origin: ScanCursor<'a>,
    snapshot: &Snapshot,
    legal: LegalKinds,
) -> Option<Candidate<'a>> {
    if !legal.intersects(LegalKinds::LEXICAL) {
        return None;
    }
    let bracket = {
        let mut cursor = origin;
        bracket::scan_bracket(&mut cursor, snapshot.brackets(), legal).map(|(kind, effect)| {
            Candidate {
                kind,
                cursor,
                effect,
            }
        })
    };
    longest([
        attempt(
            ExternalKind::RawStringStart,
            origin,
            legal,
            raw_string::scan_start,
        ),
        attempt(
            ExternalKind::CommentBody,
            origin,
            legal,
            comment::scan_comment,
        ),
        bracket,
    ])
}

fn terminal_stage(origin: ScanCursor<'_>, legal: LegalKinds) -> Option<Candidate<'_>> {
    attempt(ExternalKind::Eof, origin, legal, terminal::scan_eof).or_else(|| {
        attempt(
            ExternalKind::ErrorSentinel,
            origin,
            legal,
            terminal::scan_error_sentinel,
        )
    })
}

// ─── Candidates ─────────────────────────────────────────────────

/// A sub-scanner's proposal: where its token ends and what it would change.
#[derive(Clone, Copy)]
struct Candidate<'a> {
    kind: ExternalKind,
    cursor: ScanCursor<'a>,
    effect: Effect,
}

impl Candidate<'_> {
    fn end(&self) -> u32 {
        self.cursor.token_span().end
    }

    fn token(&self) -> ExternalToken {
        ExternalToken {
            kind: self.kind,
            span: self.cursor.token_span(),
            skipped: self.cursor.skipped(),
        }
    }
}

/// Run `scan` on a copy of `origin` if `kind` is legal.
fn attempt<'a>(
    kind: ExternalKind,
    origin: ScanCursor<'a>,
    legal: LegalKinds,
    scan: impl FnOnce(&mut ScanCursor<'a>) -> Option<Effect>,
) -> Option<Candidate<'a>> {
    if !legal.admits(kind) {
        return None;
    }
    let mut cursor = origin;
    let effect = scan(&mut cursor)?;
    Some(Candidate {
        kind,
        cursor,
        effect,
    })
}

/// Maximal munch. Ties keep the earlier candidate.
fn longest<'a, const N: usize>(candidates: [Option<Candidate<'a>>; N]) -> Option<Candidate<'a>> {
    candidates
        .into_iter()
        .flatten()
        .fold(None, |best, next| match best {
            Some(best) if best.end() >= next.end() => Some(best),
            _ => Some(next),
        })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
