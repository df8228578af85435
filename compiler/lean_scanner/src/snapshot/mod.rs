//! Scanner snapshot: the complete state threaded between calls.
//!
//! A snapshot is a plain value. The dispatcher never mutates the snapshot
//! it is given; it returns a new one, so a speculative parse branch forks
//! by cloning and is abandoned by dropping its copy.
//!
//! # Persistence
//!
//! Hosts that re-lex from an arbitrary offset persist snapshots between
//! edits. The encoding is a version byte followed by a bincode payload of a
//! wire struct kept separate from the in-memory layout:
//!
//! ```text
//! [SNAPSHOT_VERSION, payload...]
//! ```
//!
//! Decoding is all-or-nothing. A version mismatch, a malformed or
//! over-long payload, or a payload that violates the scanner's invariants
//! is an error, and the host must re-lex from the start.

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::bracket::{BracketDepths, BracketKind};
use crate::layout::ColumnStack;
use crate::raw_string::{RawLiteral, RawPhase};

/// Current persisted format. Bump on any change to [`WireSnapshot`].
pub const SNAPSHOT_VERSION: u8 = 1;

/// Largest encoding a host serialization buffer accepts.
pub const MAX_SERIALIZED_LEN: usize = 1024;

/// Everything the scanner remembers between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Snapshot {
    columns: ColumnStack,
    brackets: BracketDepths,
    literal: Option<RawLiteral>,
    /// Nesting depth while inside a block comment.
    comment: Option<u32>,
}

/// A state change a matched candidate asks for. Candidates only read the
/// snapshot; the dispatcher applies the winner's effect to a copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    None,
    PushColumn(u32),
    PopColumn,
    Dedent(u32),
    OpenBracket(BracketKind),
    CloseBracket(BracketKind),
    EnterRawString(u8),
    RawContentDone,
    ExitRawString,
    ExitComment,
}

impl Snapshot {
    /// The state at the start of a lex session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot positioned inside a block comment `depth` levels deep.
    ///
    /// For hosts that scan a window starting mid-comment (an editor
    /// highlighting only the visible region). `depth` of zero is raised
    /// to one.
    pub fn inside_comment(depth: u32) -> Self {
        Self {
            comment: Some(depth.max(1)),
            ..Self::default()
        }
    }

    pub fn columns(&self) -> &ColumnStack {
        &self.columns
    }

    pub fn brackets(&self) -> &BracketDepths {
        &self.brackets
    }

    /// Raw-literal state, present only between a raw string's start and end.
    pub fn literal(&self) -> Option<RawLiteral> {
        self.literal
    }

    pub fn comment_depth(&self) -> Option<u32> {
        self.comment
    }

    /// No open blocks, brackets, literal, or comment.
    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::PushColumn(column) => {
                self.columns.push_column(column);
            }
            Effect::PopColumn => {
                self.columns.pop_column();
            }
            Effect::Dedent(column) => {
                self.columns.dedent_if_below(column);
            }
            Effect::OpenBracket(kind) => {
                self.brackets.open(kind);
            }
            Effect::CloseBracket(kind) => {
                self.brackets.close(kind);
            }
            Effect::EnterRawString(marker_len) => {
                self.literal = Some(RawLiteral {
                    marker_len,
                    phase: RawPhase::Content,
                });
            }
            Effect::RawContentDone => {
                if let Some(literal) = &mut self.literal {
                    literal.phase = RawPhase::Close;
                }
            }
            Effect::ExitRawString => self.literal = None,
            Effect::ExitComment => self.comment = None,
        }
    }

    /// Encode for persistence.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let wire = WireSnapshot::from(self);
        let payload = wire_options().serialize(&wire)?;
        let len = payload.len() + 1;
        if len > MAX_SERIALIZED_LEN {
            return Err(SnapshotError::TooLarge {
                len,
                max: MAX_SERIALIZED_LEN,
            });
        }
        let mut bytes = Vec::with_capacity(len);
        bytes.push(SNAPSHOT_VERSION);
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Decode a persisted snapshot. Empty input is the initial state.
    ///
    /// Input longer than [`MAX_SERIALIZED_LEN`] is refused before decoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() > MAX_SERIALIZED_LEN {
            return Err(SnapshotError::TooLarge {
                len: bytes.len(),
                max: MAX_SERIALIZED_LEN,
            });
        }
        let Some((&version, payload)) = bytes.split_first() else {
            return Ok(Self::default());
        };
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                found: version,
                expected: SNAPSHOT_VERSION,
            });
        }
        let wire: WireSnapshot = wire_options()
            .with_limit(MAX_SERIALIZED_LEN as u64)
            .deserialize(payload)?;
        wire.into_snapshot()
    }
}

/// Why a persisted snapshot (or checkpoint) cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot format version {found}, expected {expected}")]
    VersionMismatch { found: u8, expected: u8 },

    #[error("malformed snapshot payload: {0}")]
    Malformed(#[from] bincode::Error),

    #[error("snapshot violates scanner invariants: {0}")]
    Inconsistent(&'static str),

    #[error("snapshot needs {len} bytes but the host buffer holds {max}")]
    TooLarge { len: usize, max: usize },

    #[error("checkpoint offset {offset} is not a character boundary in the source")]
    BadOffset { offset: u32 },
}

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new().reject_trailing_bytes()
}

// ─── Wire format (version 1) ────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct WireSnapshot {
    columns: Vec<u32>,
    brackets: [u32; 4],
    literal: Option<WireLiteral>,
    comment: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct WireLiteral {
    marker_len: u8,
    awaiting_close: bool,
}

impl From<&Snapshot> for WireSnapshot {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            columns: snapshot.columns.as_slice().to_vec(),
            brackets: snapshot.brackets.as_array(),
            literal: snapshot.literal.map(|literal| WireLiteral {
                marker_len: literal.marker_len,
                awaiting_close: literal.phase == RawPhase::Close,
            }),
            comment: snapshot.comment,
        }
    }
}

impl WireSnapshot {
    fn into_snapshot(self) -> Result<Snapshot, SnapshotError> {
        let columns = ColumnStack::from_columns(&self.columns)
            .ok_or(SnapshotError::Inconsistent("column stack is not monotonic"))?;
        if self.comment == Some(0) {
            return Err(SnapshotError::Inconsistent("comment depth is zero"));
        }
        if self.comment.is_some() && self.literal.is_some() {
            return Err(SnapshotError::Inconsistent(
                "inside a comment and a raw string at once",
            ));
        }
        Ok(Snapshot {
            columns,
            brackets: BracketDepths::from_array(self.brackets),
            literal: self.literal.map(|wire| RawLiteral {
                marker_len: wire.marker_len,
                phase: if wire.awaiting_close {
                    RawPhase::Close
                } else {
                    RawPhase::Content
                },
            }),
            comment: self.comment,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
