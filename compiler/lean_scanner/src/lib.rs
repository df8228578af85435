//! External scanner for the Lean 4 tree-sitter grammar.
//!
//! The declarative grammar cannot express off-side layout, run-length raw
//! strings, nested comments, or the per-kind bracket tokens its rules are
//! written against. A table-driven parser calls [`scan`] whenever one of
//! those external kinds may come next, passing the set of legal kinds and
//! the snapshot returned by the previous call.
//!
//! # Architecture
//!
//! ```text
//! SourceBuffer ─► Cursor ─► Scanner::scan(&Snapshot, Cursor, LegalKinds)
//!                                 │
//!           ┌──────────┬──────────┼──────────┬──────────┐
//!         layout   raw_string  comment   bracket   terminal
//!                                 │
//!                                 ▼
//!                  Scan { token, snapshot' }
//! ```
//!
//! Every sub-scanner is a pure function of the cursor and the snapshot it
//! reads. The snapshot is an owned value: speculative parse branches fork
//! it by cloning and abandon it by dropping, so there is no shared mutable
//! state and no locking.
//!
//! [`LexSession`] is a small reference host used by the `leanscan` driver
//! and the integration tests.

mod bracket;
mod comment;
mod cursor;
mod kind;
mod layout;
mod raw_string;
mod scanner;
mod session;
mod snapshot;
mod source_buffer;
mod span;
mod terminal;

pub use bracket::{classify, BracketDepths, BracketKind, Side};
pub use comment::{flavor, CommentFlavor};
pub use cursor::{Cursor, ScanCursor};
pub use kind::{ExternalKind, LegalKinds};
pub use layout::ColumnStack;
pub use raw_string::{RawLiteral, RawPhase};
pub use scanner::{scan, ExternalToken, Scan, Scanner, ScannerConfig};
pub use session::{Checkpoint, LexSession, Resumption};
pub use snapshot::{Snapshot, SnapshotError, MAX_SERIALIZED_LEN, SNAPSHOT_VERSION};
pub use source_buffer::SourceBuffer;
pub use span::Span;
