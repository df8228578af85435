//! Sentinel & EOF Emitter.
//!
//! [`Eof`](crate::ExternalKind::Eof) lets the module rule demand that all
//! input was consumed, so truncated input fails with a diagnostic at the end
//! instead of being accepted early.
//!
//! [`ErrorSentinel`](crate::ExternalKind::ErrorSentinel) is declared to the
//! parser generator only so that its permanent absence prunes an ambiguous
//! derivation. It never matches.

use crate::cursor::ScanCursor;
use crate::snapshot::Effect;

/// Zero-width token once only trivia remains.
pub(crate) fn scan_eof(cur: &mut ScanCursor<'_>) -> Option<Effect> {
    cur.skip_trivia();
    cur.is_eof().then_some(Effect::None)
}

pub(crate) fn scan_error_sentinel(_cur: &mut ScanCursor<'_>) -> Option<Effect> {
    None
}
