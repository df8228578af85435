//! A grammar-free stand-in for the parser host.
//!
//! Without the grammar tables there is no exact legal set per position, so
//! this host approximates one: lexical kinds, dedent, and the bar/else
//! guards are always requested, a block is opened after a block keyword,
//! and a sibling check runs once per position. A close bracket the scanner
//! refused is a syntax error, so the next call is made in recovery mode
//! (with the error sentinel legal).

use lean_scanner::{
    classify, ExternalKind, LegalKinds, LexSession, Scanner, Side, Snapshot, SourceBuffer, Span,
};

/// Ordinary tokens after which the next token opens a layout block.
const BLOCK_OPENERS: &[&str] = &["by", "do", "where", "with"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexemeKind {
    External(ExternalKind),
    Ordinary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub span: Span,
}

/// Why a run stopped before end of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unterminated {
    /// Raw string opened at `start` never found its close.
    RawString { start: u32 },
    /// Block comment opened at `start` never returned to depth zero.
    Comment { start: u32 },
}

#[derive(Debug)]
pub struct HostRun {
    pub lexemes: Vec<Lexeme>,
    /// Scanner state after the last token.
    pub snapshot: Snapshot,
    pub unterminated: Option<Unterminated>,
}

/// Lex `buf` to the end, or until an unterminated literal or comment.
pub fn run(buf: &SourceBuffer, scanner: Scanner) -> HostRun {
    let mut session = LexSession::new(buf, scanner);
    let mut lexemes = Vec::new();
    let mut want_push = false;
    let mut checked_at = None;
    let mut recovering = false;
    let mut literal_start = 0;

    let unterminated = loop {
        let mut legal = LegalKinds::LEXICAL
            | LegalKinds::DEDENT
            | LegalKinds::GREATER_COLUMN_BAR
            | LegalKinds::GREATER_COLUMN_ELSE;
        if want_push {
            legal |= LegalKinds::PUSH_COLUMN;
        } else if checked_at != Some(session.pos()) {
            legal |= LegalKinds::EQUAL_COLUMN_START;
        }
        if std::mem::take(&mut recovering) {
            legal |= LegalKinds::ERROR_SENTINEL;
        }

        if let Some(token) = session.next_external(legal) {
            lexemes.push(Lexeme {
                kind: LexemeKind::External(token.kind),
                span: token.span,
            });
            match token.kind {
                ExternalKind::PushColumn => {
                    want_push = false;
                    checked_at = Some(session.pos());
                }
                ExternalKind::EqualColumnStart => checked_at = Some(session.pos()),
                ExternalKind::RawStringStart => literal_start = token.span.start,
                ExternalKind::Eof => break None,
                _ => {}
            }
            continue;
        }

        if session.snapshot().literal().is_some() {
            break Some(Unterminated::RawString {
                start: literal_start,
            });
        }
        let mut probe = session.cursor();
        probe.skip_trivia();
        if probe.starts_with(b"/-") {
            break Some(Unterminated::Comment { start: probe.pos() });
        }

        let Some(span) = session.advance_ordinary() else {
            break None;
        };
        let text = session.text(span);
        want_push = BLOCK_OPENERS.contains(&text);
        recovering = is_close_glyph(text);
        lexemes.push(Lexeme {
            kind: LexemeKind::Ordinary,
            span,
        });
    };

    HostRun {
        lexemes,
        snapshot: session.snapshot().clone(),
        unterminated,
    }
}

fn is_close_glyph(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next().and_then(classify), chars.next()),
        (Some((_, Side::Close)), None)
    )
}

/// 1-based line and column of `offset`, columns in codepoints.
pub fn line_col(source: &str, offset: u32) -> (usize, usize) {
    let before = source.get(..offset as usize).unwrap_or(source);
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
