//! Bracket Disambiguator: per-kind depth counters.
//!
//! The same glyphs serve several grammatical roles (`⟨a, b⟩` anonymous
//! constructors, `{x // p}` subtypes versus structure instances, `[..]`
//! list literals versus attribute brackets). Handing the grammar distinct
//! open/close tokens per kind, and only claiming a close when that kind has
//! an open outstanding, keeps those rules free of shift/reduce conflicts.
//!
//! Counters are independent: a `)` only ever looks at the paren counter, so
//! a curly can never be closed by a paren.

use crate::cursor::ScanCursor;
use crate::kind::{ExternalKind, LegalKinds};
use crate::snapshot::Effect;

/// The four ambiguous bracket pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BracketKind {
    /// `(` `)`
    Paren,
    /// `⟨` `⟩`
    Angle,
    /// `{` `}`
    Curly,
    /// `[` `]`
    Square,
}

impl BracketKind {
    pub const ALL: [BracketKind; 4] = [Self::Paren, Self::Angle, Self::Curly, Self::Square];

    pub const fn open_char(self) -> char {
        match self {
            Self::Paren => '(',
            Self::Angle => '⟨',
            Self::Curly => '{',
            Self::Square => '[',
        }
    }

    pub const fn close_char(self) -> char {
        match self {
            Self::Paren => ')',
            Self::Angle => '⟩',
            Self::Curly => '}',
            Self::Square => ']',
        }
    }

    pub const fn open_kind(self) -> ExternalKind {
        match self {
            Self::Paren => ExternalKind::ParenOpen,
            Self::Angle => ExternalKind::AngleOpen,
            Self::Curly => ExternalKind::CurlyOpen,
            Self::Square => ExternalKind::SquareOpen,
        }
    }

    pub const fn close_kind(self) -> ExternalKind {
        match self {
            Self::Paren => ExternalKind::ParenClose,
            Self::Angle => ExternalKind::AngleClose,
            Self::Curly => ExternalKind::CurlyClose,
            Self::Square => ExternalKind::SquareClose,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Which side of a pair a glyph is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Open,
    Close,
}

/// Classify a codepoint as a bracket glyph.
pub fn classify(c: char) -> Option<(BracketKind, Side)> {
    let found = match c {
        '(' => (BracketKind::Paren, Side::Open),
        ')' => (BracketKind::Paren, Side::Close),
        '⟨' => (BracketKind::Angle, Side::Open),
        '⟩' => (BracketKind::Angle, Side::Close),
        '{' => (BracketKind::Curly, Side::Open),
        '}' => (BracketKind::Curly, Side::Close),
        '[' => (BracketKind::Square, Side::Open),
        ']' => (BracketKind::Square, Side::Close),
        _ => return None,
    };
    Some(found)
}

/// Open-bracket depth per kind. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BracketDepths {
    depths: [u32; 4],
}

impl BracketDepths {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_array(depths: [u32; 4]) -> Self {
        Self { depths }
    }

    pub fn depth(&self, kind: BracketKind) -> u32 {
        self.depths[kind.index()]
    }

    /// Record an open. Fails only if the counter is saturated.
    pub fn open(&mut self, kind: BracketKind) -> bool {
        match self.depths[kind.index()].checked_add(1) {
            Some(depth) => {
                self.depths[kind.index()] = depth;
                true
            }
            None => false,
        }
    }

    /// Record a close. Fails, leaving the counter at zero, if no open of
    /// this kind is outstanding.
    pub fn close(&mut self, kind: BracketKind) -> bool {
        match self.depths[kind.index()].checked_sub(1) {
            Some(depth) => {
                self.depths[kind.index()] = depth;
                true
            }
            None => false,
        }
    }

    pub fn can_close(&self, kind: BracketKind) -> bool {
        self.depth(kind) > 0
    }

    /// Every counter is zero.
    pub fn is_balanced(&self) -> bool {
        self.depths.iter().all(|&d| d == 0)
    }

    pub fn as_array(&self) -> [u32; 4] {
        self.depths
    }
}

/// Claim the bracket glyph under the cursor, if its kind is legal.
///
/// Opens are always claimed (short of counter saturation). Closes are
/// claimed only while their own counter is positive; otherwise the glyph is
/// left for the host's ordinary tokenizer.
pub(crate) fn scan_bracket(
    cur: &mut ScanCursor<'_>,
    depths: &BracketDepths,
    legal: LegalKinds,
) -> Option<(ExternalKind, Effect)> {
    if !legal.intersects(LegalKinds::BRACKETS) {
        return None;
    }
    cur.skip_trivia();
    let (kind, side) = classify(cur.lookahead()?)?;
    let found = match side {
        Side::Open if depths.depth(kind) < u32::MAX => {
            (kind.open_kind(), Effect::OpenBracket(kind))
        }
        Side::Close if depths.can_close(kind) => (kind.close_kind(), Effect::CloseBracket(kind)),
        Side::Open | Side::Close => return None,
    };
    if !legal.admits(found.0) {
        return None;
    }
    cur.advance();
    Some(found)
}
