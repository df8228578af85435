//! External token kinds and the legal-kind capability set.
//!
//! The discriminants follow the order of the grammar's `externals` array;
//! the parser host indexes its `valid_symbols` with them, so they are part
//! of the wire contract and must never be reordered.

use bitflags::bitflags;

/// A token kind produced by the external scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExternalKind {
    // === Raw string literals ===
    RawStringStart = 0,
    RawStringContent = 1,
    RawStringEnd = 2,

    // === Comments ===
    CommentBody = 3,

    // === Layout ===
    PushColumn = 4,
    PopColumn = 5,
    EqualColumnStart = 6,
    GreaterColumnBar = 7,
    GreaterColumnElse = 8,
    Dedent = 9,

    // === Brackets ===
    ParenOpen = 10,
    ParenClose = 11,
    AngleOpen = 12,
    AngleClose = 13,
    CurlyOpen = 14,
    CurlyClose = 15,
    SquareOpen = 16,
    SquareClose = 17,

    // === Terminal ===
    Eof = 18,
    ErrorSentinel = 19,
}

impl ExternalKind {
    /// Every kind, in discriminant order.
    pub const ALL: [ExternalKind; 20] = [
        Self::RawStringStart,
        Self::RawStringContent,
        Self::RawStringEnd,
        Self::CommentBody,
        Self::PushColumn,
        Self::PopColumn,
        Self::EqualColumnStart,
        Self::GreaterColumnBar,
        Self::GreaterColumnElse,
        Self::Dedent,
        Self::ParenOpen,
        Self::ParenClose,
        Self::AngleOpen,
        Self::AngleClose,
        Self::CurlyOpen,
        Self::CurlyClose,
        Self::SquareOpen,
        Self::SquareClose,
        Self::Eof,
        Self::ErrorSentinel,
    ];

    /// Kind for a `valid_symbols` index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The symbol name the grammar declares for this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RawStringStart => "_raw_str_start",
            Self::RawStringContent => "raw_str_content",
            Self::RawStringEnd => "_raw_str_end",
            Self::CommentBody => "comment_body",
            Self::PushColumn => "_push_col",
            Self::PopColumn => "_pop_col",
            Self::EqualColumnStart => "_eq_col_start",
            Self::GreaterColumnBar => "gt_col_bar",
            Self::GreaterColumnElse => "gt_col_else",
            Self::Dedent => "_dedent",
            Self::ParenOpen => "paren_open",
            Self::ParenClose => "paren_close",
            Self::AngleOpen => "angle_open",
            Self::AngleClose => "angle_close",
            Self::CurlyOpen => "curly_open",
            Self::CurlyClose => "curly_close",
            Self::SquareOpen => "square_open",
            Self::SquareClose => "square_close",
            Self::Eof => "_eof",
            Self::ErrorSentinel => "__error_sentinel",
        }
    }

    /// The single-bit capability set for this kind.
    #[inline]
    pub const fn bit(self) -> LegalKinds {
        LegalKinds::from_bits_retain(1 << self as u8)
    }

    /// Returns `true` for tokens that never consume input.
    pub const fn is_zero_width(self) -> bool {
        matches!(
            self,
            Self::PushColumn
                | Self::PopColumn
                | Self::EqualColumnStart
                | Self::Dedent
                | Self::Eof
                | Self::ErrorSentinel
        )
    }
}

bitflags! {
    /// Which external kinds the parser can accept at the current position.
    ///
    /// Passed explicitly on every call; the scanner holds no mode flags of
    /// its own.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LegalKinds: u32 {
        const RAW_STRING_START = 1 << 0;
        const RAW_STRING_CONTENT = 1 << 1;
        const RAW_STRING_END = 1 << 2;
        const COMMENT_BODY = 1 << 3;
        const PUSH_COLUMN = 1 << 4;
        const POP_COLUMN = 1 << 5;
        const EQUAL_COLUMN_START = 1 << 6;
        const GREATER_COLUMN_BAR = 1 << 7;
        const GREATER_COLUMN_ELSE = 1 << 8;
        const DEDENT = 1 << 9;
        const PAREN_OPEN = 1 << 10;
        const PAREN_CLOSE = 1 << 11;
        const ANGLE_OPEN = 1 << 12;
        const ANGLE_CLOSE = 1 << 13;
        const CURLY_OPEN = 1 << 14;
        const CURLY_CLOSE = 1 << 15;
        const SQUARE_OPEN = 1 << 16;
        const SQUARE_CLOSE = 1 << 17;
        const EOF = 1 << 18;
        const ERROR_SENTINEL = 1 << 19;

        // === Groups ===

        /// All three raw-string phases.
        const RAW_STRING = Self::RAW_STRING_START.bits()
            | Self::RAW_STRING_CONTENT.bits()
            | Self::RAW_STRING_END.bits();
        /// Column stack operations and guards.
        const LAYOUT = Self::PUSH_COLUMN.bits()
            | Self::POP_COLUMN.bits()
            | Self::EQUAL_COLUMN_START.bits()
            | Self::GREATER_COLUMN_BAR.bits()
            | Self::GREATER_COLUMN_ELSE.bits()
            | Self::DEDENT.bits();
        /// Every bracket open/close pair.
        const BRACKETS = Self::PAREN_OPEN.bits()
            | Self::PAREN_CLOSE.bits()
            | Self::ANGLE_OPEN.bits()
            | Self::ANGLE_CLOSE.bits()
            | Self::CURLY_OPEN.bits()
            | Self::CURLY_CLOSE.bits()
            | Self::SQUARE_OPEN.bits()
            | Self::SQUARE_CLOSE.bits();
        /// Kinds decidable from the text alone, without grammar context.
        const LEXICAL = Self::RAW_STRING.bits()
            | Self::COMMENT_BODY.bits()
            | Self::BRACKETS.bits()
            | Self::EOF.bits();
    }
}

impl LegalKinds {
    /// Returns `true` if `kind` may be produced.
    #[inline]
    pub const fn admits(self, kind: ExternalKind) -> bool {
        self.contains(kind.bit())
    }

    /// Build a set from a host's `valid_symbols` array.
    ///
    /// Entries past the known kinds are ignored.
    pub fn from_valid_symbols(valid: &[bool]) -> Self {
        valid
            .iter()
            .zip(ExternalKind::ALL)
            .filter(|(ok, _)| **ok)
            .fold(Self::empty(), |set, (_, kind)| set | kind.bit())
    }
}

impl From<ExternalKind> for LegalKinds {
    fn from(kind: ExternalKind) -> Self {
        kind.bit()
    }
}
