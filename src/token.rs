//! Tokens of the reduced model
//!
//! A token is either a [`TokenKind::Gap`], a run of characters that never
//! matter for brace or comment structure, or a [`TokenKind::Brace`], one of a
//! fixed vocabulary of one- and two-character delimiters.

use std::fmt;

use crate::state::LexState;

/// The delimiter vocabulary. "Brace" covers every significant delimiter,
/// not just `{` and `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brace {
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Star,
    Slash,
    Backslash,
    SingleQuote,
    DoubleQuote,
    Newline,
    /// `//`
    LineComment,
    /// `/*`
    BlockCommentStart,
    /// `*/`
    BlockCommentEnd,
    /// `\\`
    EscapedBackslash,
    /// `\'`
    EscapedSingleQuote,
    /// `\"`
    EscapedDoubleQuote,
}

impl Brace {
    /// Classify a single character. `None` means the character belongs in a gap.
    pub const fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '{' => Self::OpenCurly,
            '}' => Self::CloseCurly,
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            '[' => Self::OpenBracket,
            ']' => Self::CloseBracket,
            ';' => Self::Semicolon,
            '*' => Self::Star,
            '/' => Self::Slash,
            '\\' => Self::Backslash,
            '\'' => Self::SingleQuote,
            '"' => Self::DoubleQuote,
            '\n' => Self::Newline,
            _ => return None,
        })
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::OpenCurly => "{",
            Self::CloseCurly => "}",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::Semicolon => ";",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Backslash => "\\",
            Self::SingleQuote => "'",
            Self::DoubleQuote => "\"",
            Self::Newline => "\n",
            Self::LineComment => "//",
            Self::BlockCommentStart => "/*",
            Self::BlockCommentEnd => "*/",
            Self::EscapedBackslash => "\\\\",
            Self::EscapedSingleQuote => "\\'",
            Self::EscapedDoubleQuote => "\\\"",
        }
    }

    /// Number of characters the brace covers (1 or 2)
    pub const fn len(self) -> usize {
        if self.is_multi_char() {
            2
        } else {
            1
        }
    }

    pub const fn is_multi_char(self) -> bool {
        self.halves().is_some()
    }

    /// The two single-character halves of a digraph
    pub const fn halves(self) -> Option<(Self, Self)> {
        match self {
            Self::LineComment => Some((Self::Slash, Self::Slash)),
            Self::BlockCommentStart => Some((Self::Slash, Self::Star)),
            Self::BlockCommentEnd => Some((Self::Star, Self::Slash)),
            Self::EscapedBackslash => Some((Self::Backslash, Self::Backslash)),
            Self::EscapedSingleQuote => Some((Self::Backslash, Self::SingleQuote)),
            Self::EscapedDoubleQuote => Some((Self::Backslash, Self::DoubleQuote)),
            _ => None,
        }
    }

    /// First character of the brace, as a single-character brace
    pub const fn first_half(self) -> Self {
        match self.halves() {
            Some((first, _)) => first,
            None => self,
        }
    }

    /// The digraph formed by two adjacent single-character braces, if the
    /// pair is recognised in `state`.
    ///
    /// `//` and `/*` only form in free code and `*/` only inside a block
    /// comment. Escapes form everywhere.
    pub const fn combine(first: Self, second: Self, state: LexState) -> Option<Self> {
        match (first, second) {
            (Self::Slash, Self::Slash) if matches!(state, LexState::Free) => {
                Some(Self::LineComment)
            }
            (Self::Slash, Self::Star) if matches!(state, LexState::Free) => {
                Some(Self::BlockCommentStart)
            }
            (Self::Star, Self::Slash) if matches!(state, LexState::InsideBlockComment) => {
                Some(Self::BlockCommentEnd)
            }
            (Self::Backslash, Self::Backslash) => Some(Self::EscapedBackslash),
            (Self::Backslash, Self::SingleQuote) => Some(Self::EscapedSingleQuote),
            (Self::Backslash, Self::DoubleQuote) => Some(Self::EscapedDoubleQuote),
            _ => None,
        }
    }

    /// Whether a digraph may stand as one token in `state`.
    /// Single-character braces are valid everywhere.
    pub const fn is_valid_in(self, state: LexState) -> bool {
        match self.halves() {
            Some((first, second)) => Self::combine(first, second, state).is_some(),
            None => true,
        }
    }

    pub const fn is_opening(self) -> bool {
        matches!(self, Self::OpenCurly | Self::OpenParen | Self::OpenBracket)
    }

    pub const fn is_closing(self) -> bool {
        matches!(self, Self::CloseCurly | Self::CloseParen | Self::CloseBracket)
    }

    /// The closer that balances an opener, and vice versa
    pub const fn partner(self) -> Option<Self> {
        match self {
            Self::OpenCurly => Some(Self::CloseCurly),
            Self::CloseCurly => Some(Self::OpenCurly),
            Self::OpenParen => Some(Self::CloseParen),
            Self::CloseParen => Some(Self::OpenParen),
            Self::OpenBracket => Some(Self::CloseBracket),
            Self::CloseBracket => Some(Self::OpenBracket),
            _ => None,
        }
    }
}

impl fmt::Display for Brace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.text().chars() {
            write!(f, "{}", ch.escape_default())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of uninteresting characters, stored only by length
    Gap(usize),
    Brace(Brace),
}

/// One entry of the token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexical context of this token, recomputed by the propagation walk
    pub state: LexState,
    /// For quote braces: false when the quote closes a string.
    /// Always true for every other token.
    pub open: bool,
}

impl Token {
    pub const fn gap(len: usize) -> Self {
        Self {
            kind: TokenKind::Gap(len),
            state: LexState::Free,
            open: true,
        }
    }

    pub const fn brace(brace: Brace) -> Self {
        Self {
            kind: TokenKind::Brace(brace),
            state: LexState::Free,
            open: true,
        }
    }

    pub const fn with_state(mut self, state: LexState) -> Self {
        self.state = state;
        self
    }

    pub const fn closing(mut self) -> Self {
        self.open = false;
        self
    }

    /// Number of document characters this token covers
    pub const fn size(&self) -> usize {
        match self.kind {
            TokenKind::Gap(len) => len,
            TokenKind::Brace(brace) => brace.len(),
        }
    }

    pub const fn is_gap(&self) -> bool {
        matches!(self.kind, TokenKind::Gap(_))
    }

    pub const fn brace_kind(&self) -> Option<Brace> {
        match self.kind {
            TokenKind::Brace(brace) => Some(brace),
            TokenKind::Gap(_) => None,
        }
    }

    pub fn is(&self, brace: Brace) -> bool {
        self.brace_kind() == Some(brace)
    }

    pub const fn is_multi_char(&self) -> bool {
        match self.kind {
            TokenKind::Brace(brace) => brace.is_multi_char(),
            TokenKind::Gap(_) => false,
        }
    }

    pub const fn is_newline(&self) -> bool {
        matches!(self.kind, TokenKind::Brace(Brace::Newline))
    }

    /// A brace that counts for matching: an opener or closer read in free code
    pub const fn is_live_brace(&self) -> bool {
        match self.kind {
            TokenKind::Brace(brace) => {
                !self.state.is_shadowed() && (brace.is_opening() || brace.is_closing())
            }
            TokenKind::Gap(_) => false,
        }
    }

    /// The state in effect immediately after this token
    pub const fn exit_state(&self) -> LexState {
        if self.state.is_shadowed() {
            return self.state;
        }
        match self.kind {
            TokenKind::Brace(Brace::LineComment) => LexState::InsideLineComment,
            TokenKind::Brace(Brace::BlockCommentStart) => LexState::InsideBlockComment,
            TokenKind::Brace(Brace::SingleQuote) if self.open => LexState::InsideSingleQuote,
            TokenKind::Brace(Brace::DoubleQuote) if self.open => LexState::InsideDoubleQuote,
            _ => LexState::Free,
        }
    }

    /// Stamp the token for the walk, resetting the quote flag
    pub(crate) fn stamp(&mut self, state: LexState, open: bool) {
        self.state = state;
        self.open = open;
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Gap(len) => write!(f, "gap({len})")?,
            TokenKind::Brace(brace) => write!(f, "`{brace}`")?,
        }
        if matches!(self.kind, TokenKind::Brace(Brace::SingleQuote | Brace::DoubleQuote))
            && !self.open
        {
            f.write_str("(closed)")?;
        }
        write!(f, ":{}", self.state)
    }
}
