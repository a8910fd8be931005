//! Lexical states tracked by the reduced model

use serde::Serialize;
use std::fmt;

/// The lexical context a token is read in.
///
/// Every token in the model is stamped with one of these. Openers and
/// terminators (`//`, `/*`, `*/`, quotes, the newline ending a line comment)
/// are stamped [`LexState::Free`]: they delimit a region without being inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LexState {
    #[default]
    Free,
    InsideLineComment,
    InsideBlockComment,
    InsideSingleQuote,
    InsideDoubleQuote,
}

impl LexState {
    /// True inside `//...` or `/* ... */`
    pub const fn is_commented(self) -> bool {
        matches!(self, Self::InsideLineComment | Self::InsideBlockComment)
    }

    /// True inside a single- or double-quoted string
    pub const fn is_quoted(self) -> bool {
        matches!(self, Self::InsideSingleQuote | Self::InsideDoubleQuote)
    }

    /// True when braces read in this state do not count for matching
    pub const fn is_shadowed(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Short name used in dumps
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::InsideLineComment => "line-comment",
            Self::InsideBlockComment => "block-comment",
            Self::InsideSingleQuote => "single-quote",
            Self::InsideDoubleQuote => "double-quote",
        }
    }
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
