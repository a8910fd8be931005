//! Highlight classes derived from the stamped token states

use serde::Serialize;

use crate::error::ModelError;
use crate::model::ReducedModel;
use crate::state::LexState;
use crate::token::{Brace, Token, TokenKind};

/// How a run of characters should be coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightKind {
    Normal,
    Comment,
    SingleQuoted,
    DoubleQuoted,
}

impl HighlightKind {
    /// Comment and string delimiters take the colour of what they delimit.
    pub fn of(token: &Token) -> Self {
        match token.state {
            LexState::InsideLineComment | LexState::InsideBlockComment => Self::Comment,
            LexState::InsideSingleQuote => Self::SingleQuoted,
            LexState::InsideDoubleQuote => Self::DoubleQuoted,
            LexState::Free => match token.kind {
                TokenKind::Brace(
                    Brace::LineComment | Brace::BlockCommentStart | Brace::BlockCommentEnd,
                ) => Self::Comment,
                TokenKind::Brace(Brace::SingleQuote) => Self::SingleQuoted,
                TokenKind::Brace(Brace::DoubleQuote) => Self::DoubleQuoted,
                _ => Self::Normal,
            },
        }
    }
}

/// A highlighted run of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub kind: HighlightKind,
    /// Start offset in the document (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl HighlightSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The kind covering `offset`, if any span does. Spans must be sorted.
pub fn kind_at(spans: &[HighlightSpan], offset: usize) -> Option<HighlightKind> {
    for span in spans {
        if offset >= span.start && offset < span.end {
            return Some(span.kind);
        }
        if span.start > offset {
            break;
        }
    }
    None
}

impl ReducedModel {
    /// Highlight spans covering `len` characters from `start`.
    ///
    /// Neighbouring characters of the same kind share one span. The cursor
    /// and the walker are left where they are.
    pub fn highlight_status(
        &self,
        start: usize,
        len: usize,
    ) -> Result<Vec<HighlightSpan>, ModelError> {
        let end = match start.checked_add(len) {
            Some(end) if end <= self.len() => end,
            _ => {
                return Err(ModelError::PastEnd {
                    requested: start.saturating_add(len),
                    available: self.len(),
                })
            }
        };

        let mut spans: Vec<HighlightSpan> = Vec::new();
        let mut loc = self.locate(start);
        let mut pos = start;
        while pos < end {
            let token = self.tokens.current(loc.at);
            let take = (token.size() - loc.offset).min(end - pos);
            let kind = HighlightKind::of(token);
            match spans.last_mut() {
                Some(last) if last.kind == kind => last.end = pos + take,
                _ => spans.push(HighlightSpan {
                    kind,
                    start: pos,
                    end: pos + take,
                }),
            }
            pos += take;
            loc.offset = 0;
            self.tokens.next(&mut loc.at);
        }
        Ok(spans)
    }
}
