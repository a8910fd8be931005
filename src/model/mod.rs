//! The reduced model - incremental brace/quote/comment shape of a document
//!
//! The model never sees the document text. It is told about every edit, one
//! character (or one deletion) at a time, and keeps a [`TokenList`] in the
//! same shape a from-scratch lex of the text would produce (see
//! [`crate::rescan`]). Edits only rebuild the tokens from just before the
//! edit point onward.
//!
//! # Positions
//!
//! The primary cursor is a token plus an offset into it. The offset is always
//! smaller than the token's size; the end of the document is the tail sentinel
//! at offset 0. The cursor may rest between the two characters of a digraph
//! such as `/*` after a move or deletion; any insertion there splits the
//! digraph first.
//!
//! A second cursor, the walker, answers read-only probes without disturbing
//! the primary cursor. It snaps back to the primary cursor after every edit
//! or move and whenever [`ReducedModel::reset_location`] is called.

mod braces;
mod delete;
mod insert;
mod query;
mod walk;

use std::fmt;

use crate::error::ModelError;
use crate::state::LexState;
use crate::token::{Token, TokenKind};
use crate::token_list::{Cursor, Iter, TokenList};

/// A token in the list plus a character offset into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Location {
    pub at: Cursor,
    pub offset: usize,
}

impl Location {
    pub const fn new(at: Cursor) -> Self {
        Self { at, offset: 0 }
    }
}

/// Incremental brace/quote/comment classification of one document.
#[derive(Debug, Clone)]
pub struct ReducedModel {
    pub(crate) tokens: TokenList,
    cursor: Location,
    /// Absolute character offset of the primary cursor
    position: usize,
    /// Total characters in the document
    length: usize,
    walker: Location,
    walker_position: usize,
}

impl Default for ReducedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReducedModel {
    /// An empty document
    pub fn new() -> Self {
        let tokens = TokenList::new();
        let end = Location::new(tokens.end());
        Self {
            tokens,
            cursor: end,
            position: 0,
            length: 0,
            walker: end,
            walker_position: 0,
        }
    }

    /// A model built by typing `text`. The cursor ends after the last character.
    pub fn from_text(text: &str) -> Self {
        let mut model = Self::new();
        model.insert_str(text);
        model
    }

    /// Absolute character offset of the cursor
    pub fn position(&self) -> usize {
        self.position
    }

    /// Characters in the document
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Offset of the cursor inside [`Self::current_token`]
    pub fn offset(&self) -> usize {
        self.cursor.offset
    }

    /// The token under the cursor, `None` at the end of the document
    pub fn current_token(&self) -> Option<&Token> {
        if self.tokens.at_end(self.cursor.at) {
            None
        } else {
            Some(self.tokens.current(self.cursor.at))
        }
    }

    pub fn tokens(&self) -> Iter<'_> {
        self.tokens.iter()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Moves the cursor `count` characters; negative moves backward.
    pub fn move_by(&mut self, count: isize) -> Result<(), ModelError> {
        let distance = count.unsigned_abs();
        if count >= 0 {
            let available = self.length - self.position;
            if distance > available {
                tracing::debug!(distance, available, "rejected move past the end");
                return Err(ModelError::PastEnd {
                    requested: distance,
                    available,
                });
            }
            advance(&self.tokens, &mut self.cursor, distance);
            self.position += distance;
        } else {
            if distance > self.position {
                tracing::debug!(distance, position = self.position, "rejected move before the start");
                return Err(ModelError::BeforeStart {
                    requested: distance,
                    position: self.position,
                });
            }
            retreat(&self.tokens, &mut self.cursor, distance);
            self.position -= distance;
        }
        self.reset_location();
        Ok(())
    }

    /// Moves the cursor to an absolute character offset
    pub fn move_to(&mut self, target: usize) -> Result<(), ModelError> {
        if target > self.length {
            return Err(ModelError::PastEnd {
                requested: target - self.position,
                available: self.length - self.position,
            });
        }
        if target >= self.position {
            advance(&self.tokens, &mut self.cursor, target - self.position);
        } else {
            retreat(&self.tokens, &mut self.cursor, self.position - target);
        }
        self.position = target;
        self.reset_location();
        Ok(())
    }

    /// Moves the cursor to the start of the document
    pub fn rewind(&mut self) {
        self.cursor = Location::new(self.tokens.first());
        self.position = 0;
        self.reset_location();
    }

    /// Human-readable token list with `|` marking the cursor.
    /// A cursor inside a token shows as `|+offset` ahead of it.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// The location `target` characters into the document, found from the cursor
    pub(crate) fn locate(&self, target: usize) -> Location {
        debug_assert!(target <= self.length);
        let mut loc = self.cursor;
        if target >= self.position {
            advance(&self.tokens, &mut loc, target - self.position);
        } else {
            retreat(&self.tokens, &mut loc, self.position - target);
        }
        loc
    }

    /// The token whose shape an edit at the cursor can no longer disturb,
    /// and the character distance from its end to the cursor.
    ///
    /// The walk after an edit restarts just after the anchor: at the token
    /// holding the character before the cursor, which may merge with what
    /// gets inserted.
    fn edit_anchor(&self) -> (Cursor, usize) {
        let Location { at, offset } = self.cursor;
        if offset > 0 {
            return (self.tokens.before(at), offset);
        }
        match self.tokens.peek_back(at) {
            Some(prev) => {
                let prev_at = self.tokens.before(at);
                (self.tokens.before(prev_at), prev.size())
            }
            None => (self.tokens.start(), 0),
        }
    }

    /// Splits the token under the cursor so the cursor sits on a token
    /// boundary, returning the token that now starts at the cursor.
    fn boundary_at_cursor(&mut self) -> Cursor {
        let Location { at, offset } = self.cursor;
        if offset == 0 {
            return at;
        }
        split_token(&mut self.tokens, at, offset)
    }

    /// Re-runs the propagation walk from just after `anchor` and puts the
    /// cursor `distance` characters past the anchor's end.
    fn rescan(&mut self, anchor: Cursor, distance: usize) {
        let start = self.tokens.after(anchor);
        let state = if self.tokens.at_start(anchor) {
            LexState::Free
        } else {
            self.tokens.current(anchor).exit_state()
        };
        walk::propagate(&mut self.tokens, start, state);

        let mut loc = Location::new(self.tokens.after(anchor));
        advance(&self.tokens, &mut loc, distance);
        self.cursor = loc;
    }

    fn state_at(&self, loc: Location) -> LexState {
        if self.tokens.at_end(loc.at) {
            walk::state_before(&self.tokens, loc.at)
        } else {
            self.tokens.current(loc.at).state
        }
    }
}

/// Moves `loc` forward `count` characters. The caller has checked the bounds.
pub(crate) fn advance(tokens: &TokenList, loc: &mut Location, count: usize) {
    let mut remaining = count;
    while remaining > 0 {
        assert!(
            !tokens.at_end(loc.at),
            "advance overran the token list by {remaining} characters"
        );
        let size = tokens.current(loc.at).size();
        if loc.offset + remaining < size {
            loc.offset += remaining;
            return;
        }
        remaining -= size - loc.offset;
        loc.offset = 0;
        tokens.next(&mut loc.at);
    }
}

/// Moves `loc` backward `count` characters. The caller has checked the bounds.
pub(crate) fn retreat(tokens: &TokenList, loc: &mut Location, count: usize) {
    let mut remaining = count;
    while remaining > loc.offset {
        remaining -= loc.offset;
        tokens.prev(&mut loc.at);
        assert!(
            !tokens.at_start(loc.at),
            "retreat overran the token list by {remaining} characters"
        );
        loc.offset = tokens.current(loc.at).size();
    }
    loc.offset -= remaining;
}

/// Splits the token under `at` after its first `offset` characters and
/// returns the cursor of the right-hand part.
///
/// A gap splits into two gaps, a digraph at offset 1 into its halves.
/// Anything else cannot be split.
pub(crate) fn split_token(tokens: &mut TokenList, at: Cursor, offset: usize) -> Cursor {
    let token = *tokens.current(at);
    let (left, right) = match (token.kind, offset) {
        (TokenKind::Gap(len), _) if offset > 0 && offset < len => {
            (TokenKind::Gap(offset), Token::gap(len - offset))
        }
        (TokenKind::Brace(brace), 1) => match brace.halves() {
            Some((first, second)) => (TokenKind::Brace(first), Token::brace(second)),
            None => panic!("cannot split single-character brace {token}"),
        },
        _ => panic!("cannot split {token} at offset {offset}"),
    };
    tokens.current_mut(at).kind = left;
    tokens.insert_after(at, right.with_state(token.state))
}

impl fmt::Display for ReducedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = Vec::with_capacity(self.tokens.len() + 1);
        let mut at = self.tokens.first();
        loop {
            if at == self.cursor.at {
                if self.cursor.offset == 0 {
                    items.push("|".to_string());
                } else {
                    items.push(format!("|+{}", self.cursor.offset));
                }
            }
            if self.tokens.at_end(at) {
                break;
            }
            items.push(self.tokens.current(at).to_string());
            self.tokens.next(&mut at);
        }
        f.write_str(&items.join(" "))
    }
}
