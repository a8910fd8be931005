//! Deletion handler
//!
//! A deletion cuts the boundary tokens at both ends of the range (a gap
//! keeps its surviving length, a digraph its surviving half), drops every
//! token in between and rescans from just before the cut. The rescan is what
//! re-joins halves that end up next to each other, as when deleting `x` from
//! `/x*` leaves `/*` with the cursor between its two characters.

use super::{advance, retreat, split_token, Location, ReducedModel};
use crate::error::ModelError;
use crate::token::TokenKind;
use crate::token_list::Cursor;

impl ReducedModel {
    /// Deletes `count` characters: forward from the cursor when positive,
    /// backward when negative. The cursor ends where the deleted range began.
    pub fn delete(&mut self, count: isize) -> Result<(), ModelError> {
        if count == 0 {
            return Ok(());
        }
        let len = count.unsigned_abs();
        if count > 0 {
            let available = self.length - self.position;
            if len > available {
                tracing::debug!(len, available, "rejected delete past the end");
                return Err(ModelError::PastEnd {
                    requested: len,
                    available,
                });
            }
        } else {
            if len > self.position {
                tracing::debug!(len, position = self.position, "rejected delete before the start");
                return Err(ModelError::BeforeStart {
                    requested: len,
                    position: self.position,
                });
            }
            retreat(&self.tokens, &mut self.cursor, len);
            self.position -= len;
        }

        self.delete_forward(len);
        self.length -= len;
        self.reset_location();
        tracing::trace!(len, position = self.position, "deleted");
        Ok(())
    }

    fn delete_forward(&mut self, len: usize) {
        let Location { at, offset } = self.cursor;

        // Both ends inside one gap that survives: nothing else can change.
        if let TokenKind::Gap(size) = self.tokens.current(at).kind {
            if offset + len < size || (offset > 0 && offset + len == size) {
                if let TokenKind::Gap(size) = &mut self.tokens.current_mut(at).kind {
                    *size -= len;
                }
                if offset + len == size {
                    self.tokens.next(&mut self.cursor.at);
                    self.cursor.offset = 0;
                }
                return;
            }
        }

        let (anchor, distance) = self.edit_anchor();
        let start = self.clip_left();
        let end = self.clip_right(start, len);
        let left = self.tokens.before(start);
        let removed = self.tokens.collapse(left, end);
        tracing::trace!(removed, "collapsed deleted tokens");
        self.rescan(anchor, distance);
    }

    /// Cuts the token under the cursor so the deleted range starts on a
    /// token boundary. Returns the first token of the range.
    fn clip_left(&mut self) -> Cursor {
        self.boundary_at_cursor()
    }

    /// Cuts the token holding the end of the range so the range ends on a
    /// token boundary. Returns the first token after the range.
    fn clip_right(&mut self, start: Cursor, len: usize) -> Cursor {
        let mut end = Location::new(start);
        advance(&self.tokens, &mut end, len);
        if end.offset == 0 {
            end.at
        } else {
            split_token(&mut self.tokens, end.at, end.offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ModelError;
    use crate::model::ReducedModel;
    use crate::state::LexState;
    use crate::token::{Brace, Token};

    fn tokens(model: &ReducedModel) -> Vec<Token> {
        model.tokens().copied().collect()
    }

    #[test]
    fn test_delete_zero_is_noop() {
        let mut model = ReducedModel::from_text("{a}");
        let before = tokens(&model);
        model.delete(0).unwrap();
        assert_eq!(tokens(&model), before);
        assert_eq!(model.position(), 3);
    }

    #[test]
    fn test_delete_inside_gap_shrinks_it() {
        let mut model = ReducedModel::from_text("{abcd}");
        model.move_to(2).unwrap();
        model.delete(2).unwrap();
        assert_eq!(
            tokens(&model),
            vec![
                Token::brace(Brace::OpenCurly),
                Token::gap(2),
                Token::brace(Brace::CloseCurly),
            ]
        );
        assert_eq!(model.position(), 2);
        assert_eq!(model.offset(), 1);
    }

    #[test]
    fn test_delete_tail_of_gap_moves_cursor_to_next_token() {
        let mut model = ReducedModel::from_text("ab}");
        model.move_to(1).unwrap();
        model.delete(1).unwrap();
        assert_eq!(model.dump(), "gap(1):free | `}`:free");
    }

    #[test]
    fn test_delete_between_halves_rejoins_them() {
        let mut model = ReducedModel::from_text("/x*");
        model.move_to(1).unwrap();
        model.delete(1).unwrap();
        assert_eq!(tokens(&model), vec![Token::brace(Brace::BlockCommentStart)]);
        assert_eq!(model.offset(), 1);
        assert_eq!(model.position(), 1);
    }

    #[test]
    fn test_backspace_removes_half_of_digraph() {
        let mut model = ReducedModel::from_text("/*a");
        model.move_to(2).unwrap();
        model.delete(-1).unwrap();
        assert_eq!(
            tokens(&model),
            vec![Token::brace(Brace::Slash), Token::gap(1)]
        );
        assert_eq!(model.position(), 1);
        assert_eq!(model.offset(), 0);
    }

    #[test]
    fn test_delete_comment_opener_uncomments() {
        let mut model = ReducedModel::from_text("//{\n");
        model.move_to(0).unwrap();
        model.delete(2).unwrap();
        assert_eq!(
            tokens(&model),
            vec![Token::brace(Brace::OpenCurly), Token::brace(Brace::Newline)]
        );
    }

    #[test]
    fn test_delete_spanning_tokens_joins_gaps() {
        let mut model = ReducedModel::from_text("ab(cd)ef");
        model.move_to(1).unwrap();
        model.delete(6).unwrap();
        assert_eq!(tokens(&model), vec![Token::gap(2)]);
        assert_eq!(model.offset(), 1);
    }

    #[test]
    fn test_delete_closing_quote_extends_string() {
        let mut model = ReducedModel::from_text("\"a\" {");
        model.move_to(3).unwrap();
        model.delete(-1).unwrap();
        assert!(model
            .tokens()
            .skip(1)
            .all(|token| token.state == LexState::InsideDoubleQuote));
    }

    #[test]
    fn test_delete_rejects_out_of_bounds() {
        let mut model = ReducedModel::from_text("ab");
        assert_eq!(
            model.delete(1),
            Err(ModelError::PastEnd {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(
            model.delete(-3),
            Err(ModelError::BeforeStart {
                requested: 3,
                position: 2
            })
        );
        assert_eq!(tokens(&model), vec![Token::gap(2)]);
    }

    #[test]
    fn test_delete_everything() {
        let mut model = ReducedModel::from_text("/* { */ \"x\"\n");
        let len = model.len() as isize;
        model.delete(-len).unwrap();
        assert!(model.is_empty());
        assert_eq!(model.token_count(), 0);
        assert_eq!(model.dump(), "|");
    }
}
