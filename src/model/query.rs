//! Read-only queries: newline distances and the walker probe

use super::{advance, retreat, ReducedModel};
use crate::error::ModelError;
use crate::state::LexState;

impl ReducedModel {
    /// Distance from the point `back` characters before the cursor to the
    /// start of its line, i.e. to just after the nearest preceding newline.
    ///
    /// `Ok(None)` when no newline precedes the point.
    pub fn distance_to_previous_newline(&self, back: usize) -> Result<Option<usize>, ModelError> {
        if back > self.position {
            return Err(ModelError::BeforeStart {
                requested: back,
                position: self.position,
            });
        }
        let mut loc = self.cursor;
        retreat(&self.tokens, &mut loc, back);

        let mut distance = loc.offset;
        let mut at = loc.at;
        while let Some(prev) = self.tokens.peek_back(at) {
            if prev.is_newline() {
                return Ok(Some(distance));
            }
            distance += prev.size();
            self.tokens.prev(&mut at);
        }
        Ok(None)
    }

    /// Distance from the cursor to the next newline, `None` if there is none
    pub fn distance_to_next_newline(&self) -> Option<usize> {
        let mut at = self.cursor.at;
        let mut distance = 0;
        let mut offset = self.cursor.offset;
        while !self.tokens.at_end(at) {
            let token = self.tokens.current(at);
            if token.is_newline() {
                return Some(distance);
            }
            distance += token.size() - offset;
            offset = 0;
            self.tokens.next(&mut at);
        }
        None
    }

    /// Lexical state of the character just after the cursor. At the end of
    /// the document, the state the text ends in.
    pub fn state_at_cursor(&self) -> LexState {
        self.state_at(self.cursor)
    }

    /// Moves the walker `rel` characters from where it is and reports the
    /// lexical state there, without touching the cursor.
    ///
    /// Probes accumulate until the cursor moves or the text is edited, which
    /// puts the walker back on the cursor.
    pub fn state_at_rel_location(&mut self, rel: isize) -> Result<LexState, ModelError> {
        let distance = rel.unsigned_abs();
        if rel >= 0 {
            let available = self.length - self.walker_position;
            if distance > available {
                return Err(ModelError::PastEnd {
                    requested: distance,
                    available,
                });
            }
            advance(&self.tokens, &mut self.walker, distance);
            self.walker_position += distance;
        } else {
            if distance > self.walker_position {
                return Err(ModelError::BeforeStart {
                    requested: distance,
                    position: self.walker_position,
                });
            }
            retreat(&self.tokens, &mut self.walker, distance);
            self.walker_position -= distance;
        }
        Ok(self.state_at(self.walker))
    }

    /// Snaps the walker back to the cursor
    pub fn reset_location(&mut self) {
        self.walker = self.cursor;
        self.walker_position = self.position;
    }
}
