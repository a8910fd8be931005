//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use reduced_model::{rescan, LexState, ReducedModel, Token};

/// Sample source with comments, strings, char literals and escapes
pub const SHAPES: &str = include_str!("../../samples/Shapes.java");

pub fn tokens(model: &ReducedModel) -> Vec<Token> {
    model.tokens().copied().collect()
}

/// A model built by typing `text` one `insert_char` at a time
pub fn typed(text: &str) -> ReducedModel {
    let mut model = ReducedModel::new();
    for ch in text.chars() {
        model.insert_char(ch);
    }
    model
}

/// Asserts the model holds exactly the canonical tokens for `text`
pub fn assert_canonical(model: &ReducedModel, text: &str) {
    assert_eq!(
        tokens(model),
        rescan::lex(text),
        "model diverged from rescan of {text:?}\nmodel: {}",
        model.dump()
    );
    assert_eq!(model.len(), text.chars().count());
}

/// The state a from-scratch lex assigns to the character at `position`,
/// or the state the text ends in when `position` is its length
pub fn expected_state(text: &str, position: usize) -> LexState {
    let mut start = 0;
    let mut last = None;
    for token in rescan::lex(text) {
        if position < start + token.size() {
            return token.state;
        }
        start += token.size();
        last = Some(token);
    }
    last.map_or(LexState::Free, |token| token.exit_state())
}

/// A model driven alongside a plain `String`, checked after every step
pub struct Mirror {
    pub model: ReducedModel,
    pub text: Vec<char>,
    pub caret: usize,
}

impl Mirror {
    pub fn new() -> Self {
        Self {
            model: ReducedModel::new(),
            text: Vec::new(),
            caret: 0,
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn insert(&mut self, ch: char) {
        self.model.insert_char(ch);
        self.text.insert(self.caret, ch);
        self.caret += 1;
    }

    /// Deletes like [`ReducedModel::delete`], returning false when the model
    /// rejected the request.
    pub fn delete(&mut self, count: isize) -> bool {
        if self.model.delete(count).is_err() {
            return false;
        }
        let len = count.unsigned_abs();
        if count < 0 {
            self.caret -= len;
        }
        self.text.drain(self.caret..self.caret + len);
        true
    }

    pub fn move_by(&mut self, count: isize) -> bool {
        if self.model.move_by(count).is_err() {
            return false;
        }
        self.caret = self.caret.checked_add_signed(count).unwrap();
        true
    }

    /// Every property that must hold between operations
    pub fn check(&self) {
        let text = self.text();
        assert_canonical(&self.model, &text);
        assert_eq!(self.model.position(), self.caret);

        match self.model.current_token() {
            Some(token) => assert!(self.model.offset() < token.size()),
            None => {
                assert_eq!(self.model.offset(), 0);
                assert_eq!(self.caret, self.text.len());
            }
        }
        assert_eq!(
            self.model.state_at_cursor(),
            expected_state(&text, self.caret),
            "state at caret {} of {text:?}",
            self.caret
        );
        for token in self.model.tokens() {
            assert!(!(token.state.is_commented() && token.state.is_quoted()));
        }
    }
}
