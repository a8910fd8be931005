//! Document - a text buffer kept in lockstep with its reduced model

use ropey::Rope;
use std::ops::Range;
use std::path::PathBuf;

use crate::error::ModelError;
use crate::highlight::HighlightSpan;
use crate::model::ReducedModel;
use crate::rescan;
use crate::state::LexState;
use crate::token::Token;

/// The text of one document plus its brace/comment/quote model.
///
/// Every edit goes through both, so the model's cursor doubles as the caret.
#[derive(Debug, Clone, Default)]
pub struct Document {
    buffer: Rope,
    model: ReducedModel,
    /// Path to the file on disk (None for text that did not come from a file)
    pub file_path: Option<PathBuf>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with initial text and the caret at the start
    pub fn with_text(text: &str) -> Self {
        let mut model = ReducedModel::from_text(text);
        model.rewind();
        Self {
            buffer: Rope::from(text),
            model,
            file_path: None,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!(path = %path.display(), chars = content.chars().count(), "loaded document");
        let mut document = Self::with_text(&content);
        document.file_path = Some(path);
        Ok(document)
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn buffer(&self) -> &Rope {
        &self.buffer
    }

    pub fn model(&self) -> &ReducedModel {
        &self.model
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Character offset of the caret
    pub fn caret(&self) -> usize {
        self.model.position()
    }

    pub fn set_caret(&mut self, offset: usize) -> Result<(), ModelError> {
        self.model.move_to(offset)
    }

    /// Inserts `text` at `offset`, leaving the caret after it
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), ModelError> {
        self.model.move_to(offset)?;
        self.buffer.insert(offset, text);
        self.model.insert_str(text);
        tracing::debug!(offset, chars = text.chars().count(), "inserted text");
        Ok(())
    }

    /// Types one character at the caret
    pub fn type_char(&mut self, ch: char) {
        let caret = self.caret();
        self.buffer.insert_char(caret, ch);
        self.model.insert_char(ch);
    }

    /// Removes the characters in `range`, leaving the caret at its start.
    /// A reversed range removes nothing.
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), ModelError> {
        let len = range.end.saturating_sub(range.start);
        if range.end > self.len_chars() {
            return Err(ModelError::PastEnd {
                requested: range.end,
                available: self.len_chars(),
            });
        }
        self.model.move_to(range.start)?;
        if len == 0 {
            return Ok(());
        }
        self.model.delete(len as isize)?;
        self.buffer.remove(range.start..range.start + len);
        tracing::debug!(start = range.start, len, "removed text");
        Ok(())
    }

    /// Deletes the character before the caret
    pub fn backspace(&mut self) -> Result<(), ModelError> {
        self.model.delete(-1)?;
        let caret = self.caret();
        self.buffer.remove(caret..caret + 1);
        Ok(())
    }

    /// Offsets of the brace at the caret and its partner, in document order.
    ///
    /// The caret may sit just before an opener or just after a closer.
    pub fn matching_braces(&self) -> Option<(usize, usize)> {
        let caret = self.caret();
        if let Some(distance) = self.model.balance_forward() {
            return Some((caret, caret + distance - 1));
        }
        self.model
            .balance_backward()
            .map(|distance| (caret - distance, caret - 1))
    }

    /// Offset of the first character of the caret's line
    pub fn line_start(&self) -> usize {
        match self.model.distance_to_previous_newline(0) {
            Ok(Some(distance)) => self.caret() - distance,
            _ => 0,
        }
    }

    /// Offset of the newline ending the caret's line, or the document length
    pub fn line_end(&self) -> usize {
        let caret = self.caret();
        caret
            + self
                .model
                .distance_to_next_newline()
                .unwrap_or(self.len_chars() - caret)
    }

    pub fn highlight(&self, range: Range<usize>) -> Result<Vec<HighlightSpan>, ModelError> {
        let len = range.end.saturating_sub(range.start);
        self.model.highlight_status(range.start, len)
    }

    pub fn state_at_caret(&self) -> LexState {
        self.model.state_at_cursor()
    }

    /// Whether the model still matches a from-scratch lex of the text
    pub fn is_consistent(&self) -> bool {
        let tokens: Vec<Token> = self.model.tokens().copied().collect();
        let expected = rescan::lex(&self.text());
        if tokens != expected {
            tracing::warn!(
                model = tokens.len(),
                rescan = expected.len(),
                "model diverged from rescan"
            );
            return false;
        }
        self.model.len() == self.len_chars()
    }
}
