//! Insertion handlers
//!
//! Every handler leaves the cursor immediately after the inserted text. An
//! insertion that lands between the halves of a digraph splits it first.

use super::{Location, ReducedModel};
use crate::token::{Brace, Token, TokenKind};
use crate::token_list::Cursor;

impl ReducedModel {
    /// Inserts one character at the cursor
    pub fn insert_char(&mut self, ch: char) {
        match Brace::from_char(ch) {
            None => self.insert_gap(1),
            Some(brace @ (Brace::Star | Brace::Slash | Brace::Backslash)) => {
                self.insert_delimiter(brace);
            }
            Some(quote @ (Brace::SingleQuote | Brace::DoubleQuote)) => self.insert_quote(quote),
            Some(brace) => self.insert_lone_brace(brace),
        }
        self.position += 1;
        self.length += 1;
        self.reset_location();
        tracing::trace!(?ch, position = self.position, "inserted");
    }

    /// Inserts `text` at the cursor. Runs of plain characters go in as one gap.
    pub fn insert_str(&mut self, text: &str) {
        let mut plain = 0;
        for ch in text.chars() {
            if Brace::from_char(ch).is_none() {
                plain += 1;
                continue;
            }
            self.flush_gap(plain);
            plain = 0;
            self.insert_char(ch);
        }
        self.flush_gap(plain);
    }

    fn flush_gap(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.insert_gap(len);
        self.position += len;
        self.length += len;
        self.reset_location();
    }

    /// Plain characters never change the shape of anything around them, so
    /// they grow a neighbouring gap in place when there is one.
    fn insert_gap(&mut self, len: usize) {
        let Location { at, offset } = self.cursor;

        if offset > 0 {
            if let TokenKind::Gap(size) = &mut self.tokens.current_mut(at).kind {
                *size += len;
                self.cursor.offset += len;
                return;
            }
            // between the halves of a digraph
            let (anchor, distance) = self.edit_anchor();
            let mut second = self.boundary_at_cursor();
            self.tokens.insert(&mut second, Token::gap(len));
            self.rescan(anchor, distance + len);
            return;
        }

        if matches!(self.tokens.peek_back(at), Some(prev) if prev.is_gap()) {
            let prev = self.tokens.before(at);
            grow_gap(self.tokens.current_mut(prev), len);
            return;
        }
        if !self.tokens.at_end(at) && self.tokens.current(at).is_gap() {
            grow_gap(self.tokens.current_mut(at), len);
            self.cursor.offset = len;
            return;
        }

        let (anchor, distance) = self.edit_anchor();
        let mut next = at;
        self.tokens.insert(&mut next, Token::gap(len));
        self.rescan(anchor, distance + len);
    }

    /// `*`, `/` and `\` widen a lone previous brace into a digraph when the
    /// pair means something where it stands; otherwise they go in alone.
    fn insert_delimiter(&mut self, brace: Brace) {
        let (anchor, distance) = self.edit_anchor();
        let next = self.boundary_at_cursor();
        if !self.widen_previous(next, brace) {
            self.insert_before(next, brace);
        }
        self.rescan(anchor, distance + 1);
    }

    /// A quote right after a lone `\` becomes an escaped quote.
    fn insert_quote(&mut self, quote: Brace) {
        let (anchor, distance) = self.edit_anchor();
        let next = self.boundary_at_cursor();
        let escaped = match quote {
            Brace::SingleQuote => Brace::EscapedSingleQuote,
            _ => Brace::EscapedDoubleQuote,
        };
        match self.tokens.peek_back(next) {
            Some(prev) if prev.is(Brace::Backslash) => {
                let prev = self.tokens.before(next);
                self.tokens.current_mut(prev).kind = TokenKind::Brace(escaped);
            }
            _ => self.insert_before(next, quote),
        }
        self.rescan(anchor, distance + 1);
    }

    /// Braces that never form digraphs, newline included. A newline ends
    /// line comments and strings once the walk reaches it.
    fn insert_lone_brace(&mut self, brace: Brace) {
        let (anchor, distance) = self.edit_anchor();
        let next = self.boundary_at_cursor();
        self.insert_before(next, brace);
        self.rescan(anchor, distance + 1);
    }

    fn insert_before(&mut self, next: Cursor, brace: Brace) {
        let mut next = next;
        self.tokens.insert(&mut next, Token::brace(brace));
    }

    /// Turns the single-character brace before `next` into the digraph it
    /// forms with `second`, if it forms one in its own state.
    fn widen_previous(&mut self, next: Cursor, second: Brace) -> bool {
        let Some(prev) = self.tokens.peek_back(next).copied() else {
            return false;
        };
        let Some(first) = prev.brace_kind().filter(|brace| !brace.is_multi_char()) else {
            return false;
        };
        let Some(digraph) = Brace::combine(first, second, prev.state) else {
            return false;
        };
        let prev_at = self.tokens.before(next);
        self.tokens.current_mut(prev_at).kind = TokenKind::Brace(digraph);
        true
    }
}

fn grow_gap(token: &mut Token, len: usize) {
    if let TokenKind::Gap(size) = &mut token.kind {
        *size += len;
    }
}
