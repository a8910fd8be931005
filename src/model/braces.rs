//! Brace matching over unshadowed `{}`, `()` and `[]`

use super::ReducedModel;
use crate::token::Brace;

impl ReducedModel {
    /// With the cursor right before an opening brace, the distance from the
    /// cursor to just past its partner.
    ///
    /// Braces inside comments and strings are skipped. `None` when the cursor
    /// is not before a live opener, a closer of the wrong kind is met first,
    /// or the document ends unbalanced.
    pub fn balance_forward(&self) -> Option<usize> {
        if self.cursor.offset != 0 || self.tokens.at_end(self.cursor.at) {
            return None;
        }
        let token = self.tokens.current(self.cursor.at);
        let opener = token.brace_kind().filter(|brace| brace.is_opening())?;
        if !token.is_live_brace() {
            return None;
        }

        let mut pending = vec![opener];
        let mut distance = token.size();
        let mut at = self.tokens.after(self.cursor.at);
        while !self.tokens.at_end(at) {
            let token = self.tokens.current(at);
            distance += token.size();
            if let Some(brace) = token.brace_kind().filter(|_| token.is_live_brace()) {
                if brace.is_opening() {
                    pending.push(brace);
                } else if !close(&mut pending, brace)? {
                    return Some(distance);
                }
            }
            self.tokens.next(&mut at);
        }
        None
    }

    /// With the cursor right after a closing brace, the distance back from
    /// the cursor to the start of its partner.
    pub fn balance_backward(&self) -> Option<usize> {
        if self.cursor.offset != 0 {
            return None;
        }
        let mut at = self.cursor.at;
        let token = self.tokens.peek_back(at)?;
        let closer = token.brace_kind().filter(|brace| brace.is_closing())?;
        if !token.is_live_brace() {
            return None;
        }

        let mut pending = vec![closer];
        let mut distance = token.size();
        self.tokens.prev(&mut at);
        while let Some(token) = self.tokens.peek_back(at) {
            distance += token.size();
            if let Some(brace) = token.brace_kind().filter(|_| token.is_live_brace()) {
                if brace.is_closing() {
                    pending.push(brace);
                } else if !close(&mut pending, brace)? {
                    return Some(distance);
                }
            }
            self.tokens.prev(&mut at);
        }
        None
    }

    /// The innermost unmatched opening brace before the cursor, with the
    /// distance back to its start. Indentation anchors on this.
    pub fn enclosing_brace(&self) -> Option<(Brace, usize)> {
        let mut pending = Vec::new();
        let mut distance = self.cursor.offset;
        let mut at = self.cursor.at;
        while let Some(token) = self.tokens.peek_back(at) {
            distance += token.size();
            if let Some(brace) = token.brace_kind().filter(|_| token.is_live_brace()) {
                if brace.is_closing() {
                    pending.push(brace);
                } else if pending.is_empty() {
                    return Some((brace, distance));
                } else {
                    close(&mut pending, brace)?;
                }
            }
            self.tokens.prev(&mut at);
        }
        None
    }
}

/// Pops the brace `brace` balances off `pending`.
///
/// `None` on a mismatch; otherwise whether braces remain pending.
fn close(pending: &mut Vec<Brace>, brace: Brace) -> Option<bool> {
    let top = pending.pop()?;
    if top.partner() != Some(brace) {
        return None;
    }
    Some(!pending.is_empty())
}
