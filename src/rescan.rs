//! From-scratch lexing of a whole text
//!
//! [`lex`] produces the token list the incremental model must agree with
//! after every edit. It reads the text once, left to right, taking a digraph
//! whenever the pair is recognised in the current state.

use crate::state::LexState;
use crate::token::{Brace, Token, TokenKind};

/// The canonical token list for `text`
pub fn lex(text: &str) -> Vec<Token> {
    let mut lexer = Lexer::default();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let Some(first) = Brace::from_char(ch) else {
            lexer.plain();
            continue;
        };
        let digraph = chars
            .peek()
            .copied()
            .and_then(Brace::from_char)
            .and_then(|second| Brace::combine(first, second, lexer.state));
        match digraph {
            Some(digraph) => {
                chars.next();
                lexer.brace(digraph);
            }
            None => lexer.brace(first),
        }
    }
    lexer.tokens
}

#[derive(Default)]
struct Lexer {
    tokens: Vec<Token>,
    state: LexState,
}

impl Lexer {
    fn plain(&mut self) {
        if let Some(Token {
            kind: TokenKind::Gap(len),
            ..
        }) = self.tokens.last_mut()
        {
            *len += 1;
            return;
        }
        self.tokens.push(Token::gap(1).with_state(self.state));
    }

    fn brace(&mut self, brace: Brace) {
        let (token, next) = classify(brace, self.state);
        self.tokens.push(token);
        self.state = next;
    }
}

/// The stamped token for `brace` read in `state`, and the state after it
fn classify(brace: Brace, state: LexState) -> (Token, LexState) {
    use LexState::*;

    let token = Token::brace(brace);
    match (state, brace) {
        (Free, Brace::LineComment) => (token, InsideLineComment),
        (Free, Brace::BlockCommentStart) => (token, InsideBlockComment),
        (Free, Brace::SingleQuote) => (token, InsideSingleQuote),
        (Free, Brace::DoubleQuote) => (token, InsideDoubleQuote),
        (Free, _) => (token, Free),

        (InsideLineComment, Brace::Newline)
        | (InsideSingleQuote | InsideDoubleQuote, Brace::Newline)
        | (InsideBlockComment, Brace::BlockCommentEnd) => (token, Free),
        (InsideSingleQuote, Brace::SingleQuote) | (InsideDoubleQuote, Brace::DoubleQuote) => {
            (token.closing(), Free)
        }

        (state, _) => (token.with_state(state), state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_plain_runs_become_one_gap() {
        assert_eq!(lex("hello world"), vec![Token::gap(11)]);
        assert_eq!(
            lex("a;b"),
            vec![Token::gap(1), Token::brace(Brace::Semicolon), Token::gap(1)]
        );
    }

    #[test]
    fn test_block_comment() {
        let block = LexState::InsideBlockComment;
        assert_eq!(
            lex("/* { // */}"),
            vec![
                Token::brace(Brace::BlockCommentStart),
                Token::gap(1).with_state(block),
                Token::brace(Brace::OpenCurly).with_state(block),
                Token::gap(1).with_state(block),
                Token::brace(Brace::Slash).with_state(block),
                Token::brace(Brace::Slash).with_state(block),
                Token::gap(1).with_state(block),
                Token::brace(Brace::BlockCommentEnd),
                Token::brace(Brace::CloseCurly),
            ]
        );
    }

    #[test]
    fn test_strings_end_at_quote_or_newline() {
        let single = LexState::InsideSingleQuote;
        assert_eq!(
            lex("'a\\'\n'"),
            vec![
                Token::brace(Brace::SingleQuote),
                Token::gap(1).with_state(single),
                Token::brace(Brace::EscapedSingleQuote).with_state(single),
                Token::brace(Brace::Newline),
                Token::brace(Brace::SingleQuote),
            ]
        );
        assert_eq!(
            lex("\"\""),
            vec![
                Token::brace(Brace::DoubleQuote),
                Token::brace(Brace::DoubleQuote).closing(),
            ]
        );
    }

    #[test]
    fn test_quotes_inside_comments_stay_open() {
        let line = LexState::InsideLineComment;
        assert_eq!(
            lex("//\"\n"),
            vec![
                Token::brace(Brace::LineComment),
                Token::brace(Brace::DoubleQuote).with_state(line),
                Token::brace(Brace::Newline),
            ]
        );
    }

    #[test]
    fn test_star_slash_in_free_code_is_two_braces() {
        assert_eq!(
            lex("*/*"),
            vec![
                Token::brace(Brace::Star),
                Token::brace(Brace::BlockCommentStart),
            ]
        );
    }
}
