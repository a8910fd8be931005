//! State propagation walk
//!
//! After an edit the walk rescans from just before the edit point to the end
//! of the list. Each step looks at one token in one lexical state: it first
//! reshapes the token for that state (joining gaps, forming or splitting
//! digraphs), then stamps it and returns the state for the next token.
//!
//! `Stutter` is returned whenever a step changed the list under the cursor in
//! a way that makes the current state suspect. The next iteration re-derives
//! the state from the previous token and retries the same position.

use crate::state::LexState;
use crate::token::{Brace, Token, TokenKind};
use crate::token_list::{Cursor, TokenList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Lex(LexState),
    Stutter,
}

type Step = fn(&mut TokenList, &mut Cursor) -> WalkState;

/// Rescans from `start`, which is read in `state`, to the end of the list.
/// Returns the number of steps taken.
pub(super) fn propagate(tokens: &mut TokenList, start: Cursor, state: LexState) -> usize {
    let mut at = start;
    let mut walk = WalkState::Lex(state);
    let mut steps = 0;
    while !tokens.at_end(at) {
        walk = match walk {
            WalkState::Stutter => WalkState::Lex(state_before(tokens, at)),
            WalkState::Lex(state) => step_for(state)(tokens, &mut at),
        };
        steps += 1;
    }
    tracing::trace!(steps, tokens = tokens.len(), "propagation walk finished");
    steps
}

/// The state in effect just before `at`
pub(crate) fn state_before(tokens: &TokenList, at: Cursor) -> LexState {
    tokens
        .peek_back(at)
        .map_or(LexState::Free, Token::exit_state)
}

fn step_for(state: LexState) -> Step {
    match state {
        LexState::Free => step_free,
        LexState::InsideLineComment => step_line_comment,
        LexState::InsideBlockComment => step_block_comment,
        LexState::InsideSingleQuote => step_single_quote,
        LexState::InsideDoubleQuote => step_double_quote,
    }
}

fn step_free(tokens: &mut TokenList, at: &mut Cursor) -> WalkState {
    if reshape(tokens, *at, LexState::Free) {
        return WalkState::Stutter;
    }
    let token = tokens.current_mut(*at);
    // openers belong to the free code they interrupt
    let next = match token.brace_kind() {
        Some(Brace::LineComment) => LexState::InsideLineComment,
        Some(Brace::BlockCommentStart) => LexState::InsideBlockComment,
        Some(Brace::SingleQuote) => LexState::InsideSingleQuote,
        Some(Brace::DoubleQuote) => LexState::InsideDoubleQuote,
        _ => LexState::Free,
    };
    token.stamp(LexState::Free, true);
    tokens.next(at);
    WalkState::Lex(next)
}

fn step_line_comment(tokens: &mut TokenList, at: &mut Cursor) -> WalkState {
    step_enclosed(tokens, at, LexState::InsideLineComment, |brace| {
        brace == Brace::Newline
    })
}

fn step_block_comment(tokens: &mut TokenList, at: &mut Cursor) -> WalkState {
    step_enclosed(tokens, at, LexState::InsideBlockComment, |brace| {
        brace == Brace::BlockCommentEnd
    })
}

fn step_single_quote(tokens: &mut TokenList, at: &mut Cursor) -> WalkState {
    step_enclosed(tokens, at, LexState::InsideSingleQuote, |brace| {
        matches!(brace, Brace::SingleQuote | Brace::Newline)
    })
}

fn step_double_quote(tokens: &mut TokenList, at: &mut Cursor) -> WalkState {
    step_enclosed(tokens, at, LexState::InsideDoubleQuote, |brace| {
        matches!(brace, Brace::DoubleQuote | Brace::Newline)
    })
}

/// One step inside a comment or string that `ends` terminates
fn step_enclosed(
    tokens: &mut TokenList,
    at: &mut Cursor,
    state: LexState,
    ends: impl Fn(Brace) -> bool,
) -> WalkState {
    if reshape(tokens, *at, state) {
        return WalkState::Stutter;
    }
    let token = tokens.current_mut(*at);
    let walk = match token.brace_kind() {
        Some(brace) if ends(brace) => {
            let closes_quote = matches!(brace, Brace::SingleQuote | Brace::DoubleQuote);
            token.stamp(LexState::Free, !closes_quote);
            WalkState::Lex(LexState::Free)
        }
        _ => {
            token.stamp(state, true);
            WalkState::Lex(state)
        }
    };
    tokens.next(at);
    walk
}

/// Puts the token under `at` into its canonical shape for `state`.
///
/// Returns true when a digraph had to be split, in which case the caller
/// must re-derive its state before looking at `at` again.
fn reshape(tokens: &mut TokenList, at: Cursor, state: LexState) -> bool {
    let TokenKind::Brace(brace) = tokens.current(at).kind else {
        absorb_gaps(tokens, at);
        return false;
    };
    match brace.halves() {
        Some((first, second)) if !brace.is_valid_in(state) => {
            tokens.current_mut(at).kind = TokenKind::Brace(first);
            tokens.insert_after(at, Token::brace(second));
            true
        }
        Some(_) => false,
        None => {
            combine_with_next(tokens, at, brace, state);
            false
        }
    }
}

/// Folds any gaps directly after the gap at `at` into it
fn absorb_gaps(tokens: &mut TokenList, at: Cursor) {
    while let Some(&Token {
        kind: TokenKind::Gap(extra),
        ..
    }) = tokens.peek_forward(at)
    {
        let mut next = tokens.after(at);
        tokens.remove(&mut next);
        if let TokenKind::Gap(len) = &mut tokens.current_mut(at).kind {
            *len += extra;
        }
    }
    debug_assert!(tokens.current(at).size() > 0, "empty gap in token list");
}

/// Joins the single-character brace at `at` with the first character of the
/// next token when the pair is a digraph in `state`. A next token that was
/// itself a digraph keeps its second half.
fn combine_with_next(tokens: &mut TokenList, at: Cursor, first: Brace, state: LexState) -> bool {
    let Some(next) = tokens.peek_forward(at).and_then(Token::brace_kind) else {
        return false;
    };
    let Some(digraph) = Brace::combine(first, next.first_half(), state) else {
        return false;
    };
    tokens.current_mut(at).kind = TokenKind::Brace(digraph);
    let mut next_at = tokens.after(at);
    match next.halves() {
        Some((_, rest)) => tokens.current_mut(next_at).kind = TokenKind::Brace(rest),
        None => {
            tokens.remove(&mut next_at);
        }
    }
    true
}
