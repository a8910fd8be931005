//! Deletion tests
//!
//! Where the cursor ends up and which tokens survive when a deletion starts
//! or ends partway through a gap or a digraph.

mod common;

use common::{assert_canonical, tokens, typed};
use reduced_model::{Brace, LexState, ModelError, Token};

// ========================================================================
// Inside one gap
// ========================================================================

#[test]
fn test_delete_within_gap() {
    let mut model = typed("{abcdef}");
    model.move_to(2).unwrap();
    model.delete(3).unwrap();
    assert_canonical(&model, "{aef}");
    assert_eq!(model.position(), 2);
    assert_eq!(model.offset(), 1);
}

#[test]
fn test_delete_gap_tail_lands_on_next_token() {
    let mut model = typed("ab{");
    model.move_to(1).unwrap();
    model.delete(1).unwrap();
    assert_canonical(&model, "a{");
    assert_eq!(model.current_token(), Some(&Token::brace(Brace::OpenCurly)));
    assert_eq!(model.offset(), 0);
}

#[test]
fn test_delete_whole_gap_between_braces() {
    let mut model = typed("(abc)");
    model.move_to(4).unwrap();
    model.delete(-3).unwrap();
    assert_canonical(&model, "()");
    assert_eq!(model.position(), 1);
    assert_eq!(
        model.current_token(),
        Some(&Token::brace(Brace::CloseParen))
    );
}

// ========================================================================
// Partial digraphs
// ========================================================================

#[test]
fn test_delete_ending_inside_digraph_keeps_second_half() {
    let mut model = typed("a//b");
    model.move_to(0).unwrap();
    model.delete(2).unwrap();
    assert_eq!(
        tokens(&model),
        vec![Token::brace(Brace::Slash), Token::gap(1)]
    );
    assert_eq!(model.position(), 0);
}

#[test]
fn test_delete_starting_inside_digraph_keeps_first_half() {
    let mut model = typed("x/*y*/z");
    model.move_to(2).unwrap();
    model.delete(2).unwrap();
    assert_canonical(&model, "x/*/z");
    assert_eq!(model.position(), 2);
}

#[test]
fn test_breaking_comment_end_extends_comment() {
    let mut model = typed("/* a */ {");
    model.move_to(7).unwrap();
    model.delete(-1).unwrap();
    assert_canonical(&model, "/* a * {");
    assert_eq!(model.position(), 6);
    assert_eq!(model.state_at_cursor(), LexState::InsideBlockComment);
}

#[test]
fn test_joined_star_slash_stays_apart_in_free_code() {
    let mut model = typed("*x/");
    model.move_to(1).unwrap();
    model.delete(1).unwrap();
    assert_eq!(
        tokens(&model),
        vec![Token::brace(Brace::Star), Token::brace(Brace::Slash)]
    );
}

#[test]
fn test_joined_slash_slash_comments_out_rest_of_line() {
    let mut model = typed("a / / b {\nc");
    model.move_to(3).unwrap();
    model.delete(1).unwrap();
    assert_canonical(&model, "a // b {\nc");
    assert_eq!(model.position(), 3);
    assert_eq!(model.offset(), 1);
}

// ========================================================================
// Context changes
// ========================================================================

#[test]
fn test_delete_newline_extends_line_comment() {
    let mut model = typed("// a\nb {");
    model.move_to(4).unwrap();
    model.delete(1).unwrap();
    assert_canonical(&model, "// ab {");
    assert!(model
        .tokens()
        .skip(1)
        .all(|token| token.state == LexState::InsideLineComment));
}

#[test]
fn test_delete_backslash_closes_string_early() {
    let mut model = typed("\"a\\\"b\"");
    model.move_to(3).unwrap();
    model.delete(-1).unwrap();
    assert_canonical(&model, "\"a\"b\"");
    assert_eq!(model.state_at_cursor(), LexState::Free);
}

#[test]
fn test_delete_opening_quote_frees_contents() {
    let mut model = typed("'{' }");
    model.move_to(0).unwrap();
    model.delete(1).unwrap();
    assert_canonical(&model, "{' }");
    assert_eq!(
        tokens(&model)[0],
        Token::brace(Brace::OpenCurly)
    );
}

#[test]
fn test_delete_across_many_tokens() {
    let text = "f(a, \"b\", /* c */ d); // e\ng";
    let mut model = typed(text);
    model.move_to(2).unwrap();
    model.delete(23).unwrap();
    assert_canonical(&model, "f(e\ng");
    assert_eq!(model.position(), 2);
}

// ========================================================================
// Bounds
// ========================================================================

#[test]
fn test_rejected_delete_leaves_model_untouched() {
    let mut model = typed("/* x */");
    model.move_to(3).unwrap();
    let before = tokens(&model);

    assert_eq!(
        model.delete(5),
        Err(ModelError::PastEnd {
            requested: 5,
            available: 4
        })
    );
    assert_eq!(
        model.delete(-4),
        Err(ModelError::BeforeStart {
            requested: 4,
            position: 3
        })
    );
    assert_eq!(tokens(&model), before);
    assert_eq!(model.position(), 3);
}
