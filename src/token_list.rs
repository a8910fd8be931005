//! Ordered token sequence with index cursors
//!
//! The list is a doubly linked list stored in an arena (`Vec`) with two
//! sentinel nodes, a head before the first token and a tail after the last.
//! A [`Cursor`] is an index into the arena plus the generation of the slot it
//! was taken from, so copying one to look ahead is free and never aliases the
//! caller's position. Removing a token bumps its slot's generation; a cursor
//! naming a removed token is stale even after the slot is reused, and using
//! it panics.

use crate::token::Token;

const HEAD: usize = 0;
const TAIL: usize = 1;

/// A position in a [`TokenList`]: a real token, the head sentinel or the tail sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    index: usize,
    generation: u32,
}

impl Cursor {
    const fn sentinel(index: usize) -> Self {
        Self {
            index,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    token: Option<Token>,
    prev: usize,
    next: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
pub struct TokenList {
    nodes: Vec<Node>,
    free: Vec<usize>,
    len: usize,
}

impl Default for TokenList {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenList {
    pub fn new() -> Self {
        let head = Node {
            token: None,
            prev: HEAD,
            next: TAIL,
            generation: 0,
        };
        let tail = Node {
            token: None,
            prev: HEAD,
            next: TAIL,
            generation: 0,
        };
        Self {
            nodes: vec![head, tail],
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cursor on the head sentinel
    pub const fn start(&self) -> Cursor {
        Cursor::sentinel(HEAD)
    }

    /// Cursor on the tail sentinel
    pub const fn end(&self) -> Cursor {
        Cursor::sentinel(TAIL)
    }

    /// Cursor on the first token, or the tail when the list is empty
    pub fn first(&self) -> Cursor {
        self.cursor_at(self.nodes[HEAD].next)
    }

    /// Cursor on the last token, or the head when the list is empty
    pub fn last(&self) -> Cursor {
        self.cursor_at(self.nodes[TAIL].prev)
    }

    pub fn at_start(&self, at: Cursor) -> bool {
        at.index == HEAD
    }

    pub fn at_end(&self, at: Cursor) -> bool {
        at.index == TAIL
    }

    pub fn at_first_item(&self, at: Cursor) -> bool {
        !self.is_sentinel(at) && self.nodes[HEAD].next == at.index
    }

    pub fn at_last_item(&self, at: Cursor) -> bool {
        !self.is_sentinel(at) && self.nodes[TAIL].prev == at.index
    }

    pub fn current(&self, at: Cursor) -> &Token {
        self.node(at)
            .token
            .as_ref()
            .unwrap_or_else(|| panic!("no token under cursor {at:?}"))
    }

    pub fn current_mut(&mut self, at: Cursor) -> &mut Token {
        self.check_live(at);
        self.nodes[at.index]
            .token
            .as_mut()
            .unwrap_or_else(|| panic!("no token under cursor {at:?}"))
    }

    /// The token before `at`, without moving. Panics at the first token or the head.
    pub fn prev_item(&self, at: Cursor) -> &Token {
        assert!(!self.at_start(at), "prev_item called at the head");
        self.current(self.cursor_at(self.node(at).prev))
    }

    /// The token after `at`, without moving. Panics at the last token or the tail.
    pub fn next_item(&self, at: Cursor) -> &Token {
        assert!(!self.at_end(at), "next_item called at the tail");
        self.current(self.cursor_at(self.node(at).next))
    }

    /// The token before `at`, or `None` when `at` is the first position
    pub fn peek_back(&self, at: Cursor) -> Option<&Token> {
        if self.at_start(at) {
            return None;
        }
        self.nodes[self.node(at).prev].token.as_ref()
    }

    /// The token after `at`, or `None` when `at` is the last position
    pub fn peek_forward(&self, at: Cursor) -> Option<&Token> {
        if self.at_end(at) {
            return None;
        }
        self.nodes[self.node(at).next].token.as_ref()
    }

    pub fn next(&self, at: &mut Cursor) {
        assert!(!self.at_end(*at), "cannot move past the tail");
        *at = self.cursor_at(self.node(*at).next);
    }

    pub fn prev(&self, at: &mut Cursor) {
        assert!(!self.at_start(*at), "cannot move before the head");
        *at = self.cursor_at(self.node(*at).prev);
    }

    /// Cursor after `at` (the first token when `at` is the head)
    pub fn after(&self, at: Cursor) -> Cursor {
        let mut next = at;
        self.next(&mut next);
        next
    }

    /// Cursor before `at` (the head when `at` is the first token)
    pub fn before(&self, at: Cursor) -> Cursor {
        let mut prev = at;
        self.prev(&mut prev);
        prev
    }

    /// Inserts `token` immediately before `at` and returns its cursor.
    ///
    /// `at` keeps naming the token it was on, which now follows the new
    /// token. At the head the token becomes the first item.
    pub fn insert(&mut self, at: &mut Cursor, token: Token) -> Cursor {
        if self.at_start(*at) {
            self.next(at);
        }
        self.check_live(*at);
        let next = at.index;
        let prev = self.nodes[next].prev;
        let index = match self.free.pop() {
            Some(index) => {
                let node = &mut self.nodes[index];
                node.token = Some(token);
                node.prev = prev;
                node.next = next;
                index
            }
            None => {
                self.nodes.push(Node {
                    token: Some(token),
                    prev,
                    next,
                    generation: 0,
                });
                self.nodes.len() - 1
            }
        };
        self.nodes[prev].next = index;
        self.nodes[next].prev = index;
        self.len += 1;
        self.cursor_at(index)
    }

    /// Inserts `token` immediately after `at` and returns its cursor
    pub fn insert_after(&mut self, at: Cursor, token: Token) -> Cursor {
        let mut next = self.after(at);
        self.insert(&mut next, token)
    }

    /// Removes the token under `at`; `at` moves to the following position.
    pub fn remove(&mut self, at: &mut Cursor) -> Token {
        assert!(
            !self.at_start(*at) && !self.at_end(*at),
            "cannot remove a sentinel"
        );
        self.check_live(*at);
        let index = at.index;
        let node = &mut self.nodes[index];
        let (prev, next) = (node.prev, node.next);
        let token = node
            .token
            .take()
            .unwrap_or_else(|| panic!("stale cursor {at:?}"));
        node.generation = node.generation.wrapping_add(1);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(index);
        self.len -= 1;
        *at = self.cursor_at(next);
        token
    }

    /// Removes every token strictly between `left` and `right`.
    ///
    /// `left` must not come after `right`. Both handles stay valid and name
    /// tokens that are adjacent afterwards. Returns the number of tokens removed.
    pub fn collapse(&mut self, left: Cursor, right: Cursor) -> usize {
        let mut removed = 0;
        let mut at = self.after(left);
        while at != right {
            assert!(!self.at_end(at), "collapse: right cursor precedes left");
            self.remove(&mut at);
            removed += 1;
        }
        removed
    }

    /// Iterates the tokens from first to last
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            at: self.first(),
        }
    }

    /// Handle for the live slot `index`
    fn cursor_at(&self, index: usize) -> Cursor {
        Cursor {
            index,
            generation: self.nodes[index].generation,
        }
    }

    fn is_sentinel(&self, at: Cursor) -> bool {
        at.index == HEAD || at.index == TAIL
    }

    fn node(&self, at: Cursor) -> &Node {
        self.check_live(at);
        &self.nodes[at.index]
    }

    fn check_live(&self, at: Cursor) {
        let node = &self.nodes[at.index];
        assert!(
            self.is_sentinel(at) || (node.token.is_some() && node.generation == at.generation),
            "stale cursor {at:?}: its token was removed"
        );
    }
}

pub struct Iter<'a> {
    list: &'a TokenList,
    at: Cursor,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.list.at_end(self.at) {
            return None;
        }
        let token = self.list.current(self.at);
        self.list.next(&mut self.at);
        Some(token)
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Brace;

    fn list_of(tokens: &[Token]) -> TokenList {
        let mut list = TokenList::new();
        let mut end = list.end();
        for token in tokens {
            list.insert(&mut end, *token);
        }
        list
    }

    #[test]
    fn test_empty_list_boundaries() {
        let list = TokenList::new();
        assert!(list.is_empty());
        assert!(list.at_end(list.first()));
        assert!(list.at_start(list.last()));
        assert!(!list.at_first_item(list.first()));
        assert_eq!(list.peek_back(list.end()), None);
    }

    #[test]
    fn test_insert_keeps_cursor_on_following_token() {
        let mut list = TokenList::new();
        let mut at = list.end();
        let gap = list.insert(&mut at, Token::gap(3));
        assert!(list.at_end(at));
        assert!(list.at_first_item(gap));
        assert!(list.at_last_item(gap));

        let mut on_gap = gap;
        let brace = list.insert(&mut on_gap, Token::brace(Brace::OpenCurly));
        assert_eq!(on_gap, gap);
        assert_eq!(list.after(brace), gap);
        assert_eq!(list.prev_item(gap), &Token::brace(Brace::OpenCurly));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_insert_at_head_becomes_first() {
        let mut list = list_of(&[Token::gap(1)]);
        let mut at = list.start();
        let inserted = list.insert(&mut at, Token::brace(Brace::Semicolon));
        assert_eq!(list.first(), inserted);
        assert_eq!(list.current(at), &Token::gap(1));
    }

    #[test]
    fn test_remove_moves_to_following() {
        let mut list = list_of(&[
            Token::brace(Brace::OpenParen),
            Token::gap(2),
            Token::brace(Brace::CloseParen),
        ]);
        let mut at = list.after(list.first());
        let removed = list.remove(&mut at);
        assert_eq!(removed, Token::gap(2));
        assert_eq!(list.current(at), &Token::brace(Brace::CloseParen));
        assert_eq!(list.len(), 2);
        let collected: Vec<_> = list.iter().copied().collect();
        assert_eq!(
            collected,
            vec![Token::brace(Brace::OpenParen), Token::brace(Brace::CloseParen)]
        );
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut list = list_of(&[Token::gap(1), Token::gap(2)]);
        let mut at = list.first();
        list.remove(&mut at);
        let mut end = list.end();
        list.insert(&mut end, Token::gap(5));
        assert_eq!(list.nodes.len(), 4);
        let sizes: Vec<_> = list.iter().map(Token::size).collect();
        assert_eq!(sizes, vec![2, 5]);
    }

    #[test]
    #[should_panic(expected = "stale cursor")]
    fn test_stale_cursor_panics() {
        let mut list = list_of(&[Token::gap(1), Token::gap(2)]);
        let first = list.first();
        let mut at = first;
        list.remove(&mut at);
        list.current(first);
    }

    #[test]
    #[should_panic(expected = "stale cursor")]
    fn test_stale_cursor_panics_after_slot_reuse() {
        let mut list = list_of(&[Token::gap(1), Token::gap(2)]);
        let first = list.first();
        let mut at = first;
        list.remove(&mut at);
        let mut end = list.end();
        let reused = list.insert(&mut end, Token::brace(Brace::OpenCurly));
        assert_eq!(list.current(reused), &Token::brace(Brace::OpenCurly));
        list.current(first);
    }

    #[test]
    #[should_panic(expected = "stale cursor")]
    fn test_removing_through_stale_cursor_panics() {
        let mut list = list_of(&[Token::gap(1), Token::gap(2)]);
        let mut first = list.first();
        let mut at = first;
        list.remove(&mut at);
        let mut end = list.end();
        list.insert(&mut end, Token::gap(3));
        list.remove(&mut first);
    }

    #[test]
    #[should_panic(expected = "prev_item called at the head")]
    fn test_prev_item_at_head_panics() {
        let list = list_of(&[Token::gap(1)]);
        list.prev_item(list.start());
    }

    #[test]
    fn test_collapse_removes_strictly_between() {
        let mut list = list_of(&[
            Token::brace(Brace::OpenCurly),
            Token::gap(1),
            Token::brace(Brace::Semicolon),
            Token::gap(4),
            Token::brace(Brace::CloseCurly),
        ]);
        let left = list.first();
        let right = list.last();
        assert_eq!(list.collapse(left, right), 3);
        assert_eq!(list.after(left), right);
        assert_eq!(list.current(right), &Token::brace(Brace::CloseCurly));
        assert_eq!(list.len(), 2);

        assert_eq!(list.collapse(list.start(), list.end()), 2);
        assert!(list.is_empty());
        assert_eq!(list.first(), list.end());
    }

    #[test]
    fn test_collapse_adjacent_is_noop() {
        let mut list = list_of(&[Token::gap(1), Token::gap(2)]);
        let left = list.first();
        let right = list.last();
        assert_eq!(list.collapse(left, right), 0);
        assert_eq!(list.len(), 2);
    }
}
