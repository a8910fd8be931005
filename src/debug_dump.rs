//! Serializable snapshots of a document's model
//!
//! Used by the CLI for `--format json` output.

use serde::Serialize;

use crate::document::Document;
use crate::highlight::HighlightSpan;
use crate::state::LexState;
use crate::token::{Token, TokenKind};

#[derive(Serialize)]
pub struct ModelDump {
    pub file_path: Option<String>,
    pub char_count: usize,
    pub token_count: usize,
    pub tokens: Vec<TokenDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<HighlightSpan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caret: Option<CaretDump>,
}

#[derive(Serialize)]
pub struct TokenDump {
    pub start: usize,
    pub len: usize,
    /// `None` for gaps
    pub brace: Option<String>,
    pub state: LexState,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub closing: bool,
}

#[derive(Serialize)]
pub struct CaretDump {
    pub offset: usize,
    pub state: LexState,
    pub line_start: usize,
    pub line_end: usize,
    pub matching_braces: Option<(usize, usize)>,
    pub enclosing_brace: Option<EnclosingDump>,
}

#[derive(Serialize)]
pub struct EnclosingDump {
    pub brace: String,
    pub offset: usize,
}

impl TokenDump {
    fn new(start: usize, token: &Token) -> Self {
        Self {
            start,
            len: token.size(),
            brace: match token.kind {
                TokenKind::Brace(brace) => Some(brace.text().to_string()),
                TokenKind::Gap(_) => None,
            },
            state: token.state,
            closing: !token.open,
        }
    }
}

impl CaretDump {
    pub fn new(document: &Document) -> Self {
        let offset = document.caret();
        Self {
            offset,
            state: document.state_at_caret(),
            line_start: document.line_start(),
            line_end: document.line_end(),
            matching_braces: document.matching_braces(),
            enclosing_brace: document.model().enclosing_brace().map(|(brace, distance)| {
                EnclosingDump {
                    brace: brace.text().to_string(),
                    offset: offset - distance,
                }
            }),
        }
    }
}

impl ModelDump {
    pub fn new(document: &Document) -> Self {
        let mut start = 0;
        let tokens = document
            .model()
            .tokens()
            .map(|token| {
                let dump = TokenDump::new(start, token);
                start += token.size();
                dump
            })
            .collect();

        Self {
            file_path: document
                .file_path
                .as_ref()
                .map(|p| p.display().to_string()),
            char_count: document.len_chars(),
            token_count: document.model().token_count(),
            tokens,
            highlights: None,
            caret: None,
        }
    }

    pub fn with_highlights(mut self, spans: Vec<HighlightSpan>) -> Self {
        self.highlights = Some(spans);
        self
    }

    pub fn with_caret(mut self, caret: CaretDump) -> Self {
        self.caret = Some(caret);
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lists_tokens_with_offsets() {
        let mut document = Document::with_text("{\"a\"}");
        document.set_caret(0).unwrap();
        let dump = ModelDump::new(&document).with_caret(CaretDump::new(&document));
        let json: serde_json::Value = serde_json::from_str(&dump.to_json()).unwrap();

        assert_eq!(json["token_count"], 5);
        assert_eq!(json["tokens"][1]["brace"], "\"");
        assert_eq!(json["tokens"][2]["state"], "inside-double-quote");
        assert_eq!(json["tokens"][3]["start"], 3);
        assert_eq!(json["tokens"][3]["closing"], true);
        assert!(json["tokens"][1].get("closing").is_none());
        assert_eq!(json["caret"]["matching_braces"], serde_json::json!([0, 4]));
        assert!(json.get("highlights").is_none());
    }
}
