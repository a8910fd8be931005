//! Reduced model - incremental brace, quote and comment classification
//!
//! This crate keeps a compact token model of a source document up to date as
//! it is edited one character at a time, so an editor can match braces,
//! compute indentation and colour comments and strings without re-lexing.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod debug_dump;
pub mod document;
pub mod error;
pub mod highlight;
pub mod model;
pub mod rescan;
pub mod state;
pub mod token;
pub mod token_list;
pub mod tracing;

// Re-export commonly used types
pub use config::ScanConfig;
pub use document::Document;
pub use error::ModelError;
pub use highlight::{HighlightKind, HighlightSpan};
pub use model::ReducedModel;
pub use state::LexState;
pub use token::{Brace, Token, TokenKind};
