//! # Markup Parsing
//!
//! Single-pass, recursive parsing of forum markup into a content forest.
//!
//! ## Modules
//!
//! - **`cursor`**: byte cursor with absolute position tracking
//! - **`marker`**: lexing of `[tag ...]` markers and closing-marker search
//! - **`kinds`**: per-tag attribute interpretation with owned delimiters
//! - **`builder`**: `NodeSink` collecting text runs and nodes in order
//! - **`resolve`**: `ParseOptions` for url, attachment and smile resolution
//! - **`parser`**: `MarkupParser`, the recursive driver
//!
//! ## Key Invariants
//!
//! - Parsing never fails; anything not understood stays as literal text
//! - Output order is source order at every level
//! - `spoiler` and `quote` bodies are fully recursive; other containers
//!   only apply style tags and leaves; `code` bodies are raw

pub mod builder;
pub mod cursor;
pub mod kinds;
pub mod marker;
pub mod parser;
pub mod resolve;

pub use parser::MarkupParser;
pub use resolve::{AttachmentInfo, DEFAULT_BASE_URL, DEFAULT_SMILE_BASE_URL, ParseOptions};

use crate::model::ContentNode;

/// Parses `input` with default options.
pub fn parse_markup(input: &str) -> Vec<ContentNode> {
    MarkupParser::default().parse(input)
}
