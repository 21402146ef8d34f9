//! # Content Tree Model
//!
//! Typed, immutable representation of a parsed forum post or article body.
//!
//! - **`content`**: `ContentNode` and the small enums describing container kinds
//! - **`text`**: `StyledText` runs produced by inline style tags
//! - **`quote`**: `QuoteType` and `QuoteMetadata` with its canonical plain form
//! - **`media`**: image and attachment references with captured dimensions

pub mod content;
pub mod media;
pub mod quote;
pub mod text;

pub use content::{
    AlignmentKind, BulletRow, CodeType, ContentNode, ListItem, ListKind, NoticeKind, plain_text,
};
pub use media::{AttachmentRef, ImageRef};
pub use quote::{QuoteMetadata, QuoteType};
pub use text::{StyledText, TextRun, TextStyle};
