pub mod codec;
pub mod form;
pub mod model;
pub mod outline;
pub mod parsing;
pub mod taxonomy;
pub mod writer;

// Re-export key types for easier usage
pub use codec::{TextCodec, decode_entities};
pub use form::{FieldKind, FieldValue, FormError, FormSerializer};
pub use model::{
    AlignmentKind, AttachmentRef, BulletRow, CodeType, ContentNode, ImageRef, ListItem, ListKind,
    NoticeKind, QuoteMetadata, QuoteType, StyledText, TextRun, TextStyle, plain_text,
};
pub use outline::outline;
pub use parsing::{
    AttachmentInfo, DEFAULT_BASE_URL, DEFAULT_SMILE_BASE_URL, MarkupParser, ParseOptions,
    parse_markup,
};
pub use taxonomy::{Tag, TagClass};
pub use writer::{styled_to_markup, to_markup};
