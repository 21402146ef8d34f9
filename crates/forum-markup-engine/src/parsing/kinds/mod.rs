//! # Tag Kinds
//!
//! Per-tag knowledge: attribute shapes, keyword tables and the small
//! interpretation rules of each tag. The parser driver asks these modules
//! what a marker means; it never inspects attribute strings itself.
//!
//! - **`style`**: inline attributes for style tags
//! - **`quote`**: title vs structured metadata
//! - **`code`**: optional label
//! - **`hide`**: optional post-count threshold
//! - **`list`**: style keywords and `[*]` item splitting
//! - **`bullet`**: spec-sheet label/value rows
//! - **`media`**: `img` and `attachment` leaves
//! - **`smile`**: emoji table for `[smile=..]`

pub mod bullet;
pub mod code;
pub mod hide;
pub mod list;
pub mod media;
pub mod quote;
pub mod smile;
pub mod style;

use crate::model::{AlignmentKind, NoticeKind};
use crate::taxonomy::Tag;

pub fn alignment_kind(tag: Tag) -> Option<AlignmentKind> {
    match tag {
        Tag::Left => Some(AlignmentKind::Left),
        Tag::Center => Some(AlignmentKind::Center),
        Tag::Right => Some(AlignmentKind::Right),
        Tag::Justify => Some(AlignmentKind::Justify),
        _ => None,
    }
}

pub fn notice_kind(tag: Tag) -> Option<NoticeKind> {
    match tag {
        Tag::Cur => Some(NoticeKind::Curator),
        Tag::Mod => Some(NoticeKind::Moderator),
        Tag::Ex => Some(NoticeKind::Admin),
        _ => None,
    }
}

/// Tag written for an alignment kind.
pub fn alignment_tag(kind: AlignmentKind) -> Tag {
    match kind {
        AlignmentKind::Left => Tag::Left,
        AlignmentKind::Center => Tag::Center,
        AlignmentKind::Right => Tag::Right,
        AlignmentKind::Justify => Tag::Justify,
    }
}

/// Tag written for a notice kind.
pub fn notice_tag(kind: NoticeKind) -> Tag {
    match kind {
        NoticeKind::Curator => Tag::Cur,
        NoticeKind::Moderator => Tag::Mod,
        NoticeKind::Admin => Tag::Ex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_tags_round_trip() {
        for tag in [Tag::Left, Tag::Center, Tag::Right, Tag::Justify] {
            let kind = alignment_kind(tag).unwrap();
            assert_eq!(alignment_tag(kind), tag);
        }
        assert_eq!(alignment_kind(Tag::Quote), None);
    }

    #[test]
    fn notice_tags_round_trip() {
        for tag in [Tag::Cur, Tag::Mod, Tag::Ex] {
            let kind = notice_kind(tag).unwrap();
            assert_eq!(notice_tag(kind), tag);
        }
        assert_eq!(notice_kind(Tag::Bold), None);
    }
}
