use std::ops::Range;

use crate::model::ListKind;
use crate::parsing::cursor::Cursor;
use crate::parsing::marker::{Attributes, OPEN, read_marker};
use crate::taxonomy::Tag;

/// Item separator inside a list body.
pub const ITEM: &str = "[*]";

/// Keyword selecting the spec-sheet bullet table.
pub const BULLET_TABLE: &str = "spec";

/// What a `[list]` opening marker asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    List(ListKind),
    /// `[list=spec]`: label/value rows instead of list items.
    BulletTable,
}

pub fn shape(attrs: &Attributes) -> ListShape {
    let Some(keyword) = attrs.value.as_deref().map(str::trim) else {
        return ListShape::List(ListKind::Bullet);
    };
    match keyword {
        "" | "*" => ListShape::List(ListKind::Bullet),
        "1" => ListShape::List(ListKind::Numeric),
        "I" | "i" => ListShape::List(ListKind::Roman),
        k if k.eq_ignore_ascii_case("bullet") || k.eq_ignore_ascii_case("disc") => {
            ListShape::List(ListKind::Bullet)
        }
        k if k.eq_ignore_ascii_case("numeric") || k.eq_ignore_ascii_case("decimal") => {
            ListShape::List(ListKind::Numeric)
        }
        k if k.eq_ignore_ascii_case("roman") => ListShape::List(ListKind::Roman),
        k if k.eq_ignore_ascii_case(BULLET_TABLE) => ListShape::BulletTable,
        k if k.bytes().all(|b| b.is_ascii_digit()) => ListShape::List(ListKind::Numeric),
        other => {
            log::debug!("unknown list style {other:?}, using bullets");
            ListShape::List(ListKind::Bullet)
        }
    }
}

/// Keyword written after `[list=` for a list kind, if any.
pub fn keyword(kind: ListKind) -> Option<&'static str> {
    match kind {
        ListKind::Bullet => None,
        ListKind::Numeric => Some("1"),
        ListKind::Roman => Some("I"),
    }
}

/// Splits a list body into item ranges at top-level `[*]` separators.
///
/// `[*]` markers inside a nested `[list]` belong to that list and do not
/// split. Text before the first separator becomes an item only when it is
/// not blank. Line breaks around each item are dropped; empty items are kept.
pub fn split_items(body: &str) -> Vec<Range<usize>> {
    let mut separators: Vec<Range<usize>> = Vec::new();
    let mut depth = 0usize;
    let mut cur = Cursor::new(body);

    while cur.skip_to(OPEN) {
        let Some(marker) = read_marker(body, cur.i) else {
            cur.bump();
            continue;
        };
        if marker.is_list_item() && depth == 0 {
            separators.push(marker.start..marker.end);
        } else if marker.tag() == Some(Tag::List) {
            if marker.closing {
                depth = depth.saturating_sub(1);
            } else {
                depth += 1;
            }
        }
        cur.seek(marker.end);
    }

    let mut items = Vec::with_capacity(separators.len() + 1);
    let lead_end = separators.first().map_or(body.len(), |sep| sep.start);
    if !body[..lead_end].trim().is_empty() {
        items.push(trim_line_breaks(body, 0..lead_end));
    }
    for (n, sep) in separators.iter().enumerate() {
        let end = separators.get(n + 1).map_or(body.len(), |next| next.start);
        items.push(trim_line_breaks(body, sep.end..end));
    }
    items
}

fn trim_line_breaks(body: &str, range: Range<usize>) -> Range<usize> {
    let slice = &body[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start_matches(['\r', '\n']).len());
    let end = range.end - (slice.len() - slice.trim_end_matches(['\r', '\n']).len());
    start..end.max(start)
}
