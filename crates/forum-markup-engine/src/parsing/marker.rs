//! Tag marker lexing: `[name]`, `[name=value]`, `[name key="v" ...]`, `[/name]`.

use crate::taxonomy::Tag;

use super::cursor::Cursor;

/// Upper bound on a single marker's length; longer candidates are text.
const MAX_MARKER_LEN: usize = 2048;

pub const OPEN: u8 = b'[';
pub const CLOSE: u8 = b']';
pub const SLASH: u8 = b'/';
pub const EQUALS: u8 = b'=';

/// Attributes found on an opening marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// The `=value` directly after the tag name.
    pub value: Option<String>,
    /// `key=value` pairs, in source order, keys lowercased.
    pub pairs: Vec<(String, String)>,
}

impl Attributes {
    /// Looks up a `key=value` pair (case-insensitive key).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The primary value, or the named pair when no primary value is present.
    pub fn value_or(&self, key: &str) -> Option<&str> {
        self.value.as_deref().or_else(|| self.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.pairs.is_empty()
    }
}

/// A lexed tag marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Local index of `[`.
    pub start: usize,
    /// Local index just past `]`.
    pub end: usize,
    pub closing: bool,
    /// Tag name as written.
    pub name: &'a str,
    pub attrs: Attributes,
}

impl Marker<'_> {
    /// Resolves the name against the tag vocabulary.
    pub fn tag(&self) -> Option<Tag> {
        Tag::from_name(self.name)
    }

    /// True for `[*]`, the list item separator.
    pub fn is_list_item(&self) -> bool {
        !self.closing && self.name == "*" && self.attrs.is_empty()
    }
}

/// Reads a marker starting at local index `at` (which must point at `[`).
///
/// Returns `None` when the text there is not a well-formed marker; the caller
/// then treats the `[` as literal text.
pub fn read_marker(s: &str, at: usize) -> Option<Marker<'_>> {
    let mut cur = Cursor::at(s, at);
    if cur.bump()? != OPEN {
        return None;
    }

    let closing = cur.peek() == Some(SLASH);
    if closing {
        cur.bump();
    }

    let name_start = cur.i;
    while matches!(cur.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'*') {
        cur.bump();
    }
    if cur.i == name_start {
        return None;
    }
    let name = &s[name_start..cur.i];

    let mut attrs = Attributes::default();
    if closing {
        if cur.bump()? != CLOSE {
            return None;
        }
    } else {
        match cur.peek()? {
            CLOSE => {
                cur.bump();
            }
            EQUALS => {
                cur.bump();
                attrs.value = Some(read_primary_value(&mut cur)?);
                read_pairs(&mut cur, &mut attrs)?;
            }
            b if b.is_ascii_whitespace() => {
                read_pairs(&mut cur, &mut attrs)?;
            }
            _ => return None,
        }
    }

    if cur.i - at > MAX_MARKER_LEN {
        return None;
    }

    Some(Marker {
        start: at,
        end: cur.i,
        closing,
        name,
        attrs,
    })
}

/// Value after `name=`: a quoted string, or everything up to `]`.
///
/// Unquoted values may contain spaces (`[spoiler=Some title]`) but not `[`
/// or a line break.
fn read_primary_value(cur: &mut Cursor<'_>) -> Option<String> {
    if matches!(cur.peek(), Some(b'"' | b'\'')) {
        return read_quoted(cur);
    }
    let start = cur.i;
    loop {
        match cur.peek()? {
            CLOSE => break,
            OPEN | b'\n' => return None,
            _ => {
                cur.bump();
            }
        }
        if cur.i - start > MAX_MARKER_LEN {
            return None;
        }
    }
    Some(cur.s[start..cur.i].trim().to_string())
}

/// Quoted string, `"..."` or `'...'`. May contain `]`; may not span lines.
fn read_quoted(cur: &mut Cursor<'_>) -> Option<String> {
    let quote = cur.bump()?;
    let start = cur.i;
    loop {
        match cur.peek()? {
            b if b == quote => break,
            b'\n' => return None,
            _ => {
                cur.bump();
            }
        }
        if cur.i - start > MAX_MARKER_LEN {
            return None;
        }
    }
    let value = cur.s[start..cur.i].to_string();
    cur.bump();
    Some(value)
}

/// Whitespace-separated `key=value` pairs up to and including `]`.
fn read_pairs(cur: &mut Cursor<'_>, attrs: &mut Attributes) -> Option<()> {
    loop {
        while matches!(cur.peek(), Some(b) if b.is_ascii_whitespace() && b != b'\n') {
            cur.bump();
        }
        match cur.peek()? {
            CLOSE => {
                cur.bump();
                return Some(());
            }
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' => {}
            _ => return None,
        }

        let key_start = cur.i;
        while matches!(cur.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
            cur.bump();
        }
        let key = cur.s[key_start..cur.i].to_ascii_lowercase();

        let value = if cur.peek() == Some(EQUALS) {
            cur.bump();
            if matches!(cur.peek(), Some(b'"' | b'\'')) {
                read_quoted(cur)?
            } else {
                let value_start = cur.i;
                while matches!(cur.peek(), Some(b) if b != CLOSE && b != OPEN && !b.is_ascii_whitespace())
                {
                    cur.bump();
                }
                cur.s[value_start..cur.i].to_string()
            }
        } else {
            String::new()
        };
        attrs.pairs.push((key, value));
    }
}

/// Span of a container body and its closing marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closing {
    /// Local index where the closing marker starts (end of the body).
    pub start: usize,
    /// Local index just past the closing marker.
    pub end: usize,
}

/// Finds the marker closing `tag`, scanning from local index `from`.
///
/// Opening markers of the same tag increase the depth and closing markers
/// decrease it, so `[quote][quote]a[/quote]b[/quote]` closes at the second
/// `[/quote]`. Other tags do not affect the depth.
pub fn find_closing(s: &str, from: usize, tag: Tag) -> Option<Closing> {
    let mut cur = Cursor::at(s, from);
    let mut depth = 1usize;

    while cur.skip_to(OPEN) {
        let Some(marker) = read_marker(s, cur.i) else {
            cur.bump();
            continue;
        };
        if marker.tag() == Some(tag) {
            if marker.closing {
                depth -= 1;
                if depth == 0 {
                    return Some(Closing {
                        start: marker.start,
                        end: marker.end,
                    });
                }
            } else {
                depth += 1;
            }
        }
        cur.seek(marker.end);
    }
    None
}

/// If a closing marker for `tag` starts exactly at `at`, returns its end.
pub fn closing_at(s: &str, at: usize, tag: Tag) -> Option<usize> {
    if s.as_bytes().get(at) != Some(&OPEN) {
        return None;
    }
    read_marker(s, at)
        .filter(|m| m.closing && m.tag() == Some(tag))
        .map(|m| m.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn marker(s: &str) -> Marker<'_> {
        read_marker(s, 0).expect("marker")
    }

    #[test]
    fn simple_open_and_close() {
        let open = marker("[b]x");
        assert_eq!(open.name, "b");
        assert!(!open.closing);
        assert_eq!(open.end, 3);
        assert!(open.attrs.is_empty());

        let close = marker("[/QUOTE]");
        assert!(close.closing);
        assert_eq!(close.tag(), Some(Tag::Quote));
        assert_eq!(close.end, 8);
    }

    #[test]
    fn primary_value_unquoted_with_spaces() {
        let m = marker("[spoiler=Some title]body");
        assert_eq!(m.attrs.value.as_deref(), Some("Some title"));
        assert!(m.attrs.pairs.is_empty());
    }

    #[test]
    fn primary_value_quoted_may_contain_bracket() {
        let m = marker(r#"[spoiler="a ] b"]"#);
        assert_eq!(m.attrs.value.as_deref(), Some("a ] b"));
    }

    #[test]
    fn quoted_primary_value_followed_by_pairs() {
        let m = marker(r#"[img="https://x/a.png" width=640 height='480']"#);
        assert_eq!(m.attrs.value.as_deref(), Some("https://x/a.png"));
        assert_eq!(m.attrs.get("width"), Some("640"));
        assert_eq!(m.attrs.get("HEIGHT"), Some("480"));
    }

    #[test]
    fn key_value_pairs() {
        let m = marker(r#"[quote name="Alice Smith" date="01.01.24" post=42]"#);
        assert_eq!(m.attrs.value, None);
        assert_eq!(
            m.attrs.pairs,
            vec![
                ("name".to_string(), "Alice Smith".to_string()),
                ("date".to_string(), "01.01.24".to_string()),
                ("post".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn list_item_marker() {
        assert!(marker("[*]").is_list_item());
        assert!(!marker("[b]").is_list_item());
    }

    #[test]
    fn malformed_markers_are_rejected() {
        for input in ["[", "[]", "[b", "[/b", "[b=x", "[b=x[y]", "[b!]", "[ b]", "[/b x]", "[b=\"x]"] {
            assert_eq!(read_marker(input, 0), None, "input: {input:?}");
        }
    }

    #[test]
    fn unquoted_value_cannot_span_lines() {
        assert_eq!(read_marker("[spoiler=a\nb]", 0), None);
    }

    #[test]
    fn find_closing_tracks_same_tag_depth() {
        let s = "[quote]a[quote]b[/quote]c[/quote]d";
        let closing = find_closing(s, 7, Tag::Quote).unwrap();
        assert_eq!(&s[closing.start..closing.end], "[/quote]");
        assert_eq!(&s[7..closing.start], "a[quote]b[/quote]c");
    }

    #[test]
    fn find_closing_ignores_other_tags() {
        let s = "[b]x[/i][/B]";
        let closing = find_closing(s, 3, Tag::Bold).unwrap();
        assert_eq!(closing.start, 8);
        assert_eq!(closing.end, 12);
    }

    #[test]
    fn find_closing_unterminated() {
        assert_eq!(find_closing("[spoiler]never closed", 9, Tag::Spoiler), None);
    }

    #[test]
    fn closing_at_exact_position() {
        assert_eq!(closing_at("[img=x][/img]", 7, Tag::Img), Some(13));
        assert_eq!(closing_at("[img=x] [/img]", 7, Tag::Img), None);
    }
}
