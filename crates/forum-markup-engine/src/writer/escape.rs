use std::borrow::Cow;

/// Escapes body text so it parses back to itself.
///
/// `[` could open a marker, `%` could start an escape run and `&` could start
/// a character reference; all three become numeric or named references.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, |c| match c {
        '&' => Some("&amp;"),
        '[' => Some("&#91;"),
        '%' => Some("&#37;"),
        _ => None,
    })
}

/// Escapes a quoted attribute value. Values may not contain either quote
/// character or a line break.
pub fn escape_value(input: &str) -> Cow<'_, str> {
    escape(input, |c| match c {
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

/// Makes already-written markup safe inside a `"..."` attribute value.
///
/// The markup is parsed again after the marker is read, so its own escapes
/// must survive untouched; only the characters that would end the value are
/// replaced.
pub fn escape_nested_markup(input: &str) -> Cow<'_, str> {
    escape(input, |c| match c {
        '"' => Some("&quot;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

/// Escapes line breaks at either edge of written markup.
///
/// List items drop the line breaks around them, so breaks that belong to the
/// item's text are written as references.
pub fn escape_edge_line_breaks(input: &str) -> Cow<'_, str> {
    let is_break = |c: char| c == '\n' || c == '\r';
    let inner = input.trim_matches(is_break);
    if inner.len() == input.len() {
        return Cow::Borrowed(input);
    }
    let lead_len = input.len() - input.trim_start_matches(is_break).len();
    let (lead, rest) = input.split_at(lead_len);
    let trail = &rest[inner.len()..];

    let line_breaks = |c: char| match c {
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    };
    let mut out = escape(lead, line_breaks).into_owned();
    out.push_str(inner);
    out.push_str(&escape(trail, line_breaks));
    Cow::Owned(out)
}

fn escape(input: &str, replacement: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !input.chars().any(|c| replacement(c).is_some()) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match replacement(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_entities;

    #[test]
    fn text_escapes() {
        assert_eq!(escape_text("a [b] 50% & co"), "a &#91;b] 50&#37; &amp; co");
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn escaped_text_decodes_back() {
        for input in ["&#91;", "[*]", "100%", "&amp;amp;", "%D0%9F"] {
            assert_eq!(decode_entities(&escape_text(input)), input);
        }
    }

    #[test]
    fn value_escapes() {
        assert_eq!(escape_value("say \"hi\"\nit's"), "say &quot;hi&quot;&#10;it&#39;s");
    }

    #[test]
    fn edge_line_breaks() {
        assert_eq!(escape_edge_line_breaks("\na\nb\r\n"), "&#10;a\nb&#13;&#10;");
        assert_eq!(escape_edge_line_breaks("\n\n"), "&#10;&#10;");
        assert!(matches!(escape_edge_line_breaks("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn nested_markup_keeps_escapes() {
        assert_eq!(escape_nested_markup("&amp; \"x\""), "&amp; &quot;x&quot;");
    }
}
