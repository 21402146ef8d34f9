use crate::codec::decode_entities;
use crate::model::TextStyle;
use crate::parsing::marker::Attributes;
use crate::taxonomy::Tag;

/// Returns `style` with the attribute of a simple style tag applied.
///
/// `url` and `anchor` need their body and are handled by the parser; for
/// them (and for malformed values such as `[size=huge]`) the style is
/// returned unchanged.
pub fn apply(tag: Tag, attrs: &Attributes, style: &TextStyle) -> TextStyle {
    let mut next = style.clone();
    match tag {
        Tag::Bold => next.bold = true,
        Tag::Italic => next.italic = true,
        Tag::Underline => next.underline = true,
        Tag::Strike => next.strike = true,
        Tag::Sup => next.superscript = true,
        Tag::Sub => next.subscript = true,
        Tag::Offtop => next.offtop = true,
        Tag::Size => {
            if let Some(size) = attrs.value.as_deref().and_then(parse_size) {
                next.size = Some(size);
            }
        }
        Tag::Color => next.color = value(attrs).or(next.color),
        Tag::Background => next.background = value(attrs).or(next.background),
        Tag::Font => next.font = value(attrs).or(next.font),
        _ => {}
    }
    next
}

fn parse_size(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|size| *size > 0)
}

fn value(attrs: &Attributes) -> Option<String> {
    let raw = attrs.value.as_deref()?;
    let decoded = decode_entities(raw.trim());
    (!decoded.is_empty()).then(|| decoded.into_owned())
}
