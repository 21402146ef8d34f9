use crate::codec::decode_entities;
use crate::model::{AttachmentRef, ImageRef};
use crate::parsing::marker::Attributes;
use crate::parsing::resolve::ParseOptions;

pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const SRC: &str = "src";

/// Separates the attachment id from the file name in `"id:name"`.
pub const ID_SEPARATOR: char = ':';

/// `width=..` and `height=..` pairs; anything non-numeric is dropped.
pub fn dimensions(attrs: &Attributes) -> (Option<u32>, Option<u32>) {
    let parse = |key| attrs.get(key).and_then(|v| v.trim().parse::<u32>().ok());
    (parse(WIDTH), parse(HEIGHT))
}

/// Image leaf for `url` with the dimensions found on the marker.
///
/// The url is taken whole, so a `[img]..[/img]` body may contain spaces.
/// Returns `None` for a blank url.
pub fn image(url: &str, attrs: &Attributes, options: &ParseOptions) -> Option<ImageRef> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let (width, height) = dimensions(attrs);
    Some(ImageRef {
        url: options.resolve_url(url),
        width,
        height,
    })
}

/// Image leaf for the primary value of `[img=..]`.
///
/// An unquoted `[img=url width=640]` reads the whole tail as its value, so
/// the url ends at the first space and `key=value` tokens after it are
/// accepted too.
pub fn image_from_value(value: &str, attrs: &Attributes, options: &ParseOptions) -> Option<ImageRef> {
    let mut tokens = value.split_whitespace();
    let mut image = image(tokens.next()?, attrs, options)?;
    for (key, raw) in tokens.filter_map(|token| token.split_once('=')) {
        let parsed = raw.trim_matches(['"', '\'']).parse::<u32>().ok();
        if key.eq_ignore_ascii_case(WIDTH) {
            image.width = image.width.or(parsed);
        } else if key.eq_ignore_ascii_case(HEIGHT) {
            image.height = image.height.or(parsed);
        }
    }
    Some(image)
}

/// Attachment leaf from `[attachment="id:name"]`.
///
/// Returns `None` when the id is missing or not a number.
pub fn attachment(attrs: &Attributes, options: &ParseOptions) -> Option<AttachmentRef> {
    let raw = attrs.value.as_deref()?.trim();
    let (id, name) = raw.split_once(ID_SEPARATOR).unwrap_or((raw, ""));
    let Ok(id) = id.trim().parse::<u64>() else {
        log::debug!("attachment with a malformed id: {raw:?}");
        return None;
    };

    let name = decode_entities(name.trim());
    let (width, height) = dimensions(attrs);
    let attachment = AttachmentRef {
        id,
        name: (!name.is_empty()).then(|| name.into_owned()),
        url: None,
        width,
        height,
    };
    Some(options.resolve_attachment(attachment))
}
