use std::borrow::Cow;

use encoding_rs::Encoding;
use percent_encoding::percent_decode_str;

/// Result of decoding one percent-encoded layer.
pub(super) enum Layer {
    /// The legacy code page reading was kept.
    Legacy(String),
    /// The legacy reading was rejected; the bytes were valid UTF-8.
    Utf8(String),
}

impl Layer {
    pub(super) fn into_string(self) -> String {
        match self {
            Layer::Legacy(s) | Layer::Utf8(s) => s,
        }
    }
}

/// Percent-decodes `input` to raw bytes. `+` becomes a space when `plus_as_space`.
pub(super) fn unescape(input: &str, plus_as_space: bool) -> Vec<u8> {
    let source: Cow<'_, str> = if plus_as_space && input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };
    percent_decode_str(&source).collect()
}

/// Decodes `bytes` with `legacy`, falling back to UTF-8 when the legacy reading
/// looks wrong. Returns `None` when neither reading yields clean text.
pub(super) fn decode_bytes(bytes: &[u8], legacy: &'static Encoding) -> Option<Layer> {
    let (text, had_errors) = legacy.decode_without_bom_handling(bytes);
    let utf8 = std::str::from_utf8(bytes).ok();

    let legacy_ok = !had_errors && !has_unassigned(&text);
    // Well-formed multi-byte UTF-8 is practically never legacy text.
    let looks_utf8 = !bytes.is_ascii() && utf8.is_some();

    if legacy_ok && !looks_utf8 {
        return Some(Layer::Legacy(text.into_owned()));
    }
    match utf8 {
        Some(utf8) => Some(Layer::Utf8(utf8.to_string())),
        None => {
            log::debug!("undecodable percent-encoded run ({} bytes)", bytes.len());
            None
        }
    }
}

/// Replacement characters and C1 controls mark bytes the code page leaves
/// unassigned.
fn has_unassigned(text: &str) -> bool {
    text.chars()
        .any(|c| c == char::REPLACEMENT_CHARACTER || ('\u{80}'..='\u{9f}').contains(&c))
}
