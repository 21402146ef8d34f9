use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

fn entity_regex() -> &'static Regex {
    static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
    ENTITY_REGEX.get_or_init(|| {
        Regex::new(r"&(?:#(\d{1,7})|#[xX]([0-9a-fA-F]{1,6})|([a-zA-Z][a-zA-Z0-9]{1,31}));")
            .expect("Invalid entity regex")
    })
}

/// Replaces character references (`&#1055;`, `&#x41F;`, `&quot;`) with the
/// characters they name.
///
/// Matches are collected first and replaced from the last to the first, so
/// earlier offsets stay valid while the string is edited. Each reference is
/// decoded exactly once: `&amp;#91;` becomes `&#91;`, not `[`. References to
/// invalid scalars or unknown names are left as they are.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let matches: Vec<_> = entity_regex().captures_iter(input).collect();
    if matches.is_empty() {
        return Cow::Borrowed(input);
    }

    let mut out = input.to_string();
    for caps in matches.iter().rev() {
        let Some(whole) = caps.get(0) else { continue };
        let replacement = if let Some(dec) = caps.get(1) {
            dec.as_str().parse::<u32>().ok().and_then(char::from_u32).map(String::from)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
        } else {
            let decoded = html_escape::decode_html_entities(whole.as_str());
            (decoded != whole.as_str()).then(|| decoded.into_owned())
        };
        if let Some(replacement) = replacement {
            out.replace_range(whole.range(), &replacement);
        }
    }
    Cow::Owned(out)
}
