//! # Text Codec
//!
//! Best-guess decoding of text pulled out of forum markup and urls.
//!
//! The forum predates UTF-8: percent-escaped text in links and bodies may be
//! Windows-1251 or UTF-8, sometimes escaped twice. [`TextCodec`] tries the
//! legacy code page first and falls back to UTF-8 when that reading looks
//! wrong, then peels one more escape layer if `%` survives.
//!
//! - **`percent`**: raw unescaping and the legacy/UTF-8 decision
//! - **`entities`**: numeric and named character reference decoding

mod entities;
mod percent;

use std::sync::OnceLock;

use encoding_rs::Encoding;
use regex::Regex;

pub use entities::decode_entities;
use percent::{Layer, decode_bytes, unescape};

/// Percent-decoding with a legacy single-byte code page hypothesis.
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
    legacy: &'static Encoding,
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new(encoding_rs::WINDOWS_1251)
    }
}

impl TextCodec {
    pub fn new(legacy: &'static Encoding) -> Self {
        Self { legacy }
    }

    /// Builds a codec from a WHATWG encoding label such as `"windows-1251"`.
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.as_bytes()).map(Self::new)
    }

    pub fn legacy_encoding(&self) -> &'static Encoding {
        self.legacy
    }

    /// Decodes a percent-encoded string, form-encoding style (`+` is a space).
    ///
    /// 1. Unescape and decode with the legacy code page.
    /// 2. If that reading has replacement characters or looks like UTF-8,
    ///    use the UTF-8 reading instead.
    /// 3. If the result still contains `%`, decode it once more and prefer
    ///    that when it succeeds.
    ///
    /// Returns `None` when neither encoding yields clean text.
    pub fn decode_percent(&self, input: &str) -> Option<String> {
        let first = self.decode_layer(input, true)?;
        if !first.contains('%') {
            return Some(first);
        }
        match self.decode_layer(&first, false) {
            Some(second) => Some(second),
            None => Some(first),
        }
    }

    fn decode_layer(&self, input: &str, plus_as_space: bool) -> Option<String> {
        let bytes = unescape(input, plus_as_space);
        decode_bytes(&bytes, self.legacy).map(Layer::into_string)
    }

    /// Normalizes a run of markup text: decodes embedded `%XX` escape runs,
    /// then character references.
    ///
    /// Escape runs that cannot be decoded are kept verbatim. A lone `%` (as in
    /// `50%`) is never touched.
    pub fn normalize_text(&self, input: &str) -> String {
        let unescaped = self.decode_escape_runs(input);
        decode_entities(&unescaped).into_owned()
    }

    fn decode_escape_runs(&self, input: &str) -> String {
        if !input.contains('%') {
            return input.to_string();
        }

        let runs: Vec<_> = escape_run_regex().find_iter(input).collect();
        let mut out = input.to_string();
        for run in runs.iter().rev() {
            if let Some(decoded) = self.decode_layer(run.as_str(), false) {
                out.replace_range(run.range(), &decoded);
            }
        }
        out
    }
}

fn escape_run_regex() -> &'static Regex {
    static ESCAPE_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
    ESCAPE_RUN_REGEX
        .get_or_init(|| Regex::new(r"(?:%[0-9A-Fa-f]{2})+").expect("Invalid escape run regex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn utf8_escapes_fall_back_from_legacy() {
        let codec = TextCodec::default();
        assert_eq!(
            codec.decode_percent("%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82"),
            Some("Привет".to_string())
        );
    }

    #[test]
    fn legacy_escapes_decode_as_windows_1251() {
        // "Привет" in Windows-1251
        let codec = TextCodec::default();
        assert_eq!(
            codec.decode_percent("%CF%F0%E8%E2%E5%F2"),
            Some("Привет".to_string())
        );
    }

    #[test]
    fn plus_decodes_to_space() {
        let codec = TextCodec::default();
        assert_eq!(
            codec.decode_percent("hello+world%21"),
            Some("hello world!".to_string())
        );
    }

    #[test]
    fn double_escaped_input_is_peeled_twice() {
        let codec = TextCodec::default();
        assert_eq!(
            codec.decode_percent("%25D0%259F%25D1%2580"),
            Some("Пр".to_string())
        );
    }

    #[test]
    fn literal_percent_survives() {
        let codec = TextCodec::default();
        assert_eq!(codec.decode_percent("100%25"), Some("100%".to_string()));
    }

    #[test]
    fn undecodable_bytes_return_none() {
        // 0x98 is unassigned in Windows-1251 and the bytes are not UTF-8 either
        let codec = TextCodec::default();
        assert_eq!(codec.decode_percent("%98%FF"), None);
    }

    #[test]
    fn codec_from_label() {
        let codec = TextCodec::for_label("cp1251").unwrap();
        assert_eq!(codec.legacy_encoding(), encoding_rs::WINDOWS_1251);
        assert!(TextCodec::for_label("no-such-charset").is_none());
    }

    #[rstest]
    #[case("50% off", "50% off")]
    #[case("see %D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82!", "see Привет!")]
    #[case("a &amp; b", "a & b")]
    #[case("&#91;b&#93;", "[b]")]
    #[case("%zz", "%zz")]
    fn normalize_text_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(TextCodec::default().normalize_text(input), expected);
    }
}
