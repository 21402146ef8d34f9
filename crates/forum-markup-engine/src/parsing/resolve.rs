//! Url, attachment and smile resolution.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::codec::{TextCodec, decode_entities};
use crate::model::AttachmentRef;

pub const DEFAULT_BASE_URL: &str = "https://4pda.to";
pub const DEFAULT_SMILE_BASE_URL: &str = "https://4pda.to/s/smiles";

/// Metadata the caller knows about an uploaded file (from the post payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentInfo {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Knobs for one parser instance.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Host that relative links and images are resolved against.
    pub base_url: String,
    /// Where smile images live when a smile has no emoji equivalent.
    pub smile_base_url: String,
    pub codec: TextCodec,
    /// Attachments of the post being parsed, keyed by id.
    pub attachments: HashMap<u64, AttachmentInfo>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            smile_base_url: DEFAULT_SMILE_BASE_URL.to_string(),
            codec: TextCodec::default(),
            attachments: HashMap::new(),
        }
    }
}

impl ParseOptions {
    /// Resolves a link or image url written in markup.
    ///
    /// - character references are decoded
    /// - `//host/path` gets `https:`
    /// - `/path` is joined to `base_url`
    /// - forum redirect links (`/stat/go?u=<escaped>`) are unwrapped
    pub fn resolve_url(&self, raw: &str) -> String {
        let url = decode_entities(raw.trim()).into_owned();
        let url = if url.starts_with("//") {
            format!("https:{url}")
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url.trim_end_matches('/'), url)
        } else {
            url
        };
        self.unwrap_redirect(&url).unwrap_or(url)
    }

    fn unwrap_redirect(&self, url: &str) -> Option<String> {
        let caps = redirect_regex().captures(url)?;
        let target = self.codec.decode_percent(caps.get(1)?.as_str())?;
        if target.starts_with("http://") || target.starts_with("https://") {
            Some(target)
        } else {
            log::debug!("redirect target is not absolute: {target}");
            None
        }
    }

    /// Fills in url and missing dimensions from the attachment table.
    pub fn resolve_attachment(&self, mut attachment: AttachmentRef) -> AttachmentRef {
        if let Some(info) = self.attachments.get(&attachment.id) {
            attachment.url = Some(info.url.clone());
            attachment.width = attachment.width.or(info.width);
            attachment.height = attachment.height.or(info.height);
        }
        attachment
    }

    /// Image url for a smile without an emoji equivalent.
    pub fn smile_url(&self, name: &str) -> String {
        format!("{}/{}.gif", self.smile_base_url.trim_end_matches('/'), name)
    }
}

fn redirect_regex() -> &'static Regex {
    static REDIRECT_REGEX: OnceLock<Regex> = OnceLock::new();
    REDIRECT_REGEX.get_or_init(|| {
        Regex::new(r"^https?://[^/?#]+/stat/go/?\?(?:[^#]*&)?u=([^&#]+)")
            .expect("Invalid redirect regex")
    })
}
