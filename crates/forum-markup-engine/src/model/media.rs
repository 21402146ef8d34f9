use serde::Serialize;

/// A resolved image resource.
///
/// Width and height are kept as captured from the markup so the rendering
/// layer can reserve space before the loader finishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRef {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    /// Height for the given display width, preserving the stored aspect ratio.
    ///
    /// Returns `None` when either dimension is unknown or zero.
    #[must_use]
    pub fn scaled_height(&self, display_width: f32) -> Option<f32> {
        scaled_height(self.width, self.height, display_width)
    }
}

/// A file uploaded to the forum, referenced by id from `[attachment="id:name"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttachmentRef {
    pub id: u64,
    pub name: Option<String>,
    /// Download or preview url, when the caller supplied attachment metadata.
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl AttachmentRef {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: None,
            url: None,
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub fn scaled_height(&self, display_width: f32) -> Option<f32> {
        scaled_height(self.width, self.height, display_width)
    }
}

fn scaled_height(width: Option<u32>, height: Option<u32>, display_width: f32) -> Option<f32> {
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some(display_width * h as f32 / w as f32),
        _ => None,
    }
}
