use serde::Serialize;

use super::{AttachmentRef, ImageRef, QuoteType, StyledText};

/// Horizontal alignment of an `[left]`, `[center]`, `[right]` or `[justify]` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentKind {
    Left,
    Center,
    Right,
    Justify,
}

/// Marker style of a `[list]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Bullet,
    Numeric,
    Roman,
}

/// Staff notice blocks: `[cur]`, `[mod]`, `[ex]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Curator,
    Moderator,
    Admin,
}

impl NoticeKind {
    /// Fixed heading shown above the notice body.
    pub fn title(self) -> &'static str {
        match self {
            NoticeKind::Curator => "Curator notice",
            NoticeKind::Moderator => "Moderator notice",
            NoticeKind::Admin => "Administrator notice",
        }
    }
}

/// Label of a `[code]` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "title", rename_all = "snake_case")]
pub enum CodeType {
    Untitled,
    Titled(String),
}

/// One `[*]` entry of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ListItem {
    pub children: Vec<ContentNode>,
}

/// A label/value row of a spec-sheet bullet table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BulletRow {
    pub label: String,
    pub description: String,
}

/// A node of the parsed content tree.
///
/// Every container holds its children in source order; render order is
/// document order. Nodes are plain values: equality and hashing are deep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    Text {
        text: StyledText,
    },
    Attachment {
        attachment: AttachmentRef,
    },
    Image {
        image: ImageRef,
    },
    Alignment {
        kind: AlignmentKind,
        children: Vec<ContentNode>,
    },
    Spoiler {
        children: Vec<ContentNode>,
        title: Option<StyledText>,
    },
    Quote {
        children: Vec<ContentNode>,
        quote_type: Option<QuoteType>,
    },
    Code {
        child: Box<ContentNode>,
        code_type: CodeType,
    },
    Hide {
        children: Vec<ContentNode>,
        threshold: Option<u32>,
    },
    List {
        items: Vec<ListItem>,
        kind: ListKind,
    },
    Notice {
        children: Vec<ContentNode>,
        kind: NoticeKind,
    },
    Bullet {
        rows: Vec<BulletRow>,
    },
}

impl ContentNode {
    /// Shorthand for an unstyled text node.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text {
            text: StyledText::plain(text),
        }
    }

    pub fn image(image: ImageRef) -> Self {
        ContentNode::Image { image }
    }

    pub fn attachment(attachment: AttachmentRef) -> Self {
        ContentNode::Attachment { attachment }
    }

    /// Short lowercase name of the variant, as used by outlines and the FFI layer.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentNode::Text { .. } => "text",
            ContentNode::Attachment { .. } => "attachment",
            ContentNode::Image { .. } => "image",
            ContentNode::Alignment { .. } => "alignment",
            ContentNode::Spoiler { .. } => "spoiler",
            ContentNode::Quote { .. } => "quote",
            ContentNode::Code { .. } => "code",
            ContentNode::Hide { .. } => "hide",
            ContentNode::List { .. } => "list",
            ContentNode::Notice { .. } => "notice",
            ContentNode::Bullet { .. } => "bullet",
        }
    }

    /// Direct child nodes in order. List items are flattened one after another.
    pub fn children(&self) -> Vec<&ContentNode> {
        match self {
            ContentNode::Text { .. }
            | ContentNode::Attachment { .. }
            | ContentNode::Image { .. }
            | ContentNode::Bullet { .. } => Vec::new(),
            ContentNode::Alignment { children, .. }
            | ContentNode::Spoiler { children, .. }
            | ContentNode::Quote { children, .. }
            | ContentNode::Hide { children, .. }
            | ContentNode::Notice { children, .. } => children.iter().collect(),
            ContentNode::Code { child, .. } => vec![child.as_ref()],
            ContentNode::List { items, .. } => {
                items.iter().flat_map(|item| item.children.iter()).collect()
            }
        }
    }

    /// Appends the text content of this node and its descendants, depth-first.
    pub fn write_plain_text(&self, out: &mut String) {
        if let ContentNode::Text { text } = self {
            out.push_str(&text.to_plain());
            return;
        }
        for child in self.children() {
            child.write_plain_text(out);
        }
    }
}

/// Plain-text projection of a forest: text node contents concatenated depth-first.
///
/// Used for previews and notification bodies where structure is not rendered.
pub fn plain_text(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_plain_text(&mut out);
    }
    out
}
