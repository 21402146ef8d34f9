//! UniFFI bindings for forum-markup mobile apps
//!
//! Exposes markup parsing, text decoding and form serialization to the
//! Kotlin and Swift clients. The content tree crosses the boundary as a flat
//! preorder list of nodes with parent indices, which every binding language
//! can consume without recursive types.

use std::collections::{BTreeSet, HashMap};

use forum_markup_engine::{
    AlignmentKind, AttachmentInfo, CodeType, ContentNode, FieldKind, FieldValue, FormSerializer,
    ListKind, MarkupParser, NoticeKind, ParseOptions, QuoteType, StyledText, TextCodec, TextRun,
    plain_text,
};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Invalid parser options: {reason}")]
    InvalidOptions { reason: String },

    #[error("Form error: {reason}")]
    FormError { reason: String },
}

// ============ Parser Handle ============

/// A configured markup parser.
///
/// Holds resolution settings (host, smile host, legacy charset) so the app
/// builds it once and reuses it for every post.
#[derive(uniffi::Object)]
pub struct MarkupParserHandle {
    options: ParseOptions,
}

#[uniffi::export]
impl MarkupParserHandle {
    /// Create a parser. Omitted settings take the engine defaults.
    #[uniffi::constructor]
    pub fn new(
        base_url: Option<String>,
        smile_base_url: Option<String>,
        legacy_charset: Option<String>,
    ) -> Result<Self, FfiError> {
        let mut options = ParseOptions::default();
        if let Some(base_url) = base_url {
            options.base_url = base_url;
        }
        if let Some(smile_base_url) = smile_base_url {
            options.smile_base_url = smile_base_url;
        }
        if let Some(label) = legacy_charset {
            options.codec = TextCodec::for_label(&label).ok_or_else(|| FfiError::InvalidOptions {
                reason: format!("unknown charset label {label}"),
            })?;
        }
        Ok(Self { options })
    }

    /// Parse a post body. `attachments` describes the files uploaded to the post.
    pub fn parse(&self, markup: String, attachments: Vec<AttachmentInfoDto>) -> ContentDto {
        let mut options = self.options.clone();
        options.attachments = attachments
            .into_iter()
            .map(|a| {
                (
                    a.id,
                    AttachmentInfo {
                        url: a.url,
                        width: a.width,
                        height: a.height,
                    },
                )
            })
            .collect();
        ContentDto::from_engine(&MarkupParser::new(options).parse(&markup))
    }
}

// ============ DTOs ============

/// Metadata of an uploaded file, from the post payload.
#[derive(uniffi::Record)]
pub struct AttachmentInfoDto {
    pub id: u64,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A parsed content tree, flattened in preorder.
#[derive(uniffi::Record)]
pub struct ContentDto {
    pub nodes: Vec<NodeDto>,
}

impl ContentDto {
    fn from_engine(nodes: &[ContentNode]) -> Self {
        let mut flat = Vec::new();
        for node in nodes {
            flatten(node, None, 0, &mut flat);
        }
        Self { nodes: flat }
    }
}

/// One node of the flattened tree.
///
/// Fields not relevant to `kind` are empty. List items and bullet rows
/// appear as their own nodes (`list_item`, `bullet_row`).
#[derive(uniffi::Record, Default)]
pub struct NodeDto {
    /// Node type (e.g., "text", "quote", "list_item")
    pub kind: String,
    /// Index of the parent node in `ContentDto::nodes`
    pub parent: Option<u32>,
    /// Nesting depth for indentation
    pub depth: u32,
    /// Styled runs of a text node
    pub runs: Vec<TextRunDto>,
    /// Alignment, list or notice kind (e.g., "center", "numeric", "moderator")
    pub variant: Option<String>,
    /// Quote title, code label, notice heading or plain spoiler title
    pub title: Option<String>,
    /// Styled spoiler title
    pub title_runs: Vec<TextRunDto>,
    pub quote_name: Option<String>,
    pub quote_date: Option<String>,
    pub quote_post_id: Option<u64>,
    pub hide_threshold: Option<u32>,
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub attachment_id: Option<u64>,
    pub attachment_name: Option<String>,
    /// Bullet row label
    pub label: Option<String>,
    /// Bullet row description
    pub description: Option<String>,
}

/// A run of text with its inline style.
#[derive(uniffi::Record)]
pub struct TextRunDto {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub offtop: bool,
    pub size: Option<u8>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub font: Option<String>,
    pub link: Option<String>,
    pub anchor: Option<String>,
}

impl TextRunDto {
    fn from_engine(run: &TextRun) -> Self {
        let style = &run.style;
        Self {
            text: run.text.clone(),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strike: style.strike,
            superscript: style.superscript,
            subscript: style.subscript,
            offtop: style.offtop,
            size: style.size,
            color: style.color.clone(),
            background: style.background.clone(),
            font: style.font.clone(),
            link: style.link.clone(),
            anchor: style.anchor.clone(),
        }
    }
}

fn runs(text: &StyledText) -> Vec<TextRunDto> {
    text.runs().iter().map(TextRunDto::from_engine).collect()
}

/// Appends `node` and its descendants to `out`.
fn flatten(node: &ContentNode, parent: Option<u32>, depth: u32, out: &mut Vec<NodeDto>) {
    let index = out.len() as u32;
    let mut dto = NodeDto {
        kind: node.kind_name().to_string(),
        parent,
        depth,
        ..NodeDto::default()
    };

    match node {
        ContentNode::Text { text } => dto.runs = runs(text),
        ContentNode::Image { image } => {
            dto.url = Some(image.url.clone());
            dto.width = image.width;
            dto.height = image.height;
        }
        ContentNode::Attachment { attachment } => {
            dto.attachment_id = Some(attachment.id);
            dto.attachment_name = attachment.name.clone();
            dto.url = attachment.url.clone();
            dto.width = attachment.width;
            dto.height = attachment.height;
        }
        ContentNode::Alignment { kind, .. } => dto.variant = Some(alignment_name(*kind).to_string()),
        ContentNode::Spoiler { title, .. } => {
            if let Some(title) = title {
                dto.title = Some(title.to_plain());
                dto.title_runs = runs(title);
            }
        }
        ContentNode::Quote { quote_type, .. } => match quote_type {
            Some(QuoteType::Title(title)) => dto.title = Some(title.clone()),
            Some(QuoteType::Metadata(meta)) => {
                dto.quote_name = Some(meta.name.clone());
                dto.quote_date = meta.date.clone();
                dto.quote_post_id = meta.post_id;
            }
            None => {}
        },
        ContentNode::Code { code_type, .. } => {
            if let CodeType::Titled(label) = code_type {
                dto.title = Some(label.clone());
            }
        }
        ContentNode::Hide { threshold, .. } => dto.hide_threshold = *threshold,
        ContentNode::List { kind, .. } => dto.variant = Some(list_name(*kind).to_string()),
        ContentNode::Notice { kind, .. } => {
            dto.variant = Some(notice_name(*kind).to_string());
            dto.title = Some(kind.title().to_string());
        }
        ContentNode::Bullet { .. } => {}
    }
    out.push(dto);

    match node {
        ContentNode::List { items, .. } => {
            for item in items {
                let item_index = out.len() as u32;
                out.push(NodeDto {
                    kind: "list_item".to_string(),
                    parent: Some(index),
                    depth: depth + 1,
                    ..NodeDto::default()
                });
                for child in &item.children {
                    flatten(child, Some(item_index), depth + 2, out);
                }
            }
        }
        ContentNode::Bullet { rows } => {
            for row in rows {
                out.push(NodeDto {
                    kind: "bullet_row".to_string(),
                    parent: Some(index),
                    depth: depth + 1,
                    label: Some(row.label.clone()),
                    description: Some(row.description.clone()),
                    ..NodeDto::default()
                });
            }
        }
        _ => {
            for child in node.children() {
                flatten(child, Some(index), depth + 1, out);
            }
        }
    }
}

fn alignment_name(kind: AlignmentKind) -> &'static str {
    match kind {
        AlignmentKind::Left => "left",
        AlignmentKind::Center => "center",
        AlignmentKind::Right => "right",
        AlignmentKind::Justify => "justify",
    }
}

fn list_name(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Bullet => "bullet",
        ListKind::Numeric => "numeric",
        ListKind::Roman => "roman",
    }
}

fn notice_name(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Curator => "curator",
        NoticeKind::Moderator => "moderator",
        NoticeKind::Admin => "admin",
    }
}

// ============ Forms ============

/// Kind of a write-form field.
#[derive(uniffi::Enum, Clone, Copy)]
pub enum FieldKindDto {
    Text,
    Dropdown,
    Uploads,
    Checkboxes,
}

impl From<FieldKindDto> for FieldKind {
    fn from(kind: FieldKindDto) -> Self {
        match kind {
            FieldKindDto::Text => FieldKind::Text,
            FieldKindDto::Dropdown => FieldKind::Dropdown,
            FieldKindDto::Uploads => FieldKind::Uploads,
            FieldKindDto::Checkboxes => FieldKind::Checkboxes,
        }
    }
}

/// Value entered into a write-form field.
#[derive(uniffi::Enum)]
pub enum FieldValueDto {
    Text { value: String },
    Dropdown { index: u32 },
    Uploads { ids: Vec<u64> },
    Checkboxes { indices: Vec<u32> },
}

impl From<FieldValueDto> for FieldValue {
    fn from(value: FieldValueDto) -> Self {
        match value {
            FieldValueDto::Text { value } => FieldValue::Text(value),
            FieldValueDto::Dropdown { index } => FieldValue::Dropdown(index as usize),
            FieldValueDto::Uploads { ids } => FieldValue::Uploads(ids),
            FieldValueDto::Checkboxes { indices } => {
                FieldValue::Checkboxes(indices.into_iter().map(|i| i as usize).collect::<BTreeSet<_>>())
            }
        }
    }
}

#[derive(uniffi::Record)]
pub struct FormFieldDto {
    pub id: String,
    pub value: FieldValueDto,
}

#[derive(uniffi::Record)]
pub struct FieldSchemaDto {
    pub id: String,
    pub kind: FieldKindDto,
}

// ============ Standalone Functions ============

/// Parse markup with default settings.
#[uniffi::export]
pub fn parse_markup(markup: String) -> ContentDto {
    ContentDto::from_engine(&forum_markup_engine::parse_markup(&markup))
}

/// Text content of markup, for previews and notifications.
#[uniffi::export]
pub fn markup_plain_text(markup: String) -> String {
    plain_text(&forum_markup_engine::parse_markup(&markup))
}

/// Decode a percent-encoded string (legacy code page first, then UTF-8).
#[uniffi::export]
pub fn decode_percent(input: String) -> Option<String> {
    TextCodec::default().decode_percent(&input)
}

/// Serialize write-form fields into an urlencoded body.
///
/// An empty `schema` accepts any field.
#[uniffi::export]
pub fn serialize_form(
    fields: Vec<FormFieldDto>,
    schema: Vec<FieldSchemaDto>,
) -> Result<String, FfiError> {
    let mut form = FormSerializer::default();
    if !schema.is_empty() {
        let schema: HashMap<String, FieldKind> = schema
            .into_iter()
            .map(|field| (field.id, field.kind.into()))
            .collect();
        form = form.with_schema(schema);
    }
    for field in fields {
        form.set(&field.id, field.value.into())
            .map_err(|e| FfiError::FormError {
                reason: e.to_string(),
            })?;
    }
    Ok(form.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flattens_in_preorder() {
        let content = parse_markup("a[quote=T][b]x[/b][/quote][list][*]i[/list]".to_string());
        let kinds: Vec<_> = content.nodes.iter().map(|n| n.kind.as_str()).collect();
        assert_eq!(kinds, vec!["text", "quote", "text", "list", "list_item", "text"]);

        let quote = &content.nodes[1];
        assert_eq!(quote.title.as_deref(), Some("T"));
        assert_eq!(quote.depth, 0);

        let inner = &content.nodes[2];
        assert_eq!(inner.parent, Some(1));
        assert_eq!(inner.depth, 1);
        assert!(inner.runs[0].bold);

        let item_text = &content.nodes[5];
        assert_eq!(item_text.parent, Some(4));
        assert_eq!(item_text.depth, 2);
    }

    #[test]
    fn test_bullet_rows_and_notices() {
        let content = parse_markup("[cur]hi[/cur][list=spec][*]OS: Android[/list]".to_string());
        let notice = &content.nodes[0];
        assert_eq!(notice.variant.as_deref(), Some("curator"));
        assert_eq!(notice.title.as_deref(), Some("Curator notice"));

        let row = content.nodes.iter().find(|n| n.kind == "bullet_row").unwrap();
        assert_eq!(row.label.as_deref(), Some("OS"));
        assert_eq!(row.description.as_deref(), Some("Android"));
    }

    #[test]
    fn test_parser_handle_resolves_attachments() {
        let parser = MarkupParserHandle::new(Some("https://forum.example".to_string()), None, None)
            .unwrap();
        let content = parser.parse(
            "[attachment=\"5:a.png\"][img=/b.png]".to_string(),
            vec![AttachmentInfoDto {
                id: 5,
                url: "https://forum.example/dl/5".to_string(),
                width: Some(3),
                height: None,
            }],
        );

        let attachment = &content.nodes[0];
        assert_eq!(attachment.attachment_id, Some(5));
        assert_eq!(attachment.url.as_deref(), Some("https://forum.example/dl/5"));
        assert_eq!(attachment.width, Some(3));
        assert_eq!(content.nodes[1].url.as_deref(), Some("https://forum.example/b.png"));
    }

    #[test]
    fn test_unknown_charset_is_rejected() {
        let result = MarkupParserHandle::new(None, None, Some("nope".to_string()));
        assert!(matches!(result, Err(FfiError::InvalidOptions { .. })));
    }

    #[test]
    fn test_plain_text_and_decoding() {
        assert_eq!(markup_plain_text("[b]Hi[/b] [i]there[/i]".to_string()), "Hi there");
        assert_eq!(decode_percent("%CF%F0%E8".to_string()).as_deref(), Some("При"));
    }

    #[test]
    fn test_serialize_form() {
        let body = serialize_form(
            vec![
                FormFieldDto {
                    id: "title".to_string(),
                    value: FieldValueDto::Text {
                        value: "Hi there".to_string(),
                    },
                },
                FormFieldDto {
                    id: "opts".to_string(),
                    value: FieldValueDto::Checkboxes {
                        indices: vec![2, 0],
                    },
                },
            ],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(body, "title=Hi+there&opts%5B%5D=0&opts%5B%5D=2");
    }

    #[test]
    fn test_serialize_form_kind_mismatch() {
        let result = serialize_form(
            vec![FormFieldDto {
                id: "os".to_string(),
                value: FieldValueDto::Text {
                    value: "x".to_string(),
                },
            }],
            vec![FieldSchemaDto {
                id: "os".to_string(),
                kind: FieldKindDto::Dropdown,
            }],
        );
        assert!(matches!(result, Err(FfiError::FormError { .. })));
    }
}
