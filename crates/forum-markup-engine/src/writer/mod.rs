//! # Markup Writer
//!
//! Writes a content forest back to forum markup. Parsing the output yields
//! the same forest, so drafts can be stored as trees and posted as markup.
//!
//! Style tags are written around each run in a fixed order and closed in
//! reverse; adjacent runs are not merged into shared wrappers.

mod escape;

pub use escape::{escape_text, escape_value};

use escape::{escape_edge_line_breaks, escape_nested_markup};

use crate::model::{
    AttachmentRef, BulletRow, CodeType, ContentNode, ImageRef, ListItem, QuoteType, StyledText,
    TextRun,
};
use crate::parsing::kinds::{alignment_tag, bullet, list, media, notice_tag};
use crate::taxonomy::Tag;

/// Writes `nodes` as markup.
pub fn to_markup(nodes: &[ContentNode]) -> String {
    let mut writer = MarkupWriter::new('"');
    writer.nodes(nodes);
    writer.out
}

/// Writes styled text (such as a spoiler title) as markup.
pub fn styled_to_markup(text: &StyledText) -> String {
    let mut writer = MarkupWriter::new('"');
    writer.styled(text);
    writer.out
}

#[derive(Debug)]
struct MarkupWriter {
    out: String,
    /// Quote character around attribute values of style tags.
    quote: char,
}

impl MarkupWriter {
    fn new(quote: char) -> Self {
        Self {
            out: String::new(),
            quote,
        }
    }

    fn nodes(&mut self, nodes: &[ContentNode]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn node(&mut self, node: &ContentNode) {
        match node {
            ContentNode::Text { text } => self.styled(text),
            ContentNode::Image { image } => self.image(image),
            ContentNode::Attachment { attachment } => self.attachment(attachment),
            ContentNode::Alignment { kind, children } => {
                self.container(alignment_tag(*kind), None, children)
            }
            ContentNode::Notice { kind, children } => self.container(notice_tag(*kind), None, children),
            ContentNode::Spoiler { children, title } => {
                let title = title.as_ref().map(|t| {
                    // Nested markers use single quotes inside the double-quoted title.
                    let mut nested = MarkupWriter::new('\'');
                    nested.styled(t);
                    format!("=\"{}\"", escape_nested_markup(&nested.out))
                });
                self.container(Tag::Spoiler, title.as_deref(), children);
            }
            ContentNode::Quote { children, quote_type } => {
                let attrs = quote_type.as_ref().map(quote_attrs);
                self.container(Tag::Quote, attrs.as_deref(), children);
            }
            ContentNode::Hide { children, threshold } => {
                let attrs = threshold.map(|n| format!("={n}"));
                self.container(Tag::Hide, attrs.as_deref(), children);
            }
            ContentNode::Code { child, code_type } => self.code(child, code_type),
            ContentNode::List { items, kind } => self.list(items, list::keyword(*kind)),
            ContentNode::Bullet { rows } => self.bullet(rows),
        }
    }

    /// `[tag<attrs>]children[/tag]`; `attrs` starts with `=` or a space.
    fn container(&mut self, tag: Tag, attrs: Option<&str>, children: &[ContentNode]) {
        self.open(tag, attrs.unwrap_or(""));
        self.nodes(children);
        self.close(tag);
    }

    fn open(&mut self, tag: Tag, attrs: &str) {
        self.out.push('[');
        self.out.push_str(tag.name());
        self.out.push_str(attrs);
        self.out.push(']');
    }

    fn close(&mut self, tag: Tag) {
        self.out.push_str("[/");
        self.out.push_str(tag.name());
        self.out.push(']');
    }

    fn styled(&mut self, text: &StyledText) {
        for run in text.runs() {
            self.run(run);
        }
    }

    fn run(&mut self, run: &TextRun) {
        let wrappers = style_wrappers(run, self.quote);
        for (tag, attrs) in &wrappers {
            self.open(*tag, attrs);
        }
        if let Some(anchor) = &run.style.anchor {
            self.open(Tag::Anchor, "");
            self.out.push_str(&escape_text(anchor));
            self.close(Tag::Anchor);
        }
        self.out.push_str(&escape_text(&run.text));
        for (tag, _) in wrappers.iter().rev() {
            self.close(*tag);
        }
    }

    fn image(&mut self, image: &ImageRef) {
        // A primary value ends at the first space, so such urls go in the body.
        if image.url.contains(char::is_whitespace) {
            let mut attrs = String::new();
            push_dimensions(&mut attrs, image.width, image.height);
            self.open(Tag::Img, &attrs);
            self.out.push_str(&escape_text(&image.url));
            self.close(Tag::Img);
            return;
        }
        let mut attrs = format!("=\"{}\"", escape_value(&image.url));
        push_dimensions(&mut attrs, image.width, image.height);
        self.open(Tag::Img, &attrs);
    }

    fn attachment(&mut self, attachment: &AttachmentRef) {
        let mut value = attachment.id.to_string();
        if let Some(name) = &attachment.name {
            value.push(media::ID_SEPARATOR);
            value.push_str(name);
        }
        let mut attrs = format!("=\"{}\"", escape_value(&value));
        push_dimensions(&mut attrs, attachment.width, attachment.height);
        self.open(Tag::Attachment, &attrs);
    }

    fn code(&mut self, child: &ContentNode, code_type: &CodeType) {
        let attrs = match code_type {
            CodeType::Untitled => String::new(),
            CodeType::Titled(label) => format!("=\"{}\"", escape_value(label)),
        };
        self.open(Tag::Code, &attrs);
        let mut body = String::new();
        child.write_plain_text(&mut body);
        // Code bodies only decode references, so `%` stays as written.
        self.out.push_str(&body.replace('&', "&amp;").replace('[', "&#91;"));
        self.close(Tag::Code);
    }

    fn list(&mut self, items: &[ListItem], keyword: Option<&str>) {
        let attrs = keyword.map(|k| format!("={k}")).unwrap_or_default();
        self.open(Tag::List, &attrs);
        for item in items {
            self.out.push_str(list::ITEM);
            let mut written = MarkupWriter::new(self.quote);
            written.nodes(&item.children);
            self.out.push_str(&escape_edge_line_breaks(&written.out));
        }
        self.close(Tag::List);
    }

    fn bullet(&mut self, rows: &[BulletRow]) {
        self.open(Tag::List, &format!("={}", list::BULLET_TABLE));
        for row in rows {
            self.out.push_str(list::ITEM);
            self.out.push_str(&escape_text(&row.label));
            self.out.push(bullet::LABEL_SEPARATOR);
            if !row.description.is_empty() {
                self.out.push(' ');
                self.out.push_str(&escape_text(&row.description));
            }
        }
        self.close(Tag::List);
    }
}

/// Style tags wrapping a run, outermost first, with their attribute text.
fn style_wrappers(run: &TextRun, quote: char) -> Vec<(Tag, String)> {
    let style = &run.style;
    let mut wrappers = Vec::new();
    let quoted = |value: &str| format!("={quote}{}{quote}", escape_value(value));

    if let Some(link) = &style.link {
        wrappers.push((Tag::Url, quoted(link)));
    }
    let flags = [
        (style.bold, Tag::Bold),
        (style.italic, Tag::Italic),
        (style.underline, Tag::Underline),
        (style.strike, Tag::Strike),
        (style.superscript, Tag::Sup),
        (style.subscript, Tag::Sub),
    ];
    for (set, tag) in flags {
        if set {
            wrappers.push((tag, String::new()));
        }
    }
    if let Some(size) = style.size {
        wrappers.push((Tag::Size, format!("={size}")));
    }
    if let Some(color) = &style.color {
        wrappers.push((Tag::Color, quoted(color)));
    }
    if let Some(background) = &style.background {
        wrappers.push((Tag::Background, quoted(background)));
    }
    if let Some(font) = &style.font {
        wrappers.push((Tag::Font, quoted(font)));
    }
    if style.offtop {
        wrappers.push((Tag::Offtop, String::new()));
    }
    wrappers
}

fn quote_attrs(quote_type: &QuoteType) -> String {
    match quote_type {
        QuoteType::Title(title) => format!("=\"{}\"", escape_value(title)),
        QuoteType::Metadata(meta) => {
            let mut escaped = meta.clone();
            escaped.name = escape_value(&meta.name).into_owned();
            escaped.date = meta.date.as_deref().map(|d| escape_value(d).into_owned());
            format!(" {}", escaped.plain())
        }
    }
}

fn push_dimensions(attrs: &mut String, width: Option<u32>, height: Option<u32>) {
    if let Some(width) = width {
        attrs.push_str(&format!(" {}={width}", media::WIDTH));
    }
    if let Some(height) = height {
        attrs.push_str(&format!(" {}={height}", media::HEIGHT));
    }
}
