//! Indented one-line-per-node rendering of a content forest, for debugging
//! and snapshot tests.

use std::fmt::{self, Write};

use crate::model::{
    AlignmentKind, CodeType, ContentNode, ListKind, NoticeKind, QuoteType, TextRun,
};

/// Renders `nodes` as an indented outline, two spaces per level.
pub fn outline(nodes: &[ContentNode]) -> String {
    Outline(nodes).to_string()
}

struct Outline<'a>(&'a [ContentNode]);

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_children(f, self.0, 0)
    }
}

fn write_node(out: &mut impl Write, node: &ContentNode, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        ContentNode::Text { text } => {
            for run in text.runs() {
                writeln!(out, "{indent}text {:?}{}", run.text, run_flags(run))?;
            }
        }
        ContentNode::Image { image } => {
            writeln!(out, "{indent}image {}{}", image.url, dims(image.width, image.height))?;
        }
        ContentNode::Attachment { attachment } => {
            write!(out, "{indent}attachment #{}", attachment.id)?;
            if let Some(name) = &attachment.name {
                write!(out, " {name:?}")?;
            }
            if let Some(url) = &attachment.url {
                write!(out, " {url}")?;
            }
            writeln!(out, "{}", dims(attachment.width, attachment.height))?;
        }
        ContentNode::Alignment { kind, children } => {
            writeln!(out, "{indent}alignment {}", alignment_name(*kind))?;
            write_children(out, children, depth + 1)?;
        }
        ContentNode::Spoiler { children, title } => {
            match title {
                Some(title) => writeln!(out, "{indent}spoiler title={:?}", title.to_plain())?,
                None => writeln!(out, "{indent}spoiler")?,
            }
            write_children(out, children, depth + 1)?;
        }
        ContentNode::Quote { children, quote_type } => {
            match quote_type {
                Some(QuoteType::Title(title)) => writeln!(out, "{indent}quote title={title:?}")?,
                Some(QuoteType::Metadata(meta)) => writeln!(out, "{indent}quote {}", meta.plain())?,
                None => writeln!(out, "{indent}quote")?,
            }
            write_children(out, children, depth + 1)?;
        }
        ContentNode::Code { child, code_type } => {
            match code_type {
                CodeType::Untitled => writeln!(out, "{indent}code")?,
                CodeType::Titled(label) => writeln!(out, "{indent}code label={label:?}")?,
            }
            write_node(out, child, depth + 1)?;
        }
        ContentNode::Hide { children, threshold } => {
            match threshold {
                Some(threshold) => writeln!(out, "{indent}hide threshold={threshold}")?,
                None => writeln!(out, "{indent}hide")?,
            }
            write_children(out, children, depth + 1)?;
        }
        ContentNode::List { items, kind } => {
            writeln!(out, "{indent}list {}", list_name(*kind))?;
            for item in items {
                writeln!(out, "{indent}  item")?;
                write_children(out, &item.children, depth + 2)?;
            }
        }
        ContentNode::Notice { children, kind } => {
            writeln!(out, "{indent}notice {}", notice_name(*kind))?;
            write_children(out, children, depth + 1)?;
        }
        ContentNode::Bullet { rows } => {
            writeln!(out, "{indent}bullet")?;
            for row in rows {
                writeln!(out, "{indent}  row {:?} {:?}", row.label, row.description)?;
            }
        }
    }
    Ok(())
}

fn write_children(out: &mut impl Write, children: &[ContentNode], depth: usize) -> fmt::Result {
    for child in children {
        write_node(out, child, depth)?;
    }
    Ok(())
}

fn run_flags(run: &TextRun) -> String {
    let style = &run.style;
    let mut flags = String::new();
    for (set, name) in [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.underline, "underline"),
        (style.strike, "strike"),
        (style.superscript, "sup"),
        (style.subscript, "sub"),
        (style.offtop, "offtop"),
    ] {
        if set {
            flags.push(' ');
            flags.push_str(name);
        }
    }
    if let Some(size) = style.size {
        flags.push_str(&format!(" size={size}"));
    }
    for (value, name) in [
        (&style.color, "color"),
        (&style.background, "background"),
        (&style.font, "font"),
        (&style.link, "link"),
        (&style.anchor, "anchor"),
    ] {
        if let Some(value) = value {
            flags.push_str(&format!(" {name}={value}"));
        }
    }
    flags
}

fn dims(width: Option<u32>, height: Option<u32>) -> String {
    match (width, height) {
        (Some(w), Some(h)) => format!(" {w}x{h}"),
        (Some(w), None) => format!(" width={w}"),
        (None, Some(h)) => format!(" height={h}"),
        (None, None) => String::new(),
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
