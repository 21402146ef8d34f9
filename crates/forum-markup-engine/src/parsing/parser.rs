use crate::codec::decode_entities;
use crate::model::{ContentNode, ImageRef, ListItem, StyledText, TextStyle, plain_text};
use crate::taxonomy::{Tag, TagClass};

use super::{
    builder::NodeSink,
    cursor::Cursor,
    kinds::{
        alignment_kind, bullet, code, hide,
        list::{self, ListShape},
        media, notice_kind, quote, smile, style,
    },
    marker::{Closing, Marker, OPEN, closing_at, find_closing, read_marker},
    resolve::ParseOptions,
};

/// Nesting beyond this depth is kept as literal text.
const MAX_NESTING: usize = 128;

/// How a body treats the markers it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Every tag applies. Top level and `spoiler`/`quote` bodies.
    Full,
    /// Style tags and leaves apply; block containers stay literal text.
    Flat,
}

/// Parsing context handed down to nested bodies.
#[derive(Debug, Clone)]
struct Scope {
    style: TextStyle,
    mode: Mode,
    depth: usize,
}

impl Scope {
    fn root() -> Self {
        Self {
            style: TextStyle::default(),
            mode: Mode::Full,
            depth: 0,
        }
    }

    fn styled(&self, style: TextStyle) -> Self {
        Self {
            style,
            mode: self.mode,
            depth: self.depth + 1,
        }
    }

    fn body(&self, mode: Mode) -> Self {
        Self {
            style: self.style.clone(),
            mode,
            depth: self.depth + 1,
        }
    }
}

/// Turns forum markup into a content forest.
///
/// Parsing never fails: unknown tags, malformed markers and stray closing
/// markers stay in the output as literal text, and a container that is never
/// closed extends to the end of its enclosing body.
///
/// The parser holds only its options, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    options: ParseOptions,
}

impl MarkupParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a whole post body.
    pub fn parse(&self, input: &str) -> Vec<ContentNode> {
        self.children(input, 0, &Scope::root())
    }

    /// Parses a one-line fragment (such as a spoiler title) as styled text.
    ///
    /// Block containers stay literal; leaves other than text are dropped.
    pub fn parse_styled(&self, input: &str) -> StyledText {
        let scope = Scope {
            mode: Mode::Flat,
            ..Scope::root()
        };
        let mut styled = StyledText::new();
        for node in self.children(input, 0, &scope) {
            if let ContentNode::Text { text } = node {
                styled.extend(text);
            }
        }
        styled
    }

    fn children(&self, s: &str, base: usize, scope: &Scope) -> Vec<ContentNode> {
        let mut sink = NodeSink::new();
        self.parse_span(s, base, scope, &mut sink);
        sink.finish()
    }

    /// Scans `s` for markers, emitting text and nodes into `sink`.
    ///
    /// `base` is the offset of `s` in the whole input, used for diagnostics.
    fn parse_span(&self, s: &str, base: usize, scope: &Scope, sink: &mut NodeSink) {
        let mut cur = Cursor::new(s);
        let mut text_start = 0;

        while cur.skip_to(OPEN) {
            let Some(marker) = read_marker(s, cur.i) else {
                cur.bump();
                continue;
            };

            // Flushing early is safe: adjacent runs of one style merge again.
            self.push_text(&s[text_start..marker.start], &scope.style, sink);
            text_start = marker.start;

            match self.apply_marker(s, base, &marker, scope, sink) {
                Some(next) => {
                    text_start = next;
                    cur.seek(next);
                }
                None => {
                    cur.bump();
                }
            }
        }

        self.push_text(&s[text_start..], &scope.style, sink);
    }

    fn push_text(&self, raw: &str, style: &TextStyle, sink: &mut NodeSink) {
        if raw.is_empty() {
            return;
        }
        sink.push_text(&self.options.codec.normalize_text(raw), style);
    }

    /// Applies one marker. Returns the local index parsing resumes at, or
    /// `None` when the marker is literal text.
    fn apply_marker(
        &self,
        s: &str,
        base: usize,
        marker: &Marker<'_>,
        scope: &Scope,
        sink: &mut NodeSink,
    ) -> Option<usize> {
        if marker.closing {
            log::debug!("stray closing marker [/{}] at {}", marker.name, base + marker.start);
            return None;
        }
        let tag = marker.tag()?;
        if scope.depth >= MAX_NESTING {
            log::debug!("nesting limit reached at {}", base + marker.start);
            return None;
        }

        match tag.class() {
            TagClass::Style => Some(self.style_tag(s, base, marker, tag, scope, sink)),
            TagClass::Container if scope.mode == Mode::Full => {
                self.container(s, base, marker, tag, scope, sink)
            }
            TagClass::Container => None,
            TagClass::Leaf => self.leaf(s, marker, tag, scope, sink),
            TagClass::Ignored => Some(match find_closing(s, marker.end, tag) {
                Some(closing) => closing.end,
                None => marker.end,
            }),
        }
    }

    /// Body span of `marker`; unterminated bodies run to the end of `s`.
    fn body_of(&self, s: &str, base: usize, marker: &Marker<'_>, tag: Tag) -> Closing {
        find_closing(s, marker.end, tag).unwrap_or_else(|| {
            log::debug!("unterminated [{}] at {}", tag.name(), base + marker.start);
            Closing {
                start: s.len(),
                end: s.len(),
            }
        })
    }

    fn style_tag(
        &self,
        s: &str,
        base: usize,
        marker: &Marker<'_>,
        tag: Tag,
        scope: &Scope,
        sink: &mut NodeSink,
    ) -> usize {
        let closing = self.body_of(s, base, marker, tag);
        let body = &s[marker.end..closing.start];
        let body_base = base + marker.end;

        match tag {
            Tag::Url => self.url(marker, body, body_base, scope, sink),
            Tag::Anchor => self.anchor(marker, body, body_base, scope, sink),
            _ => {
                let inner = scope.styled(style::apply(tag, &marker.attrs, &scope.style));
                self.parse_span(body, body_base, &inner, sink);
            }
        }
        closing.end
    }

    /// `[url=href]text[/url]` links its body; `[url]href[/url]` links itself.
    fn url(&self, marker: &Marker<'_>, body: &str, body_base: usize, scope: &Scope, sink: &mut NodeSink) {
        let href = marker
            .attrs
            .value_or("href")
            .map(str::trim)
            .filter(|href| !href.is_empty());

        let mut linked = scope.style.clone();
        match href {
            Some(href) => {
                linked.link = Some(self.options.resolve_url(href));
                self.parse_span(body, body_base, &scope.styled(linked), sink);
            }
            None => {
                let href = body.trim();
                if href.is_empty() {
                    return;
                }
                linked.link = Some(self.options.resolve_url(href));
                self.push_text(href, &linked, sink);
            }
        }
    }

    /// `[anchor]name[/anchor]` marks a position; `[anchor=name]body[/anchor]`
    /// marks it and keeps the body.
    fn anchor(&self, marker: &Marker<'_>, body: &str, body_base: usize, scope: &Scope, sink: &mut NodeSink) {
        let (name, rest) = match marker.attrs.value.as_deref() {
            Some(name) => (name, body),
            None => (body, ""),
        };
        let name = decode_entities(name.trim());
        if !name.is_empty() {
            let mut anchored = scope.style.clone();
            anchored.anchor = Some(name.into_owned());
            sink.push_text("", &anchored);
        }
        self.parse_span(rest, body_base, &scope.styled(scope.style.clone()), sink);
    }

    fn container(
        &self,
        s: &str,
        base: usize,
        marker: &Marker<'_>,
        tag: Tag,
        scope: &Scope,
        sink: &mut NodeSink,
    ) -> Option<usize> {
        let closing = self.body_of(s, base, marker, tag);
        let body = &s[marker.end..closing.start];
        let body_base = base + marker.end;
        let attrs = &marker.attrs;
        let inner = scope.body(if tag.can_contain_tags() {
            Mode::Full
        } else {
            Mode::Flat
        });

        let node = match tag {
            Tag::Spoiler => ContentNode::Spoiler {
                children: self.children(body, body_base, &inner),
                title: self.spoiler_title(attrs.value.as_deref()),
            },
            Tag::Quote => ContentNode::Quote {
                children: self.children(body, body_base, &inner),
                quote_type: quote::quote_type(attrs),
            },
            Tag::Code => ContentNode::Code {
                child: Box::new(ContentNode::Text {
                    text: StyledText::plain(decode_entities(body)),
                }),
                code_type: code::code_type(attrs),
            },
            Tag::Hide => ContentNode::Hide {
                children: self.children(body, body_base, &inner),
                threshold: hide::threshold(attrs),
            },
            Tag::List => self.list(body, body_base, list::shape(attrs), &inner),
            other => {
                let children = self.children(body, body_base, &inner);
                if let Some(kind) = alignment_kind(other) {
                    ContentNode::Alignment { kind, children }
                } else if let Some(kind) = notice_kind(other) {
                    ContentNode::Notice { kind, children }
                } else {
                    log::debug!("no node for container [{}]", other.name());
                    return None;
                }
            }
        };

        sink.push_node(node);
        Some(closing.end)
    }

    fn spoiler_title(&self, value: Option<&str>) -> Option<StyledText> {
        let title = self.parse_styled(value?).trimmed();
        (!title.is_empty()).then_some(title)
    }

    fn list(&self, body: &str, body_base: usize, shape: ListShape, scope: &Scope) -> ContentNode {
        let items = list::split_items(body);
        match shape {
            ListShape::List(kind) => ContentNode::List {
                items: items
                    .into_iter()
                    .map(|range| ListItem {
                        children: self.children(&body[range.clone()], body_base + range.start, scope),
                    })
                    .collect(),
                kind,
            },
            ListShape::BulletTable => {
                let plain = Scope {
                    style: TextStyle::default(),
                    ..scope.clone()
                };
                let rows = items
                    .into_iter()
                    .filter_map(|range| {
                        let nodes = self.children(&body[range.clone()], body_base + range.start, &plain);
                        bullet::row(&plain_text(&nodes))
                    })
                    .collect();
                ContentNode::Bullet { rows }
            }
        }
    }

    fn leaf(&self, s: &str, marker: &Marker<'_>, tag: Tag, scope: &Scope, sink: &mut NodeSink) -> Option<usize> {
        match tag {
            Tag::Img => self.img(s, marker, sink),
            Tag::Attachment => {
                let attachment = media::attachment(&marker.attrs, &self.options)?;
                sink.push_node(ContentNode::attachment(attachment));
                Some(closing_at(s, marker.end, Tag::Attachment).unwrap_or(marker.end))
            }
            Tag::Smile => {
                let name = marker.attrs.value.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
                match smile::emoji(name) {
                    Some(emoji) => sink.push_text(emoji, &scope.style),
                    None => sink.push_node(ContentNode::image(ImageRef::new(self.options.smile_url(name)))),
                }
                Some(marker.end)
            }
            _ => None,
        }
    }

    /// `[img=url]`, `[img src=url]` or `[img]url[/img]`.
    fn img(&self, s: &str, marker: &Marker<'_>, sink: &mut NodeSink) -> Option<usize> {
        let attrs = &marker.attrs;
        let inline = match (attrs.value.as_deref(), attrs.get(media::SRC)) {
            (Some(value), _) => Some(media::image_from_value(value, attrs, &self.options)?),
            (None, Some(src)) => Some(media::image(src, attrs, &self.options)?),
            (None, None) => None,
        };
        if let Some(image) = inline {
            sink.push_node(ContentNode::image(image));
            return Some(closing_at(s, marker.end, Tag::Img).unwrap_or(marker.end));
        }

        let closing = find_closing(s, marker.end, Tag::Img)?;
        let image = media::image(&s[marker.end..closing.start], attrs, &self.options)?;
        sink.push_node(ContentNode::image(image));
        Some(closing.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlignmentKind, CodeType, ListKind, NoticeKind, QuoteType};
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Vec<ContentNode> {
        MarkupParser::default().parse(input)
    }

    fn bold() -> TextStyle {
        TextStyle {
            bold: true,
            ..TextStyle::default()
        }
    }

    fn styled(parts: &[(&str, TextStyle)]) -> ContentNode {
        let mut text = StyledText::new();
        for (part, style) in parts {
            text.push(part, style);
        }
        ContentNode::Text { text }
    }

    #[test]
    fn plain_text_only() {
        assert_eq!(parse("hello world"), vec![ContentNode::text("hello world")]);
        assert_eq!(parse(""), Vec::<ContentNode>::new());
    }

    #[test]
    fn style_runs() {
        assert_eq!(
            parse("a [b]b[/b] c"),
            vec![styled(&[("a ", TextStyle::default()), ("b", bold()), (" c", TextStyle::default())])]
        );
    }

    #[test]
    fn nested_styles_compose() {
        let nodes = parse("[b][i]x[/i][/b]");
        let ContentNode::Text { text } = &nodes[0] else {
            panic!("expected text");
        };
        assert_eq!(text.runs().len(), 1);
        assert!(text.runs()[0].style.bold && text.runs()[0].style.italic);
    }

    #[test]
    fn unknown_tags_are_literal() {
        assert_eq!(parse("[foo]x[/foo]"), vec![ContentNode::text("[foo]x[/foo]")]);
        assert_eq!(parse("a[/b]c"), vec![ContentNode::text("a[/b]c")]);
        assert_eq!(parse("[*] item"), vec![ContentNode::text("[*] item")]);
    }

    #[test]
    fn url_with_value_and_body_forms() {
        let link = |href: &str| TextStyle {
            link: Some(href.to_string()),
            ..TextStyle::default()
        };
        assert_eq!(
            parse("[url=https://rust-lang.org]Rust[/url]"),
            vec![styled(&[("Rust", link("https://rust-lang.org"))])]
        );
        assert_eq!(
            parse("[url]/forum/[/url]"),
            vec![styled(&[("/forum/", link("https://4pda.to/forum/"))])]
        );
    }

    #[test]
    fn anchor_marks_position() {
        let nodes = parse("[anchor]top[/anchor]Start");
        let ContentNode::Text { text } = &nodes[0] else {
            panic!("expected text");
        };
        assert_eq!(text.runs()[0].text, "");
        assert_eq!(text.runs()[0].style.anchor.as_deref(), Some("top"));
        assert_eq!(text.to_plain(), "Start");
    }

    #[test]
    fn quote_with_metadata() {
        let nodes = parse("[quote name=\"Alice\" post=7]hi[/quote]");
        let ContentNode::Quote { children, quote_type } = &nodes[0] else {
            panic!("expected quote");
        };
        assert_eq!(children, &vec![ContentNode::text("hi")]);
        assert!(matches!(quote_type, Some(QuoteType::Metadata(m)) if m.name == "Alice" && m.post_id == Some(7)));
    }

    #[test]
    fn code_body_is_raw() {
        assert_eq!(
            parse("[code=rust]let [b]x[/b] = &amp;y;[/code]"),
            vec![ContentNode::Code {
                child: Box::new(ContentNode::text("let [b]x[/b] = &y;")),
                code_type: CodeType::Titled("rust".to_string()),
            }]
        );
    }

    #[test]
    fn flat_containers_keep_nested_blocks_literal() {
        assert_eq!(
            parse("[center][b]a[/b][quote]q[/quote][/center]"),
            vec![ContentNode::Alignment {
                kind: AlignmentKind::Center,
                children: vec![styled(&[("a", bold()), ("[quote]q[/quote]", TextStyle::default())])],
            }]
        );
    }

    #[test]
    fn spoiler_and_quote_recurse() {
        assert_eq!(
            parse("[spoiler][center]x[/center][/spoiler]"),
            vec![ContentNode::Spoiler {
                children: vec![ContentNode::Alignment {
                    kind: AlignmentKind::Center,
                    children: vec![ContentNode::text("x")],
                }],
                title: None,
            }]
        );
    }

    #[test]
    fn spoiler_title_is_styled() {
        let nodes = parse("[spoiler=\"[b]Specs[/b] sheet\"][/spoiler]");
        let ContentNode::Spoiler { children, title } = &nodes[0] else {
            panic!("expected spoiler");
        };
        assert!(children.is_empty());
        let title = title.as_ref().unwrap();
        assert_eq!(title.to_plain(), "Specs sheet");
        assert!(title.runs()[0].style.bold);
    }

    #[test]
    fn blank_spoiler_title_after_decoding() {
        assert_eq!(
            parse("[spoiler=&#32;]x[/spoiler]"),
            vec![ContentNode::Spoiler {
                children: vec![ContentNode::text("x")],
                title: None,
            }]
        );

        let nodes = parse("[spoiler=\"&#32;[i] Notes [/i]\"][/spoiler]");
        let ContentNode::Spoiler { title, .. } = &nodes[0] else {
            panic!("expected spoiler");
        };
        let title = title.as_ref().unwrap();
        assert_eq!(title.to_plain(), "Notes");
        assert!(title.runs()[0].style.italic);
    }

    #[test]
    fn unterminated_container_runs_to_end() {
        assert_eq!(
            parse("[hide=10]secret"),
            vec![ContentNode::Hide {
                children: vec![ContentNode::text("secret")],
                threshold: Some(10),
            }]
        );
    }

    #[test]
    fn notices() {
        assert_eq!(
            parse("[mod]Closed[/mod]"),
            vec![ContentNode::Notice {
                children: vec![ContentNode::text("Closed")],
                kind: NoticeKind::Moderator,
            }]
        );
    }

    #[test]
    fn list_items() {
        assert_eq!(
            parse("[list=1]\n[*]one\n[*][b]two[/b]\n[/list]"),
            vec![ContentNode::List {
                items: vec![
                    ListItem {
                        children: vec![ContentNode::text("one")],
                    },
                    ListItem {
                        children: vec![styled(&[("two", bold())])],
                    },
                ],
                kind: ListKind::Numeric,
            }]
        );
    }

    #[test]
    fn images_in_both_forms() {
        let expected = ContentNode::image(ImageRef {
            url: "https://x.org/a.png".to_string(),
            width: Some(10),
            height: Some(20),
        });
        assert_eq!(parse("[img=https://x.org/a.png width=10 height=20]"), vec![expected.clone()]);
        assert_eq!(
            parse("[img width=10 height=20]https://x.org/a.png[/img]"),
            vec![expected.clone()]
        );
        assert_eq!(
            parse("[img=\"https://x.org/a.png\" width=10 height=20][/img]"),
            vec![expected]
        );
    }

    #[test]
    fn image_body_keeps_spaces_in_url() {
        assert_eq!(
            parse("[img]https://x.org/a b.png[/img]"),
            vec![ContentNode::image(ImageRef::new("https://x.org/a b.png"))]
        );
    }

    #[test]
    fn smiles() {
        assert_eq!(parse("hi [smile=wink]"), vec![ContentNode::text("hi 😉")]);
        assert_eq!(
            parse("[smile=facepalm]"),
            vec![ContentNode::image(ImageRef::new("https://4pda.to/s/smiles/facepalm.gif"))]
        );
    }

    #[test]
    fn snapback_and_mergetime_vanish() {
        assert_eq!(
            parse("a[snapback]123[/snapback]b[mergetime]1700000000[/mergetime]c"),
            vec![ContentNode::text("abc")]
        );
    }

    #[test]
    fn text_is_normalized() {
        assert_eq!(parse("a &amp; b %D0%9F"), vec![ContentNode::text("a & b П")]);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let input = "[quote]".repeat(1000) + "x";
        let nodes = parse(&input);
        assert!(plain_text(&nodes).ends_with('x'));
    }
}
