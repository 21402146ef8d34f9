//! # Tag Taxonomy
//!
//! Static classification of the closed markup tag vocabulary.
//!
//! Every tag falls into exactly one [`TagClass`]. The parser classifies a tag
//! once, right after resolving its name, and branches on the class; it never
//! compares tag name strings itself.

/// A tag of the forum markup vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Bold,
    Italic,
    Strike,
    Underline,
    Sup,
    Sub,
    Size,
    Color,
    Background,
    Font,
    Url,
    Anchor,
    Offtop,
    Center,
    Left,
    Right,
    Justify,
    Spoiler,
    List,
    Quote,
    Code,
    Hide,
    /// Curator notice.
    Cur,
    /// Moderator notice.
    Mod,
    /// Administrator notice.
    Ex,
    Snapback,
    MergeTime,
    Img,
    Attachment,
    Smile,
}

/// How the parser treats a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Inline attribute on the wrapped text run.
    Style,
    /// Block holding nested content up to a matching close marker.
    Container,
    /// Pseudo-container parsed as a single self-contained leaf.
    Leaf,
    /// Marker from the source forum software with no rendering effect.
    Ignored,
}

/// Wire keyword for every tag. Lookup is case-insensitive.
const TAG_NAMES: &[(&str, Tag)] = &[
    ("b", Tag::Bold),
    ("i", Tag::Italic),
    ("s", Tag::Strike),
    ("u", Tag::Underline),
    ("sup", Tag::Sup),
    ("sub", Tag::Sub),
    ("size", Tag::Size),
    ("color", Tag::Color),
    ("background", Tag::Background),
    ("font", Tag::Font),
    ("url", Tag::Url),
    ("anchor", Tag::Anchor),
    ("offtop", Tag::Offtop),
    ("center", Tag::Center),
    ("left", Tag::Left),
    ("right", Tag::Right),
    ("justify", Tag::Justify),
    ("spoiler", Tag::Spoiler),
    ("list", Tag::List),
    ("quote", Tag::Quote),
    ("code", Tag::Code),
    ("hide", Tag::Hide),
    ("cur", Tag::Cur),
    ("mod", Tag::Mod),
    ("ex", Tag::Ex),
    ("snapback", Tag::Snapback),
    ("mergetime", Tag::MergeTime),
    ("img", Tag::Img),
    ("attachment", Tag::Attachment),
    ("smile", Tag::Smile),
];

impl Tag {
    /// Resolves a tag keyword. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Tag> {
        TAG_NAMES
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
            .map(|(_, tag)| *tag)
    }

    /// Canonical lowercase keyword written on the wire.
    pub fn name(self) -> &'static str {
        TAG_NAMES
            .iter()
            .find(|(_, tag)| *tag == self)
            .map(|(keyword, _)| *keyword)
            .unwrap_or_default()
    }

    pub fn class(self) -> TagClass {
        match self {
            Tag::Bold
            | Tag::Italic
            | Tag::Strike
            | Tag::Underline
            | Tag::Sup
            | Tag::Sub
            | Tag::Size
            | Tag::Color
            | Tag::Background
            | Tag::Font
            | Tag::Url
            | Tag::Anchor
            | Tag::Offtop => TagClass::Style,
            Tag::Center
            | Tag::Left
            | Tag::Right
            | Tag::Justify
            | Tag::Spoiler
            | Tag::List
            | Tag::Quote
            | Tag::Code
            | Tag::Hide
            | Tag::Cur
            | Tag::Mod
            | Tag::Ex => TagClass::Container,
            Tag::Img | Tag::Attachment | Tag::Smile => TagClass::Leaf,
            Tag::Snapback | Tag::MergeTime => TagClass::Ignored,
        }
    }

    /// True if the tag holds child content rather than styling inline text.
    ///
    /// Pseudo-containers (`img`, `attachment`, `smile`) and the ignored
    /// forum markers count as containers.
    pub fn is_container_tag(self) -> bool {
        !matches!(self.class(), TagClass::Style)
    }

    /// True if the container's body is parsed recursively for nested blocks.
    ///
    /// Only `spoiler` and `quote` qualify; every other container flattens
    /// nested block markup to text.
    pub fn can_contain_tags(self) -> bool {
        matches!(self, Tag::Spoiler | Tag::Quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("b", Tag::Bold)]
    #[case("B", Tag::Bold)]
    #[case("QUOTE", Tag::Quote)]
    #[case("MergeTime", Tag::MergeTime)]
    #[case("cur", Tag::Cur)]
    fn from_name_is_case_insensitive(#[case] name: &str, #[case] tag: Tag) {
        assert_eq!(Tag::from_name(name), Some(tag));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Tag::from_name("foo"), None);
        assert_eq!(Tag::from_name(""), None);
        assert_eq!(Tag::from_name("*"), None);
    }

    #[test]
    fn every_tag_round_trips_through_its_name() {
        for (keyword, tag) in TAG_NAMES {
            assert_eq!(tag.name(), *keyword);
            assert_eq!(Tag::from_name(tag.name()), Some(*tag));
        }
    }

    #[test]
    fn only_spoiler_and_quote_contain_tags() {
        let recursive: Vec<Tag> = TAG_NAMES
            .iter()
            .map(|(_, tag)| *tag)
            .filter(|tag| tag.can_contain_tags())
            .collect();
        assert_eq!(recursive, vec![Tag::Spoiler, Tag::Quote]);
    }

    #[rstest]
    #[case(Tag::Bold, false)]
    #[case(Tag::Url, false)]
    #[case(Tag::Offtop, false)]
    #[case(Tag::Center, true)]
    #[case(Tag::Code, true)]
    #[case(Tag::Img, true)]
    #[case(Tag::Attachment, true)]
    #[case(Tag::Snapback, true)]
    fn container_classification(#[case] tag: Tag, #[case] container: bool) {
        assert_eq!(tag.is_container_tag(), container);
    }

    #[test]
    fn containers_that_flatten_nested_markup() {
        assert!(Tag::Center.is_container_tag());
        assert!(!Tag::Center.can_contain_tags());
        assert!(Tag::List.is_container_tag());
        assert!(!Tag::List.can_contain_tags());
    }
}
