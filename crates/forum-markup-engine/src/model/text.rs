use serde::Serialize;

/// Inline attributes applied by style tags (`[b]`, `[color=..]`, `[url=..]`, ...).
///
/// Style tags never become tree nodes of their own; they end up here, on the
/// run of text they wrap. Nested style tags compose: `[b][i]x[/i][/b]` yields
/// one run with both `bold` and `italic` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub superscript: bool,
    pub subscript: bool,
    /// Off-topic remark, rendered small and dimmed.
    pub offtop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Resolved link target for `[url]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Named in-page anchor for `[anchor]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl TextStyle {
    /// Returns true if no attribute is set.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text sharing one [`TextStyle`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

/// An ordered sequence of styled runs: the payload of a text node.
///
/// # Invariants
///
/// - Adjacent runs never share the same style (they are merged on push)
/// - Runs are non-empty, except anchor runs which mark a position only
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StyledText {
    runs: Vec<TextRun>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut styled = Self::new();
        styled.push(&text.into(), &TextStyle::default());
        styled
    }

    /// Appends `text` with `style`, merging into the last run when styles match.
    pub fn push(&mut self, text: &str, style: &TextStyle) {
        if text.is_empty() && style.anchor.is_none() {
            return;
        }
        if let Some(last) = self.runs.last_mut()
            && last.style == *style
            && style.anchor.is_none()
        {
            last.text.push_str(text);
            return;
        }
        self.runs.push(TextRun {
            text: text.to_string(),
            style: style.clone(),
        });
    }

    /// Appends every run of `other`, keeping the merge invariant.
    pub fn extend(&mut self, other: StyledText) {
        for run in other.runs {
            self.push(&run.text, &run.style);
        }
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Copy without whitespace at either end, whatever styles carry it.
    ///
    /// Anchor runs stop the trim, as they mark a position in the text.
    pub fn trimmed(&self) -> StyledText {
        let mut runs = self.runs.clone();
        while let Some(first) = runs.first_mut()
            && first.style.anchor.is_none()
        {
            first.text = first.text.trim_start().to_string();
            if !first.text.is_empty() {
                break;
            }
            runs.remove(0);
        }
        while let Some(last) = runs.last_mut()
            && last.style.anchor.is_none()
        {
            last.text = last.text.trim_end().to_string();
            if !last.text.is_empty() {
                break;
            }
            runs.pop();
        }
        Self { runs }
    }

    /// Concatenated text of every run, styles dropped.
    pub fn to_plain(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}
