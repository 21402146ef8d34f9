use serde::Serialize;

/// Structured attribution of a `[quote name=".." date=".." post=..]` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuoteMetadata {
    pub name: String,
    pub date: Option<String>,
    pub post_id: Option<u64>,
}

impl QuoteMetadata {
    /// Canonical attribute form, also what the writer emits inside `[quote ...]`.
    ///
    /// Absent fields are omitted: `name="Alice" date="01.01.24" post=42`,
    /// `name="Alice" post=42`, `name="Alice" date="01.01.24"`, `name="Alice"`.
    #[must_use]
    pub fn plain(&self) -> String {
        match (&self.date, self.post_id) {
            (Some(date), Some(post)) => {
                format!(r#"name="{}" date="{}" post={}"#, self.name, date, post)
            }
            (None, Some(post)) => format!(r#"name="{}" post={}"#, self.name, post),
            (Some(date), None) => format!(r#"name="{}" date="{}""#, self.name, date),
            (None, None) => format!(r#"name="{}""#, self.name),
        }
    }
}

/// How a quote is attributed. The two shapes are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QuoteType {
    /// `[quote=Some title]`
    Title(String),
    /// `[quote name="Alice" date="01.01.24" post=42]`
    Metadata(QuoteMetadata),
}
