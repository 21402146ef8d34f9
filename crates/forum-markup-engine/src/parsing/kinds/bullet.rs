use crate::model::BulletRow;

pub const LABEL_SEPARATOR: char = ':';

/// Builds a spec-sheet row from the plain text of one `[*]` item.
///
/// The label is the text before the first `:`. Every non-blank line after
/// it is trimmed and followed by `\n`; the joined description then loses
/// exactly one trailing character. Rows with neither label nor description
/// are dropped.
pub fn row(item: &str) -> Option<BulletRow> {
    let (label, rest) = item.split_once(LABEL_SEPARATOR).unwrap_or((item, ""));
    let label = label.trim().to_string();

    let mut description = String::new();
    for line in rest.lines().map(str::trim).filter(|l| !l.is_empty()) {
        description.push_str(line);
        description.push('\n');
    }
    description.pop();

    if label.is_empty() && description.is_empty() {
        return None;
    }
    Some(BulletRow { label, description })
}
