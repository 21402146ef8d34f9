use crate::codec::decode_entities;
use crate::model::CodeType;
use crate::parsing::marker::Attributes;

/// `[code]` is untitled; `[code=rust]` carries a label.
///
/// The label is trimmed after references are decoded, so `&#32;` alone is
/// no label at all.
pub fn code_type(attrs: &Attributes) -> CodeType {
    let label = attrs.value.as_deref().map(decode_entities);
    match label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => CodeType::Titled(label.to_string()),
        _ => CodeType::Untitled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let titled = Attributes {
            value: Some("rust".to_string()),
            pairs: Vec::new(),
        };
        assert_eq!(code_type(&titled), CodeType::Titled("rust".to_string()));

        let blank = Attributes {
            value: Some("  ".to_string()),
            pairs: Vec::new(),
        };
        assert_eq!(code_type(&blank), CodeType::Untitled);

        let encoded_space = Attributes {
            value: Some("&#32;".to_string()),
            pairs: Vec::new(),
        };
        assert_eq!(code_type(&encoded_space), CodeType::Untitled);

        let padded = Attributes {
            value: Some("&#32;rust&#9;".to_string()),
            pairs: Vec::new(),
        };
        assert_eq!(code_type(&padded), CodeType::Titled("rust".to_string()));
        assert_eq!(code_type(&Attributes::default()), CodeType::Untitled);
    }
}
