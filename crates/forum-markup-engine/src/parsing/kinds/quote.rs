use crate::codec::decode_entities;
use crate::model::{QuoteMetadata, QuoteType};
use crate::parsing::marker::Attributes;

pub const NAME: &str = "name";
pub const DATE: &str = "date";
pub const POST: &str = "post";

/// Picks the quote attribution from the opening marker's attribute shape.
///
/// `[quote=Title]` gives a bare title; `[quote name=".." ...]` gives
/// structured metadata. A primary value always wins, and metadata requires
/// a `name`; the parser never builds one shape out of the other.
pub fn quote_type(attrs: &Attributes) -> Option<QuoteType> {
    if let Some(title) = &attrs.value {
        return Some(QuoteType::Title(decode_entities(title).into_owned()));
    }

    let Some(name) = attrs.get(NAME) else {
        if !attrs.pairs.is_empty() {
            log::debug!("quote attributes without a name: {:?}", attrs.pairs);
        }
        return None;
    };

    let date = attrs
        .get(DATE)
        .map(|d| decode_entities(d).into_owned())
        .filter(|d| !d.is_empty());
    let post_id = attrs.get(POST).and_then(|p| p.trim().parse::<u64>().ok());

    Some(QuoteType::Metadata(QuoteMetadata {
        name: decode_entities(name).into_owned(),
        date,
        post_id,
    }))
}
