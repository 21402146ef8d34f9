//! # Write Forms
//!
//! Serialization of structured write-form input (new topic templates, post
//! forms with pickers) into the urlencoded payload the forum accepts.
//!
//! The forum decodes form bodies with its legacy code page. Values are
//! encoded there first; characters the code page cannot represent become
//! numeric character references, which the forum renders back as the
//! original characters.

use std::collections::{BTreeSet, HashMap};

use encoding_rs::Encoding;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};
use thiserror::Error;

/// Bytes kept as-is in `application/x-www-form-urlencoded` output.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Shape of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Dropdown,
    Uploads,
    Checkboxes,
}

/// A value entered into a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Index of the selected option.
    Dropdown(usize),
    /// Attachment ids, in upload order.
    Uploads(Vec<u64>),
    /// Indices of the checked boxes.
    Checkboxes(BTreeSet<usize>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Dropdown(_) => FieldKind::Dropdown,
            FieldValue::Uploads(_) => FieldKind::Uploads,
            FieldValue::Checkboxes(_) => FieldKind::Checkboxes,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Field {field} expects a {expected:?} value, got {actual:?}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("Field {0} is not part of the form")]
    UnknownField(String),
}

/// Collects field values and writes them as a urlencoded form body.
///
/// Fields are written in the order they were first set. Without a schema any
/// field id is accepted.
#[derive(Debug, Clone)]
pub struct FormSerializer {
    encoding: &'static Encoding,
    schema: Option<HashMap<String, FieldKind>>,
    fields: Vec<(String, FieldValue)>,
}

impl Default for FormSerializer {
    fn default() -> Self {
        Self::new(encoding_rs::WINDOWS_1251)
    }
}

impl FormSerializer {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            schema: None,
            fields: Vec::new(),
        }
    }

    /// Restricts the form to the given fields and kinds.
    pub fn with_schema(mut self, schema: HashMap<String, FieldKind>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Sets `field`, replacing any earlier value.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<(), FormError> {
        if let Some(schema) = &self.schema {
            let expected = *schema
                .get(field)
                .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
            if expected != value.kind() {
                return Err(FormError::KindMismatch {
                    field: field.to_string(),
                    expected,
                    actual: value.kind(),
                });
            }
        }

        match self.fields.iter_mut().find(|(id, _)| id == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field.to_string(), value)),
        }
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(id, _)| id == field).map(|(_, v)| v)
    }

    /// Writes the `application/x-www-form-urlencoded` body.
    ///
    /// - text: `id=value`
    /// - dropdown: `id=index`
    /// - uploads: `id=1,2,3`
    /// - checkboxes: one `id[]=index` pair per checked box
    pub fn serialize(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        for (id, value) in &self.fields {
            let key = self.encode(id);
            match value {
                FieldValue::Text(text) => pairs.push(format!("{key}={}", self.encode(text))),
                FieldValue::Dropdown(index) => pairs.push(format!("{key}={index}")),
                FieldValue::Uploads(ids) => {
                    let joined = ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",");
                    pairs.push(format!("{key}={}", self.encode(&joined)));
                }
                FieldValue::Checkboxes(checked) => {
                    let key = self.encode(&format!("{id}[]"));
                    pairs.extend(checked.iter().map(|index| format!("{key}={index}")));
                }
            }
        }
        pairs.join("&")
    }

    fn encode(&self, value: &str) -> String {
        let (bytes, _, had_unmappable) = self.encoding.encode(value);
        if had_unmappable {
            log::debug!("form value has characters outside {}", self.encoding.name());
        }
        percent_encode(&bytes, FORM_VALUE).to_string().replace("%20", "+")
    }
}
