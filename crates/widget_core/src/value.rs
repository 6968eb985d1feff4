//! Values exchanged with the owning form

use crate::EncodedFile;
use serde::{Deserialize, Serialize};

/// Initial value supplied by the form: one blob or a (possibly sparse) list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<Option<String>>),
}

impl FieldValue {
    /// Normalize to a sequence of slots
    pub fn into_slots(self) -> Vec<Option<String>> {
        match self {
            FieldValue::Single(blob) => vec![Some(blob)],
            FieldValue::Multiple(slots) => slots,
        }
    }
}

impl From<String> for FieldValue {
    fn from(blob: String) -> Self {
        FieldValue::Single(blob)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(blobs: Vec<String>) -> Self {
        FieldValue::Multiple(blobs.into_iter().map(Some).collect())
    }
}

/// Value reported to the owner after a successful selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChangeValue {
    /// Single-file mode: the first encoded file, if any was selected
    Single(Option<EncodedFile>),
    /// Multi-file mode: every encoded file, in selection order
    Multiple(Vec<EncodedFile>),
}

impl ChangeValue {
    pub(crate) fn from_selection(values: &[EncodedFile], multiple: bool) -> Self {
        if multiple {
            ChangeValue::Multiple(values.to_vec())
        } else {
            ChangeValue::Single(values.first().cloned())
        }
    }
}
