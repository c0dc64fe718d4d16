//! Anonymized response labels
//!
//! Stage-1 responses are presented to the ranking models under neutral
//! `Response A`, `Response B`, ... labels so no model knows which peer wrote
//! which answer. Labels are assigned by position and are stable for the
//! lifetime of one council run.

use crate::core::model::Model;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Upper bound on council size imposed by the single-letter label scheme
pub const MAX_LABELS: usize = 26;

/// Errors from label assignment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    #[error("council produced {needed} responses but the label space holds {MAX_LABELS}")]
    SpaceExhausted { needed: usize },
}

/// Label token for the response at `index`, e.g. `Response A` for 0
///
/// Returns `None` past the single-letter label space.
pub fn label_token(index: usize) -> Option<String> {
    if index < MAX_LABELS {
        Some(format!("Response {}", (b'A' + index as u8) as char))
    } else {
        None
    }
}

/// Ordered mapping from label token to the originating model
///
/// Built once per run immediately after stage 1 and never mutated after.
/// Insertion order is the label order (A first), which downstream code
/// relies on for stable presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    entries: Vec<(String, Model)>,
}

impl LabelMap {
    /// Assign labels to `models` by position
    ///
    /// Fails when the list outgrows the label space; wrapping letters
    /// silently would make rankings ambiguous.
    pub fn assign(models: &[Model]) -> Result<Self, LabelError> {
        if models.len() > MAX_LABELS {
            return Err(LabelError::SpaceExhausted {
                needed: models.len(),
            });
        }
        let entries = models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                // Bounded by the length check above
                let token = label_token(i).unwrap_or_default();
                (token, model.clone())
            })
            .collect();
        Ok(Self { entries })
    }

    /// Resolve a label token back to its model
    pub fn resolve(&self, token: &str) -> Option<&Model> {
        self.entries
            .iter()
            .find(|(label, _)| label == token)
            .map(|(_, model)| model)
    }

    /// Iterate `(label, model)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.entries.iter().map(|(l, m)| (l.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a JSON object so the persisted bundle reads as
// {"Response A": "model-id", ...}. Label order is preserved.
impl Serialize for LabelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, model) in &self.entries {
            map.serialize_entry(label, model)?;
        }
        map.end()
    }
}
