//! Anonymous response labels for peer ranking.
//!
//! Labels are assigned purely by position in the stage-1 result sequence:
//! the first answer is `Response A`, the second `Response B`, and so on.
//! The same [`LabelMap`] is used to build the ranking prompt and to resolve
//! parsed rankings back to models during aggregation.

use super::value_objects::Stage1Result;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of single-letter labels available (`A` through `Z`).
pub const MAX_LABELS: usize = 26;

/// Letter for the response at `index`, or `None` past `Z`.
pub fn label_letter(index: usize) -> Option<char> {
    if index < MAX_LABELS {
        Some((b'A' + index as u8) as char)
    } else {
        None
    }
}

/// Full label string (`"Response C"`) for the response at `index`.
pub fn response_label(index: usize) -> Option<String> {
    label_letter(index).map(|letter| format!("Response {}", letter))
}

/// Mapping from `"Response <Label>"` to the model that wrote it
///
/// Keys sort alphabetically, which for single letters is also assignment
/// order, so iteration follows the stage-1 sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap(BTreeMap<String, Model>);

impl LabelMap {
    /// Assign labels to stage-1 results in order.
    ///
    /// Results past the 26th have no label and are left out of the map.
    pub fn from_responses(responses: &[Stage1Result]) -> Self {
        let map = responses
            .iter()
            .enumerate()
            .filter_map(|(i, r)| response_label(i).map(|label| (label, r.model.clone())))
            .collect();
        Self(map)
    }

    /// Resolve a label back to its model.
    pub fn resolve(&self, label: &str) -> Option<&Model> {
        self.0.get(label)
    }

    /// Iterate `(label, model)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.0.iter().map(|(label, model)| (label.as_str(), model))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
