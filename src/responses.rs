//! Response store: one ordinal answer per catalog item.
//!
//! The store validates at the boundary — a value off the scale or an index
//! past the catalog never enters the mapping. A slot that was never
//! recorded is unanswered.

use crate::catalog::{Catalog, LikertScale};
use crate::error::AssessmentError;

/// Mutable per-session mapping from global item index to a scale value.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    scale: LikertScale,
    values: Vec<Option<u8>>,
}

impl ResponseStore {
    /// An empty store with `total_items` slots.
    pub fn new(total_items: usize, scale: LikertScale) -> Self {
        Self {
            scale,
            values: vec![None; total_items],
        }
    }

    /// An empty store sized for `catalog`.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.total_items(), catalog.scale())
    }

    /// Record a response, overwriting any prior one at that index.
    ///
    /// Rejects values off the scale and unknown indices; never clamps.
    pub fn record(&mut self, index: usize, value: u8) -> Result<(), AssessmentError> {
        if !self.scale.contains(value) {
            return Err(AssessmentError::OutOfRangeResponse {
                value,
                min: self.scale.min,
                max: self.scale.max,
            });
        }
        let total = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(AssessmentError::UnknownItem { index, total })?;
        *slot = Some(value);
        Ok(())
    }

    /// The recorded value at `index`, if any.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.values.get(index).copied().flatten()
    }

    /// True iff a response exists at `index`.
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// True iff every slot holds a response.
    pub fn all_answered(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Number of answered slots.
    pub fn answered_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Lowest unanswered index, if any.
    pub fn first_unanswered(&self) -> Option<usize> {
        self.values.iter().position(Option::is_none)
    }

    /// Total number of slots.
    pub fn total_items(&self) -> usize {
        self.values.len()
    }

    /// Remove all responses, returning the store to its initial state.
    pub fn clear(&mut self) {
        self.values.fill(None);
    }
}
