//! Assessment session: a single-cursor state machine over the catalog's
//! item sequence, with a completeness gate on forward movement and the
//! submission path into the scoring engine.
//!
//! One session per respondent. The session owns its catalog and response
//! store; there is no shared mutable state, so concurrent respondents are
//! isolated by construction.

use crate::catalog::{culture_map, Catalog, LocatedItem};
use crate::error::AssessmentError;
use crate::responses::ResponseStore;
use crate::scoring::{compute_scores, ScoreReport};

/// Snapshot of session progress for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Zero-based cursor position.
    pub position: usize,
    /// Answered item count.
    pub answered: usize,
    /// Total item count.
    pub total: usize,
}

impl Progress {
    /// Position-based completion percentage, `(position + 1) / total * 100`.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.position + 1) as f64 / self.total as f64 * 100.0
    }
}

/// A respondent's pass through a catalog.
#[derive(Debug, Clone)]
pub struct Assessment {
    catalog: Catalog,
    responses: ResponseStore,
    cursor: usize,
}

impl Assessment {
    pub fn new(catalog: Catalog) -> Self {
        let responses = ResponseStore::for_catalog(&catalog);
        Self {
            catalog,
            responses,
            cursor: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Zero-based index of the item under the cursor.
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// The item under the cursor with its dimension.
    pub fn current_item(&self) -> LocatedItem<'_> {
        // The cursor is clamped to [0, total_items) by every transition.
        match self.catalog.locate(self.cursor) {
            Some(located) => located,
            None => unreachable!("cursor is always within the catalog"),
        }
    }

    /// Record a response at an arbitrary item index.
    pub fn record(&mut self, index: usize, value: u8) -> Result<(), AssessmentError> {
        self.responses.record(index, value)
    }

    /// Record a response for the item under the cursor.
    pub fn record_current(&mut self, value: u8) -> Result<(), AssessmentError> {
        self.responses.record(self.cursor, value)
    }

    pub fn response(&self, index: usize) -> Option<u8> {
        self.responses.get(index)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.responses.is_answered(index)
    }

    pub fn all_answered(&self) -> bool {
        self.responses.all_answered()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.cursor,
            answered: self.responses.answered_count(),
            total: self.catalog.total_items(),
        }
    }

    /// Move the cursor forward by one.
    ///
    /// Fails with `IncompleteItem` if the current item is unanswered — the
    /// sole guard; the cursor is unchanged on failure. At the terminal item
    /// a successful advance is a no-op (the caller routes to submission).
    pub fn advance(&mut self) -> Result<(), AssessmentError> {
        if !self.responses.is_answered(self.cursor) {
            return Err(AssessmentError::IncompleteItem { index: self.cursor });
        }
        if self.cursor < self.catalog.total_items() - 1 {
            self.cursor += 1;
        }
        Ok(())
    }

    /// Move the cursor back by one. Never guarded; no-op at the first item.
    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor to an arbitrary item.
    ///
    /// Backward jumps are always permitted. A forward jump keeps the
    /// no-skip guard: every item in `[cursor, index)` must be answered,
    /// otherwise `IncompleteItem` names the first gap and the cursor is
    /// unchanged.
    pub fn jump_to(&mut self, index: usize) -> Result<(), AssessmentError> {
        let total = self.catalog.total_items();
        if index >= total {
            return Err(AssessmentError::UnknownItem { index, total });
        }
        if index > self.cursor {
            for skipped in self.cursor..index {
                if !self.responses.is_answered(skipped) {
                    return Err(AssessmentError::IncompleteItem { index: skipped });
                }
            }
        }
        self.cursor = index;
        Ok(())
    }

    /// Score the completed assessment.
    ///
    /// Requires the current item answered (`IncompleteItem`) and every item
    /// answered (`IncompleteAssessment` naming the first gap) — the latter
    /// is validated explicitly rather than trusted to forward-only
    /// navigation. State is unchanged on failure.
    pub fn submit(&self) -> Result<ScoreReport, AssessmentError> {
        if !self.responses.is_answered(self.cursor) {
            return Err(AssessmentError::IncompleteItem { index: self.cursor });
        }
        if let Some(first_unanswered) = self.responses.first_unanswered() {
            return Err(AssessmentError::IncompleteAssessment { first_unanswered });
        }
        tracing::debug!(
            items = self.catalog.total_items(),
            dimensions = self.catalog.dimensions().len(),
            "scoring submission"
        );
        compute_scores(&self.catalog, &self.responses)
    }

    /// Retake: clear every response and return the cursor to the first item.
    pub fn reset(&mut self) {
        self.responses.clear();
        self.cursor = 0;
    }
}

impl Default for Assessment {
    /// A session over the built-in item bank.
    fn default() -> Self {
        Self::new(culture_map())
    }
}
