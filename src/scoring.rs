//! Scoring engine: reduce a response store against a catalog into
//! per-dimension normalized scores.
//!
//! Reverse-keyed items are reflected through the scale before averaging, so
//! every effective value points the same way as the dimension's high pole.
//! Averages are rounded to one decimal with round-half-to-even
//! (`f64::round_ties_even`): an exact 4.25 average rounds to 4.2, an exact
//! 3.75 to 3.8. The engine is a pure function of `(catalog, responses)` and
//! recomputes from scratch on every call.

use serde::Serialize;

use crate::catalog::{Catalog, LikertScale, Polarity};
use crate::error::AssessmentError;
use crate::responses::ResponseStore;

/// Distance from the scale midpoint at which a score stops being balanced
/// and leans toward a pole (2.5 / 5.5 on the default scale).
pub const LEAN_BAND_HALF_WIDTH: f64 = 1.5;

/// Which pole a normalized score leans toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    /// At or below `midpoint - 1.5`.
    Low,
    /// Strictly between the two thresholds.
    Balanced,
    /// At or above `midpoint + 1.5`.
    High,
}

/// Scored result for one dimension. Derived, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionScore {
    pub dimension: String,
    /// Unrounded mean of effective values.
    pub raw_average: f64,
    /// `raw_average` rounded to one decimal.
    pub score: f64,
    pub low_label: String,
    pub high_label: String,
    pub leaning: Leaning,
}

impl DimensionScore {
    /// Human-readable interpretation for the detail card.
    pub fn description(&self) -> String {
        match self.leaning {
            Leaning::Low => format!("You lean toward: {}", self.low_label),
            Leaning::High => format!("You lean toward: {}", self.high_label),
            Leaning::Balanced => "You are balanced between both approaches".to_string(),
        }
    }
}

/// Ordered scores, one per dimension, in catalog order — never resorted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    scores: Vec<DimensionScore>,
}

impl ScoreReport {
    pub fn scores(&self) -> &[DimensionScore] {
        &self.scores
    }

    pub fn iter(&self) -> impl Iterator<Item = &DimensionScore> {
        self.scores.iter()
    }

    /// Lookup by dimension name.
    pub fn get(&self, dimension: &str) -> Option<&DimensionScore> {
        self.scores.iter().find(|s| s.dimension == dimension)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Polarity-corrected per-item value: raw for `Normal`, reflected through
/// the scale for `Reversed` (`8 - raw` on the default scale).
pub fn effective_value(raw: u8, polarity: Polarity, scale: LikertScale) -> u8 {
    match polarity {
        Polarity::Normal => raw,
        Polarity::Reversed => scale.reflect(raw),
    }
}

fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

fn leaning_for(score: f64, scale: LikertScale) -> Leaning {
    let mid = scale.midpoint();
    if score <= mid - LEAN_BAND_HALF_WIDTH {
        Leaning::Low
    } else if score >= mid + LEAN_BAND_HALF_WIDTH {
        Leaning::High
    } else {
        Leaning::Balanced
    }
}

/// Compute one [`DimensionScore`] per dimension, in catalog order.
///
/// Unanswered items are skipped, so a partially answered dimension still
/// averages over what exists; the submission gate makes that unreachable in
/// normal operation. A dimension with zero answered items is an invariant
/// violation and fails with [`AssessmentError::EmptyDimension`] rather than
/// producing a NaN score.
pub fn compute_scores(
    catalog: &Catalog,
    responses: &ResponseStore,
) -> Result<ScoreReport, AssessmentError> {
    let scale = catalog.scale();
    let mut scores = Vec::with_capacity(catalog.dimensions().len());
    let mut global = 0usize;

    for dimension in catalog.dimensions() {
        let mut sum = 0u32;
        let mut answered = 0u32;
        for item in &dimension.items {
            if let Some(raw) = responses.get(global) {
                sum += u32::from(effective_value(raw, item.polarity, scale));
                answered += 1;
            }
            global += 1;
        }

        if answered == 0 {
            tracing::error!(
                dimension = %dimension.name,
                "dimension reached scoring with no answered items"
            );
            return Err(AssessmentError::EmptyDimension {
                dimension: dimension.name.clone(),
            });
        }

        let raw_average = f64::from(sum) / f64::from(answered);
        let score = round_to_tenth(raw_average);
        scores.push(DimensionScore {
            dimension: dimension.name.clone(),
            raw_average,
            score,
            low_label: dimension.low_label.clone(),
            high_label: dimension.high_label.clone(),
            leaning: leaning_for(score, scale),
        });
    }

    Ok(ScoreReport { scores })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{culture_map, Dimension, Item};

    fn single_dimension(items: Vec<Item>) -> Catalog {
        let dims = vec![Dimension::new("Only", "Low", "High", items)];
        Catalog::new(1, LikertScale::default(), dims).unwrap()
    }

    fn answered(catalog: &Catalog, values: &[u8]) -> ResponseStore {
        let mut store = ResponseStore::for_catalog(catalog);
        for (i, v) in values.iter().enumerate() {
            store.record(i, *v).unwrap();
        }
        store
    }

    #[test]
    fn reversal_law() {
        let scale = LikertScale::default();
        assert_eq!(effective_value(1, Polarity::Reversed, scale), 7);
        assert_eq!(effective_value(7, Polarity::Reversed, scale), 1);
        // Midpoint is a fixed point.
        assert_eq!(effective_value(4, Polarity::Reversed, scale), 4);
        for r in 1..=7 {
            assert_eq!(effective_value(r, Polarity::Normal, scale), r);
        }
    }

    #[test]
    fn trusting_dimension_walkthrough() {
        // Polarities [Normal, Reversed, Reversed], responses [2, 6, 3]:
        // effective [2, 2, 5], average 3.0, balanced band.
        let catalog = single_dimension(vec![
            Item::normal("a"),
            Item::reversed("b"),
            Item::reversed("c"),
        ]);
        let store = answered(&catalog, &[2, 6, 3]);
        let report = compute_scores(&catalog, &store).unwrap();
        let s = &report.scores()[0];
        assert_eq!(s.raw_average, 3.0);
        assert_eq!(s.score, 3.0);
        assert_eq!(s.leaning, Leaning::Balanced);
    }

    #[test]
    fn rounds_repeating_average_to_one_decimal() {
        // (4 + 4 + 5) / 3 = 4.333...
        let catalog = single_dimension(vec![
            Item::normal("a"),
            Item::normal("b"),
            Item::normal("c"),
        ]);
        let report = compute_scores(&catalog, &answered(&catalog, &[4, 4, 5])).unwrap();
        assert_eq!(report.scores()[0].score, 4.3);
    }

    #[test]
    fn rounds_exact_ties_to_even() {
        // Four items so the average lands exactly on .x5 boundaries.
        let catalog = single_dimension(vec![
            Item::normal("a"),
            Item::normal("b"),
            Item::normal("c"),
            Item::normal("d"),
        ]);

        // 17 / 4 = 4.25 -> 4.2 (42.5 ties to even 42).
        let report = compute_scores(&catalog, &answered(&catalog, &[4, 4, 4, 5])).unwrap();
        assert_eq!(report.scores()[0].score, 4.2);

        // 15 / 4 = 3.75 -> 3.8 (37.5 ties to even 38).
        let report = compute_scores(&catalog, &answered(&catalog, &[3, 4, 4, 4])).unwrap();
        assert_eq!(report.scores()[0].score, 3.8);
    }

    #[test]
    fn compute_scores_is_idempotent() {
        let catalog = culture_map();
        let mut store = ResponseStore::for_catalog(&catalog);
        for i in 0..catalog.total_items() {
            store.record(i, ((i % 7) + 1) as u8).unwrap();
        }
        let first = compute_scores(&catalog, &store).unwrap();
        let second = compute_scores(&catalog, &store).unwrap();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.dimension, b.dimension);
            assert_eq!(a.raw_average, b.raw_average);
            assert_eq!(a.score, b.score);
            assert_eq!(a.leaning, b.leaning);
        }
    }

    #[test]
    fn report_preserves_catalog_order() {
        let catalog = culture_map();
        let mut store = ResponseStore::for_catalog(&catalog);
        for i in 0..catalog.total_items() {
            // Descending values would resort a score-ordered report.
            store.record(i, 7 - (i % 7) as u8).unwrap();
        }
        let report = compute_scores(&catalog, &store).unwrap();
        assert_eq!(report.len(), catalog.dimensions().len());
        for (scored, dim) in report.iter().zip(catalog.dimensions()) {
            assert_eq!(scored.dimension, dim.name);
        }
    }

    #[test]
    fn reversal_changes_outcome_versus_all_normal() {
        // All responses 1 in a mixed-polarity dimension must not score 1.0.
        let catalog = single_dimension(vec![
            Item::normal("a"),
            Item::reversed("b"),
            Item::reversed("c"),
        ]);
        let report = compute_scores(&catalog, &answered(&catalog, &[1, 1, 1])).unwrap();
        // effective [1, 7, 7] -> 5.0
        assert_eq!(report.scores()[0].score, 5.0);

        let all_normal = single_dimension(vec![
            Item::normal("a"),
            Item::normal("b"),
            Item::normal("c"),
        ]);
        let plain = compute_scores(&all_normal, &answered(&all_normal, &[1, 1, 1])).unwrap();
        assert_eq!(plain.scores()[0].score, 1.0);
    }

    #[test]
    fn tolerates_partial_dimensions() {
        let catalog = single_dimension(vec![
            Item::normal("a"),
            Item::normal("b"),
            Item::normal("c"),
        ]);
        let mut store = ResponseStore::for_catalog(&catalog);
        store.record(0, 2).unwrap();
        store.record(2, 6).unwrap();
        let report = compute_scores(&catalog, &store).unwrap();
        assert_eq!(report.scores()[0].raw_average, 4.0);
    }

    #[test]
    fn empty_dimension_fails_loudly() {
        let catalog = culture_map();
        let store = ResponseStore::for_catalog(&catalog);
        let err = compute_scores(&catalog, &store).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::EmptyDimension {
                dimension: "Communicating".to_string()
            }
        );
    }

    #[test]
    fn leaning_bands_are_inclusive_at_thresholds() {
        let scale = LikertScale::default();
        assert_eq!(leaning_for(2.5, scale), Leaning::Low);
        assert_eq!(leaning_for(2.6, scale), Leaning::Balanced);
        assert_eq!(leaning_for(5.4, scale), Leaning::Balanced);
        assert_eq!(leaning_for(5.5, scale), Leaning::High);
    }

    #[test]
    fn description_names_the_pole() {
        let catalog = single_dimension(vec![Item::normal("a")]);
        let report = compute_scores(&catalog, &answered(&catalog, &[7])).unwrap();
        assert_eq!(report.scores()[0].description(), "You lean toward: High");

        let report = compute_scores(&catalog, &answered(&catalog, &[1])).unwrap();
        assert_eq!(report.scores()[0].description(), "You lean toward: Low");

        let report = compute_scores(&catalog, &answered(&catalog, &[4])).unwrap();
        assert_eq!(
            report.scores()[0].description(),
            "You are balanced between both approaches"
        );
    }
}
