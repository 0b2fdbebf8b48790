#![forbid(unsafe_code)]

//! # culture-compass
//!
//! A self-assessment engine for bipolar trait scales.
//!
//! A [`Catalog`] is a versioned item bank: ordered dimensions, each with a
//! low/high pole pair and a handful of Likert items carrying an explicit
//! [`Polarity`]. An [`Assessment`] session walks the flattened item
//! sequence behind a completeness gate (no skipping an unanswered item
//! forward; backing up is always free), and submission reduces the
//! responses into one direction-aware, normalized score per dimension.
//! Reverse-keyed items are reflected through the scale before averaging, so
//! agreement always counts toward the pole the item actually measures.
//!
//! The scoring path ([`compute_scores`]) is a pure function of
//! `(catalog, responses)` — stateless, idempotent, and safe to share across
//! sessions. Rendering is left to the caller; [`to_csv`] and the
//! serializable [`ScoreReport`] are the hand-off points.

pub mod catalog;
pub mod error;
pub mod export;
pub mod responses;
pub mod scoring;
pub mod session;

pub use catalog::{
    culture_map, Catalog, CatalogSpec, Dimension, Item, LikertScale, LocatedItem, Polarity,
};
pub use error::AssessmentError;
pub use export::to_csv;
pub use responses::ResponseStore;
pub use scoring::{compute_scores, DimensionScore, Leaning, ScoreReport};
pub use session::{Assessment, Progress};
