//! Error types for the assessment engine.

use thiserror::Error;

/// Errors surfaced by catalog construction, response recording, navigation,
/// scoring, and export.
///
/// Navigation errors (`IncompleteItem`, `IncompleteAssessment`) are
/// recoverable: state is unchanged and the caller is expected to prompt the
/// respondent and retry. `EmptyDimension` is an internal invariant violation
/// that the submission gate makes unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// A response value outside the catalog's scale. Rejected before
    /// storage, never clamped.
    #[error("response {value} is outside the {min}..={max} scale")]
    OutOfRangeResponse { value: u8, min: u8, max: u8 },

    /// A global item index past the end of the catalog.
    #[error("item index {index} is out of range (catalog has {total} items)")]
    UnknownItem { index: usize, total: usize },

    /// Forward navigation or submission attempted while the item at `index`
    /// is unanswered.
    #[error("item {index} has not been answered")]
    IncompleteItem { index: usize },

    /// Submission attempted while an earlier item is unanswered.
    #[error("assessment is incomplete: item {first_unanswered} has no response")]
    IncompleteAssessment { first_unanswered: usize },

    /// A dimension reached scoring with zero answered items.
    #[error("dimension '{dimension}' has no answered items")]
    EmptyDimension { dimension: String },

    /// A catalog failed structural validation.
    #[error("invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// A catalog document could not be parsed.
    #[error("catalog parse error: {message}")]
    Parse { message: String },

    /// CSV export failed.
    #[error("export error: {message}")]
    Export { message: String },
}

impl AssessmentError {
    /// Create an invalid-catalog error.
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Whether the respondent can recover by answering and retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::OutOfRangeResponse { .. }
                | Self::IncompleteItem { .. }
                | Self::IncompleteAssessment { .. }
        )
    }

    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfRangeResponse { .. } => "out_of_range_response",
            Self::UnknownItem { .. } => "unknown_item",
            Self::IncompleteItem { .. } => "incomplete_item",
            Self::IncompleteAssessment { .. } => "incomplete_assessment",
            Self::EmptyDimension { .. } => "empty_dimension",
            Self::InvalidCatalog { .. } => "invalid_catalog",
            Self::Parse { .. } => "parse_error",
            Self::Export { .. } => "export_error",
        }
    }
}
