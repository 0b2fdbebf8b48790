//! CSV export of a score report.
//!
//! One row per dimension in report order, header `Dimension,Score,Scale`.
//! The score column always carries exactly one decimal digit (`4.0`, not
//! `4`), so downstream spreadsheets see a uniform column.

use crate::error::AssessmentError;
use crate::scoring::ScoreReport;

/// Render a report as a CSV document.
pub fn to_csv(report: &ScoreReport) -> Result<String, AssessmentError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Dimension", "Score", "Scale"])
        .map_err(|e| AssessmentError::export(e.to_string()))?;

    for score in report.iter() {
        let score_text = format!("{:.1}", score.score);
        let scale_text = format!("{} ↔ {}", score.low_label, score.high_label);
        writer
            .write_record([score.dimension.as_str(), score_text.as_str(), scale_text.as_str()])
            .map_err(|e| AssessmentError::export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AssessmentError::export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AssessmentError::export(e.to_string()))
}
