//! Plain-text health summary.

use crate::evaluator::AnalysisMap;
use panel_data::{PanelRequest, Status};

const ALL_NORMAL: &str = "All your blood test results are within normal ranges.";
const AGE_NOTE: &str = "\nNote: Some reference ranges may vary slightly for your age group.";
const AGE_NOTE_AFTER: i64 = 50;

/// List every abnormal finding, one per line, plus an age note past 50.
///
/// Only `request.age` is consulted; ranges already reflect gender.
pub fn generate_health_summary(analysis: &AnalysisMap, request: &PanelRequest) -> String {
    let abnormal: Vec<_> = analysis.abnormal().collect();
    let mut lines = Vec::with_capacity(abnormal.len() + 2);

    if abnormal.is_empty() {
        lines.push(ALL_NORMAL.to_string());
    } else {
        lines.push(format!(
            "Your blood test shows {} abnormal value(s):",
            abnormal.len()
        ));
        for (code, result) in abnormal {
            let direction = if result.status == Status::Low { "Low" } else { "High" };
            lines.push(format!(
                "- {} {} ({}, normal range: {})",
                direction, code, result.value, result.reference_range
            ));
        }
    }

    if request.age > AGE_NOTE_AFTER {
        lines.push(AGE_NOTE.to_string());
    }

    lines.join("\n")
}
