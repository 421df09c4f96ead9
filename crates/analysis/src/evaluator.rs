//! Rule-based range evaluation.
//!
//! Each submitted value is compared with its analyte's reference range and
//! tagged low, normal or high. Out-of-range values carry the catalog's
//! condition and symptom text for that state.

use panel_data::{Gender, PanelRequest, ReferenceCatalog, Status};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

/// Result of evaluating one analyte.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestAnalysis {
    pub name: &'static str,
    pub value: f64,
    pub status: Status,
    pub units: &'static str,
    pub reference_range: String,
    /// Present only for low/high values
    pub condition: Option<&'static str>,
    pub symptoms: Option<&'static str>,
}

/// An out-of-range finding, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbnormalFinding {
    pub test: &'static str,
    /// Value with its unit, e.g. "10 g/dL"
    pub value: String,
    pub status: Status,
    pub range: String,
    pub condition: Option<&'static str>,
    pub symptoms: Option<&'static str>,
}

/// Per-analyte results keyed by test code, in catalog order.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisMap {
    entries: Vec<(String, TestAnalysis)>,
}

impl AnalysisMap {
    pub fn get(&self, code: &str) -> Option<&TestAnalysis> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestAnalysis)> {
        self.entries.iter().map(|(c, a)| (c.as_str(), a))
    }

    /// Entries whose status is low or high.
    pub fn abnormal(&self) -> impl Iterator<Item = (&str, &TestAnalysis)> {
        self.iter().filter(|(_, a)| a.status.is_abnormal())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AnalysisMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, analysis) in &self.entries {
            map.serialize_entry(code, analysis)?;
        }
        map.end()
    }
}

/// Everything the range evaluator derives from one panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelAnalysis {
    pub analysis: AnalysisMap,
    pub abnormalities: Vec<AbnormalFinding>,
}

/// Compares values against the reference catalog.
#[derive(Debug, Clone, Copy)]
pub struct RangeEvaluator<'a> {
    catalog: &'a ReferenceCatalog,
}

impl<'a> RangeEvaluator<'a> {
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self { catalog }
    }

    /// Evaluate a single analyte.
    ///
    /// Returns `None` when the code is unknown, or when the analyte has
    /// only gender-specific ranges and `gender` is not recognised.
    pub fn evaluate(&self, code: &str, value: f64, gender: Option<Gender>) -> Option<TestAnalysis> {
        let Some(test) = self.catalog.get_test(code) else {
            debug!("Skipping unknown test code {:?}", code);
            return None;
        };
        let Some(range) = test.ranges.for_gender(gender) else {
            debug!("No applicable range for {} without a recognised gender", code);
            return None;
        };

        let status = range.classify(value);
        let text = test.state_text(status);

        Some(TestAnalysis {
            name: test.name,
            value,
            status,
            units: test.units,
            reference_range: range.to_string(),
            condition: text.map(|t| t.condition),
            symptoms: text.map(|t| t.symptoms),
        })
    }

    /// Evaluate every supplied test.
    ///
    /// The result is ordered by the catalog, not by submission order.
    pub fn evaluate_panel(&self, request: &PanelRequest) -> PanelAnalysis {
        let gender = request.sex();

        let mut evaluated: Vec<(usize, String, TestAnalysis)> = request
            .test_results
            .iter()
            .filter_map(|(code, value)| {
                let analysis = self.evaluate(code, *value, gender)?;
                let position = self.catalog.test_position(code)?;
                Some((position, code.clone(), analysis))
            })
            .collect();
        evaluated.sort_by_key(|(position, _, _)| *position);

        let abnormalities = evaluated
            .iter()
            .filter(|(_, _, a)| a.status.is_abnormal())
            .map(|(_, _, a)| AbnormalFinding {
                test: a.name,
                value: format!("{} {}", a.value, a.units),
                status: a.status,
                range: a.reference_range.clone(),
                condition: a.condition,
                symptoms: a.symptoms,
            })
            .collect();

        let entries = evaluated
            .into_iter()
            .map(|(_, code, analysis)| (code, analysis))
            .collect();

        PanelAnalysis {
            analysis: AnalysisMap { entries },
            abnormalities,
        }
    }
}
