//! Integration tests for the analysis stages.
//!
//! These tests run the evaluator, recommendation generator and summary
//! together on realistic panels.

use analysis::{generate_health_summary, generate_recommendations, RangeEvaluator};
use panel_data::{PanelRequest, ReferenceCatalog, Status};

fn catalog() -> &'static ReferenceCatalog {
    ReferenceCatalog::standard()
}

fn anemic_panel() -> PanelRequest {
    PanelRequest::new("male", 30).with_result("Hemoglobin", 10.0)
}

#[test]
fn test_documented_anemia_example() {
    let request = anemic_panel();
    let panel = RangeEvaluator::new(catalog()).evaluate_panel(&request);

    let hb = panel.analysis.get("Hemoglobin").unwrap();
    assert_eq!(hb.status, Status::Low);
    assert_eq!(
        hb.condition,
        Some("Anemia, Blood loss, Chronic disease, Nutritional deficiency, Bone marrow disorder, Kidney disease")
    );
    assert_eq!(
        hb.symptoms,
        Some("Fatigue, Weakness, Pale skin, Shortness of breath, Dizziness")
    );
    assert_eq!(panel.abnormalities.len(), 1);
    assert_eq!(panel.abnormalities[0].value, "10 g/dL");
}

#[test]
fn test_boundaries_for_every_analyte() {
    let evaluator = RangeEvaluator::new(catalog());
    for gender in ["male", "female"] {
        let sex = PanelRequest::new(gender, 40).sex();
        for test in catalog().tests() {
            let range = test.ranges.for_gender(sex).unwrap();
            let at = |v: f64| evaluator.evaluate(test.code, v, sex).unwrap().status;
            assert_eq!(at(range.min), Status::Normal, "{} at min", test.code);
            assert_eq!(at(range.max), Status::Normal, "{} at max", test.code);
            assert_eq!(at(range.min - 1.0), Status::Low, "{} below min", test.code);
            assert_eq!(at(range.max + 1.0), Status::High, "{} above max", test.code);
        }
    }
}

#[test]
fn test_full_report_text() {
    let request = PanelRequest::new("female", 64)
        .with_result("Hemoglobin", 11.0)
        .with_result("MCV", 72.0)
        .with_result("WBC", 7.0);
    let panel = RangeEvaluator::new(catalog()).evaluate_panel(&request);

    let summary = generate_health_summary(&panel.analysis, &request);
    assert!(summary.starts_with("Your blood test shows 2 abnormal value(s):"));
    assert!(summary.contains("- Low Hemoglobin (11, normal range: 12.0-15.5)"));
    assert!(summary.contains("- Low MCV (72, normal range: 80-100)"));
    assert!(summary.ends_with("Note: Some reference ranges may vary slightly for your age group."));

    let recs = generate_recommendations(catalog(), [("Anemia", 96.0), ("Iron deficiency anemia", 97.5)]);
    let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["For Anemia", "For Iron Deficiency Anemia"]);
}

#[test]
fn test_analysis_serializes_as_object() {
    let request = anemic_panel().with_result("PLT", 300.0);
    let panel = RangeEvaluator::new(catalog()).evaluate_panel(&request);
    let json = serde_json::to_value(&panel.analysis).unwrap();

    assert_eq!(json["Hemoglobin"]["status"], "low");
    assert_eq!(json["Hemoglobin"]["reference_range"], "13.5-17.5");
    assert_eq!(json["PLT"]["status"], "normal");
    assert!(json["PLT"]["condition"].is_null());
}
