//! Cross-checks between the static tables and the request parser.

use panel_data::{parse_panel_body, ReferenceCatalog, Status};

#[test]
fn every_analyte_classifies_its_bounds_as_normal() {
    let catalog = ReferenceCatalog::standard();
    for test in catalog.tests() {
        for gender in ["male", "female"] {
            let request = panel_data::PanelRequest::new(gender, 40);
            let range = test.ranges.for_gender(request.sex()).unwrap();
            assert_eq!(range.classify(range.min), Status::Normal, "{} min", test.code);
            assert_eq!(range.classify(range.max), Status::Normal, "{} max", test.code);
            assert_eq!(range.classify(range.min - 1.0), Status::Low, "{} below", test.code);
            assert_eq!(range.classify(range.max + 1.0), Status::High, "{} above", test.code);
        }
    }
}

#[test]
fn parsed_codes_resolve_against_the_catalog() {
    let body = br#"{"gender":"FEMALE","age":"55","testResults":{"ESR":25,"Unknown":3}}"#;
    let request = parse_panel_body(body).unwrap();
    let catalog = ReferenceCatalog::standard();

    let known: Vec<_> = request
        .test_results
        .iter()
        .filter_map(|(code, _)| catalog.get_test(code))
        .map(|t| t.code)
        .collect();
    assert_eq!(known, vec!["ESR"]);

    let esr = catalog.get_test("ESR").unwrap();
    let range = esr.ranges.for_gender(request.sex()).unwrap();
    assert_eq!(range.to_string(), "0-20");
    assert_eq!(range.classify(25.0), Status::High);
}
