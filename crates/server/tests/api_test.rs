//! In-process HTTP tests against the demo artifact set.

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::{build_router, AppState, ReportOrchestrator, ServerConfig};

fn app() -> Router {
    let config = ServerConfig {
        artifacts_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts/demo"),
        ..ServerConfig::default()
    };
    let orchestrator = ReportOrchestrator::from_config(&config);
    assert!(orchestrator.model_loaded());
    build_router(AppState::new(orchestrator))
}

async fn analyze(payload: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn low_hemoglobin_report() {
    let (status, body) = analyze(json!({
        "gender": "male",
        "age": 30,
        "testResults": {"Hemoglobin": 10}
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gender"], "male");
    assert_eq!(body["age"], 30);

    let hb = &body["analysis"]["Hemoglobin"];
    assert_eq!(hb["status"], "low");
    assert_eq!(hb["reference_range"], "13.5-17.5");
    assert!(hb["condition"].as_str().unwrap().starts_with("Anemia"));

    let predictions = body["ml_predictions"].as_object().unwrap();
    assert_eq!(predictions.len(), 1);
    assert!(predictions["Anemia"].as_f64().unwrap() > 90.0);

    assert_eq!(body["recommendations"][0]["title"], "For Anemia");
    assert_eq!(body["abnormalities"][0]["test"], "Hemoglobin");
    assert!(body["summary"].as_str().unwrap().starts_with("Your blood test shows 1 abnormal value(s):"));
}

#[tokio::test]
async fn normal_panel_report() {
    let (status, body) = analyze(json!({
        "gender": "female",
        "age": 40,
        "testResults": {"Hemoglobin": 13.8, "WBC": 6.0, "MCV": 90}
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ml_predictions"], json!({"Normal": 100}));
    assert_eq!(body["recommendations"][0]["title"], "General Health");
    assert_eq!(body["abnormalities"], json!([]));
    assert_eq!(
        body["summary"],
        "All your blood test results are within normal ranges."
    );
}

#[tokio::test]
async fn unknown_tests_are_ignored() {
    let (status, body) = analyze(json!({
        "gender": "male",
        "age": 30,
        "testResults": {"Cholesterol": 250, "PLT": 200}
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let analysis = body["analysis"].as_object().unwrap();
    assert_eq!(analysis.len(), 1);
    assert!(analysis.contains_key("PLT"));
}

#[tokio::test]
async fn null_values_skip_analysis_but_reach_the_model() {
    let (status, body) = analyze(json!({
        "gender": "male",
        "age": 30,
        "testResults": {"Hemoglobin": 10, "MCV": null}
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let analysis = body["analysis"].as_object().unwrap();
    assert_eq!(analysis.len(), 1);
    assert!(!analysis.contains_key("MCV"));
    let predictions = body["ml_predictions"].as_object().unwrap();
    assert_eq!(predictions.keys().collect::<Vec<_>>(), vec!["Anemia"]);
}

#[tokio::test]
async fn missing_fields_rejected() {
    for payload in [
        json!({"age": 30, "testResults": {}}),
        json!({"gender": "male", "testResults": {}}),
        json!({"gender": "male", "age": 30}),
    ] {
        let (status, body) = analyze(payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }
}

#[tokio::test]
async fn non_numeric_value_rejected() {
    let (status, body) = analyze(json!({
        "gender": "male",
        "age": 30,
        "testResults": {"Hemoglobin": "ten"}
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Hemoglobin"));
}

#[tokio::test]
async fn health_reports_model() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok", "model_loaded": true}));
}
