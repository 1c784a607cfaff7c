//! End-to-end tests over the library pipeline and the HTTP surface.

use ats_analyzer::config::Config;
use ats_analyzer::scoring::category::{CategoryKey, MatchLabel};
use ats_analyzer::scoring::engine::{AnalysisSettings, ScoringEngine};
use ats_analyzer::server::{build_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

const RESUME: &str = include_str!("fixtures/sample_resume.txt");
const JD: &str = include_str!("fixtures/sample_jd.txt");

const BOUNDARY: &str = "test-boundary-7f3a";

fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn analyze_request(fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields)))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    build_router(AppState::new(Config::default()))
}

#[test]
fn test_pipeline_scores_strong_fixture_pair() {
    let engine = ScoringEngine::new(Config::default());
    let result = engine.analyze(RESUME, JD, AnalysisSettings::default()).unwrap();

    assert!(result.overall_score >= 50.0, "score was {}", result.overall_score);
    assert_ne!(result.label, MatchLabel::WeakMatch);
    assert_eq!(result.categories.len(), 8);
    // the fixture resume holds the exact target title
    assert_eq!(result.categories[&CategoryKey::RoleMatch].score, 95.0);
    assert_eq!(result.categories[&CategoryKey::SeniorityMatch].score, 100.0);
    // only "bachelor" of the JD's credential terms appears on the resume
    let education = result.categories[&CategoryKey::EducationMatch].score;
    assert!(education > 0.0 && education < 100.0, "score was {}", education);
}

#[test]
fn test_pipeline_is_deterministic_across_runs() {
    let engine = ScoringEngine::new(Config::default());
    let a = engine.analyze(RESUME, JD, AnalysisSettings::default()).unwrap();
    let b = engine.analyze(RESUME, JD, AnalysisSettings::default()).unwrap();

    assert_eq!(a.overall_score, b.overall_score);
    assert_eq!(a.categories, b.categories);
    assert_eq!(a.red_flags, b.red_flags);
    assert_eq!(a.actions, b.actions);
}

#[test]
fn test_strict_mode_is_monotonic_on_fixture_pair() {
    let engine = ScoringEngine::new(Config::default());
    let relaxed = engine.analyze(RESUME, JD, AnalysisSettings::default()).unwrap();
    let strict = engine
        .analyze(
            RESUME,
            JD,
            AnalysisSettings {
                strict_mode: true,
                ..AnalysisSettings::default()
            },
        )
        .unwrap();
    assert!(strict.overall_score <= relaxed.overall_score);
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_analyze_and_fetch_reports() {
    let app = app();

    let response = app
        .clone()
        .oneshot(analyze_request(&[("jd_text", JD), ("resume_text", RESUME)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let id = json["analysis_id"].as_str().unwrap().to_string();
    assert!(json["result"]["overall_score"].is_number());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/report/{id}/json"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["categories"].as_object().map(|o| o.len()), Some(8));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/report/{id}/markdown"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["analysis_id"].as_str(), Some(id.as_str()));
    let markdown = json["markdown"].as_str().unwrap();
    assert!(markdown.starts_with("# ATS Match Report"));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/report/{id}/pdf"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_analyze_requires_jd_text() {
    let response = app()
        .oneshot(analyze_request(&[("resume_text", RESUME)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INPUT_ERROR");
}

#[tokio::test]
async fn test_analyze_requires_some_resume_input() {
    let response = app()
        .oneshot(analyze_request(&[("jd_text", JD)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_settings_fall_back_to_defaults() {
    let response = app()
        .oneshot(analyze_request(&[
            ("jd_text", JD),
            ("resume_text", RESUME),
            ("settings", "{not json"),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_settings_are_honoured() {
    let app = app();
    let relaxed = app
        .clone()
        .oneshot(analyze_request(&[("jd_text", JD), ("resume_text", RESUME)]))
        .await
        .unwrap();
    let strict = app
        .oneshot(analyze_request(&[
            ("jd_text", JD),
            ("resume_text", RESUME),
            ("settings", r#"{"strict_mode": true}"#),
        ]))
        .await
        .unwrap();

    let relaxed_score = body_json(relaxed).await["result"]["overall_score"]
        .as_f64()
        .unwrap();
    let strict_json = body_json(strict).await;
    assert_eq!(strict_json["result"]["metadata"]["settings_used"]["strict_mode"], true);
    let strict_score = strict_json["result"]["overall_score"].as_f64().unwrap();
    assert!(strict_score <= relaxed_score);
}

#[tokio::test]
async fn test_unknown_report_id_is_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/report/does-not-exist/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_default_weights_endpoint() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/admin/weights")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let weights = json["weights"].as_object().unwrap();
    assert_eq!(weights.len(), 8);
    let sum: f64 = weights.values().map(|v| v.as_f64().unwrap()).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}
