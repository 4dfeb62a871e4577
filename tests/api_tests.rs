//! API handler tests
//!
//! Exercises the handlers directly (no network) plus the response envelope.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use estimate_insight::api::handlers::{self, AnalyzeRequest, ApiResponse};
use estimate_insight::api::server::AppState;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_workbook(dir: &Path, name: &str, rows: &[(&str, f64)]) -> String {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "Category").unwrap();
    worksheet.write_string(0, 1, "Amount").unwrap();
    for (i, (category, amount)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, *category).unwrap();
        worksheet.write_number(row, 1, *amount).unwrap();
    }

    workbook.save(&path).unwrap();
    path.to_string_lossy().into_owned()
}

fn state() -> State<Arc<AppState>> {
    State(Arc::new(AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[tokio::test]
async fn test_health_returns_ok() {
    let response = handlers::health().await.into_response();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

#[tokio::test]
async fn test_root_and_version_return_ok() {
    let response = handlers::root(state()).await.into_response();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let response = handlers::version(state()).await.into_response();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_handler_with_real_workbooks() {
    let dir = TempDir::new().unwrap();
    let estimate = write_workbook(dir.path(), "estimate.xlsx", &[("Labor", 100.0)]);
    let actual = write_workbook(dir.path(), "actual.xlsx", &[("Labor", 110.0)]);

    let request = AnalyzeRequest {
        estimate_path: estimate,
        actual_path: actual,
        project_name: Some("API Test".to_string()),
        sheet: None,
    };

    let response = handlers::analyze(Json(request)).await.into_response();
    // The envelope always returns 200; failure is carried in the body.
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_handler_with_missing_files_still_envelopes() {
    let request = AnalyzeRequest {
        estimate_path: "missing_e.xlsx".to_string(),
        actual_path: "missing_a.xlsx".to_string(),
        project_name: None,
        sheet: None,
    };

    let response = handlers::analyze(Json(request)).await.into_response();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

#[test]
fn test_api_response_envelope_serialization() {
    let ok: ApiResponse<u32> = ApiResponse::ok(7);
    let json = serde_json::to_string(&ok).unwrap();
    assert!(json.contains("\"success\":true"));
    assert!(json.contains("\"data\":7"));
    assert!(!json.contains("\"error\""));

    let err: ApiResponse<u32> = ApiResponse::err("boom");
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("\"success\":false"));
    assert!(json.contains("\"error\":\"boom\""));
    assert!(!json.contains("\"data\""));
}
