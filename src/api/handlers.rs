//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{analyze_files, AnalysisOptions, AnalysisReport};
use crate::report::QuickNarrative;

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Insight API Server".to_string(),
        version: state.version.clone(),
        description: "HTTP API for estimate vs actual spending analysis".to_string(),
        endpoints: vec![
            EndpointInfo {
                path: "/health".to_string(),
                method: "GET".to_string(),
                description: "Health check endpoint".to_string(),
            },
            EndpointInfo {
                path: "/version".to_string(),
                method: "GET".to_string(),
                description: "Get server version".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/analyze".to_string(),
                method: "POST".to_string(),
                description: "Analyze estimate vs actual workbooks".to_string(),
            },
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        service: "Estimate Insight".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec!["analyze".to_string()],
    }))
}

/// Analyze request
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub estimate_path: String,
    pub actual_path: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub sheet: Option<String>,
}

/// POST /api/v1/analyze - Analyze estimate vs actual workbooks
pub async fn analyze(Json(req): Json<AnalyzeRequest>) -> impl IntoResponse {
    let options = AnalysisOptions {
        project_name: req
            .project_name
            .unwrap_or_else(|| "Unnamed Project".to_string()),
        sheet: req.sheet,
    };

    match analyze_files(
        Path::new(&req.estimate_path),
        Path::new(&req.actual_path),
        &options,
        &QuickNarrative,
    ) {
        Ok(report) => Json(ApiResponse::ok(report)),
        Err(e) => Json(ApiResponse::<AnalysisReport>::err(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_ok_creates_success_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());

        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        // Verify UUID format (8-4-4-4-12)
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err_creates_error_response() {
        let response: ApiResponse<String> = ApiResponse::err("Something went wrong");

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("Something went wrong".to_string()));
    }

    #[test]
    fn test_api_response_request_id_is_unique() {
        let response1: ApiResponse<String> = ApiResponse::ok("a".to_string());
        let response2: ApiResponse<String> = ApiResponse::ok("b".to_string());

        assert_ne!(response1.request_id, response2.request_id);
    }

    #[test]
    fn test_api_response_serializes_without_none_fields() {
        let response: ApiResponse<String> = ApiResponse::ok("data".to_string());
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"success\":true"));
    }

    #[test]
    fn test_analyze_request_deserialize() {
        let json = r#"{"estimate_path": "estimate.xlsx", "actual_path": "actual.xlsx"}"#;
        let req: AnalyzeRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.estimate_path, "estimate.xlsx");
        assert_eq!(req.actual_path, "actual.xlsx");
        assert!(req.project_name.is_none());
        assert!(req.sheet.is_none());
    }

    #[test]
    fn test_analyze_request_deserialize_with_options() {
        let json = r#"{
            "estimate_path": "e.xlsx",
            "actual_path": "a.xlsx",
            "project_name": "Warehouse",
            "sheet": "Q3"
        }"#;
        let req: AnalyzeRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.project_name.as_deref(), Some("Warehouse"));
        assert_eq!(req.sheet.as_deref(), Some("Q3"));
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            service: "Estimate Insight".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"service\":\"Estimate Insight\""));
    }
}
