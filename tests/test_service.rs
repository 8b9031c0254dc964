//! Tests for the HTTP service

use axum::body::Body;
use axum::http::{Request, StatusCode};
use roughcut::pipeline::{AnalysisOptions, LoadOptions};
use roughcut::service::{router, AppState};
use serde_json::Value;
use tower::ServiceExt;

#[path = "common/mod.rs"]
mod common;

use common::*;

const BOUNDARY: &str = "roughcut-test-boundary";

fn app() -> axum::Router {
    router(AppState::new(LoadOptions::default(), AnalysisOptions::default()))
}

/// Build a multipart body from (name, filename, content) parts
fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: text/csv\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn post_process(body: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/process")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_process_qualitative() {
    let csv = flu_csv();
    let body = multipart_body(&[
        ("method", None, b"qualitative".as_slice()),
        ("file", Some("flu.csv"), csv.as_bytes()),
    ]);

    let (status, json) = post_process(body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("error").is_none(), "Unexpected error: {}", json);
    assert_eq!(json["steps"].as_array().unwrap().len(), 5);
    assert_eq!(json["result"]["summary"]["removed_count"], 2);
    assert_eq!(json["result"]["approximations"]["no"]["lower"][0], "3");
    assert_eq!(json["result"]["approximations"]["yes"]["accuracy"], 0.0);
    let upper = json["steps"][2]["approximations"]["no"]["upper"].as_array().unwrap();
    assert_eq!(upper.len(), 8);
}

#[tokio::test]
async fn test_process_quantitative() {
    let csv = flu_csv();
    let body = multipart_body(&[
        ("file", Some("flu.csv"), csv.as_bytes()),
        ("method", None, b"quantitative".as_slice()),
    ]);

    let (status, json) = post_process(body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["summary"]["rules_count"], 6);
    assert_eq!(json["result"]["removed_objects"][0], "2");
    assert_eq!(json["result"]["removed_objects"][1], "5");
}

#[tokio::test]
async fn test_process_unknown_method_is_error_payload() {
    let csv = flu_csv();
    let body = multipart_body(&[
        ("method", None, b"fuzzy".as_slice()),
        ("file", Some("flu.csv"), csv.as_bytes()),
    ]);

    let (status, json) = post_process(body).await;

    assert_eq!(status, StatusCode::OK);
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("Invalid method selected"));
}

#[tokio::test]
async fn test_process_missing_file_is_error_payload() {
    let body = multipart_body(&[("method", None, b"qualitative".as_slice())]);

    let (_, json) = post_process(body).await;

    assert!(json["error"].as_str().unwrap().contains("Missing 'file' field"));
}

#[tokio::test]
async fn test_process_malformed_table_is_error_payload() {
    let body = multipart_body(&[
        ("method", None, b"qualitative".as_slice()),
        ("file", Some("bad.csv"), b"id;dec\n1;P\n".as_slice()),
    ]);

    let (_, json) = post_process(body).await;

    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("at least one conditional attribute"));
}
