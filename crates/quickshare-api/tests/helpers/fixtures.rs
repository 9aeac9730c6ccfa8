//! Request fixtures shared by the integration tests.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};

use super::api_path;

/// Multipart form with a single `file` part.
pub fn file_form(data: &[u8], file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data.to_vec()))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("file", part)
}

/// Share a snippet and return the created item as JSON.
pub async fn create_snippet(client: &TestServer, content: &str) -> Value {
    let response = client
        .post(&api_path("/snippets"))
        .json(&json!({ "content": content }))
        .await;
    assert_eq!(response.status_code(), 201);
    response.json()
}

/// Upload a file and return the created item as JSON.
pub async fn upload_file(client: &TestServer, data: &[u8], file_name: &str) -> Value {
    let response = client
        .post(&api_path("/files"))
        .multipart(file_form(data, file_name, "text/plain"))
        .await;
    assert_eq!(response.status_code(), 201);
    response.json()
}

/// The `id` field of an item response.
pub fn item_id(item: &Value) -> String {
    item.get("id")
        .and_then(|v| v.as_str())
        .expect("Expected 'id' in item response")
        .to_string()
}
