//! File upload and download integration tests.
//!
//! Run with: `cargo test -p quickshare-api --test files_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use chrono::Duration;
use helpers::fixtures::{create_snippet, file_form, item_id, upload_file};
use helpers::{api_path, setup_test_app, setup_test_app_with};
use quickshare_core::Config;
use serde_json::Value;

#[tokio::test]
async fn test_upload_file() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/files"))
        .multipart(file_form(b"col_a,col_b\n1,2\n", "data.csv", "text/csv"))
        .await;

    assert_eq!(response.status_code(), 201);
    let item: Value = response.json();
    assert_eq!(item["type"], "file");
    assert_eq!(item["name"], "data.csv");
    assert_eq!(item["fileName"], "data.csv");
    assert_eq!(item["contentType"], "text/csv");
    assert_eq!(item["size"], 16);
    assert!(item.get("content").is_none());
    assert_eq!(app.blob_count(), 1);
}

#[tokio::test]
async fn test_upload_file_with_name() {
    let app = setup_test_app().await;

    let form = file_form(b"%PDF-1.4", "scan-0042.pdf", "application/pdf")
        .add_text("name", "Signed contract");
    let response = app.client().post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let item: Value = response.json();
    assert_eq!(item["name"], "Signed contract");
    assert_eq!(item["fileName"], "scan-0042.pdf");
}

#[tokio::test]
async fn test_upload_without_file_field_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("name", "no bytes here");
    let response = app.client().post(&api_path("/files")).multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert!(app.store.is_empty().await);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let config = Config {
        max_upload_size_bytes: 1024,
        ..Config::default()
    };
    let app = setup_test_app_with(config, Duration::hours(1)).await;

    let response = app
        .client()
        .post(&api_path("/files"))
        .multipart(file_form(&[b'x'; 8 * 1024], "big.bin", "application/octet-stream"))
        .await;

    assert_eq!(response.status_code(), 413);
    assert!(app.store.is_empty().await);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_download_file() {
    let app = setup_test_app().await;
    let client = app.client();

    let item = upload_file(client, b"hello from disk", "greeting.txt").await;
    let response = client
        .get(&api_path(&format!("/files/{}/download", item_id(&item))))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(&response.as_bytes()[..], b"hello from disk");
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/plain"
    );
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("filename=\"greeting.txt\""));
}

#[tokio::test]
async fn test_download_text_item_not_found() {
    let app = setup_test_app().await;
    let client = app.client();

    let snippet = create_snippet(client, "not a file").await;
    let response = client
        .get(&api_path(&format!("/files/{}/download", item_id(&snippet))))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_file_removes_blob() {
    let app = setup_test_app().await;
    let client = app.client();

    let item = upload_file(client, b"temporary", "tmp.txt").await;
    assert_eq!(app.blob_count(), 1);

    let response = client
        .delete(&api_path(&format!("/items/{}", item_id(&item))))
        .await;

    assert_eq!(response.status_code(), 204);
    assert_eq!(app.blob_count(), 0);

    let response = client
        .get(&api_path(&format!("/files/{}/download", item_id(&item))))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_expired_file_download_reaps_blob() {
    let app = setup_test_app_with(Config::default(), Duration::zero()).await;
    let client = app.client();

    let item = upload_file(client, b"expires immediately", "old.txt").await;
    assert_eq!(app.blob_count(), 1);

    let response = client
        .get(&api_path(&format!("/files/{}/download", item_id(&item))))
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_download_with_missing_blob_not_found() {
    let app = setup_test_app().await;
    let client = app.client();

    let item = upload_file(client, b"about to vanish", "vanish.txt").await;
    // the blob disappears while the metadata is still live, as with a racing delete
    for entry in std::fs::read_dir(app.upload_dir()).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let response = client
        .get(&api_path(&format!("/files/{}/download", item_id(&item))))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}
