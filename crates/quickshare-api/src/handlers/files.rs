use crate::constants::{FILE_FIELD, NAME_FIELD};
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::{Body, Bytes},
    extract::{rejection::PathRejection, Multipart, Path, State},
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use quickshare_core::constants::{DEFAULT_CONTENT_TYPE, UNTITLED_NAME};
use quickshare_core::{file_display_name, AppError, FileMeta, Item};
use quickshare_store::NewItem;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

/// A file part pulled out of the multipart body.
struct UploadedFile {
    data: Bytes,
    file_name: Option<String>,
    content_type: Option<String>,
}

/// Read the `file` part (exactly one) and the optional `name` part.
async fn read_upload(
    mut multipart: Multipart,
) -> Result<(UploadedFile, Option<String>), HttpAppError> {
    let mut file: Option<UploadedFile> = None;
    let mut name: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            FILE_FIELD => {
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    )
                    .into());
                }
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                file = Some(UploadedFile {
                    data,
                    file_name,
                    content_type,
                });
            }
            NAME_FIELD => name = Some(field.text().await?),
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let file = file.ok_or_else(|| {
        AppError::InvalidInput("Missing 'file' field in multipart form".to_string())
    })?;
    Ok((file, name))
}

#[utoipa::path(
    post,
    path = "/api/files",
    tag = "items",
    request_body(content_type = "multipart/form-data", description = "Field `file` with the bytes, optional field `name`"),
    responses(
        (status = 201, description = "File shared", body = Item),
        (status = 400, description = "Missing file field", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Blob could not be written", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (upload, name) = read_upload(multipart).await?;

    let meta = FileMeta {
        file_name: upload
            .file_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNTITLED_NAME.to_string()),
        content_type: upload.content_type.filter(|ct| !ct.is_empty()),
        declared_size: Some(upload.data.len() as u64),
    };

    tracing::debug!(
        file_name = %meta.file_name,
        size_bytes = upload.data.len(),
        "Received file upload"
    );

    let reader = Box::pin(std::io::Cursor::new(upload.data));
    let mut new_item = NewItem::file(meta, reader);
    if let Some(name) = name {
        new_item = new_item.with_name(name);
    }

    let item = state.store.create(new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let base = file_display_name(file_name);
    let fallback: String = base
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(&base, NON_ALPHANUMERIC);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

#[utoipa::path(
    get,
    path = "/api/files/{id}/download",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "File bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Item not found, expired, or not a file", body = ErrorResponse),
        (status = 500, description = "Blob could not be read", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, path))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(id) = path?;
    let location = state.store.resolve_blob(id).await?;

    // a concurrent delete can remove the blob after resolve_blob returned
    let file = tokio::fs::File::open(&location.path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(format!("Item {} not found", id)),
            _ => AppError::from(e),
        })?;
    let size = file
        .metadata()
        .await
        .map_err(|e| AppError::Storage(format!("Failed to stat blob: {}", e)))?
        .len();

    tracing::debug!(item_id = %id, size_bytes = size, "Streaming file download");

    let content_type = location
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or(HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, size)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&location.original_file_name),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain_name() {
        assert_eq!(
            content_disposition("report.pdf"),
            "attachment; filename=\"report.pdf\"; filename*=UTF-8''report%2Epdf"
        );
    }

    #[test]
    fn test_content_disposition_uses_base_name() {
        let value = content_disposition("C:\\Users\\me\\notes.txt");
        assert!(value.starts_with("attachment; filename=\"notes.txt\""));
    }

    #[test]
    fn test_content_disposition_escapes_quotes_and_unicode() {
        let value = content_disposition("my \"big\" résumé.txt");
        assert!(value.starts_with("attachment; filename=\"my _big_ r_sum_.txt\""));
        assert!(value.contains("filename*=UTF-8''my%20%22big%22%20r%C3%A9sum%C3%A9%2Etxt"));
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }
}
