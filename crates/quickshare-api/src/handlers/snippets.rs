use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use quickshare_core::Item;
use quickshare_store::NewItem;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSnippetRequest {
    /// Snippet text; must not be empty
    pub content: String,
    /// Display name; derived from the content when omitted or blank
    #[serde(default)]
    pub name: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/snippets",
    tag = "items",
    request_body = CreateSnippetRequest,
    responses(
        (status = 201, description = "Snippet shared", body = Item),
        (status = 400, description = "Empty content or malformed body", body = ErrorResponse),
        (status = 413, description = "Body too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_snippet(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateSnippetRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut new_item = NewItem::text(request.content);
    if let Some(name) = request.name {
        new_item = new_item.with_name(name);
    }

    let item = state.store.create(new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
