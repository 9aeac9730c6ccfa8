use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use quickshare_core::Item;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/items",
    tag = "items",
    responses(
        (status = 200, description = "Live items, newest first", body = Vec<Item>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_items(State(state): State<Arc<AppState>>) -> Json<Vec<Item>> {
    Json(state.store.list().await)
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, description = "Malformed item ID", body = ErrorResponse),
        (status = 404, description = "Item not found or expired", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, path))]
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Item>, HttpAppError> {
    let Path(id) = path?;
    let item = state.store.get(id).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, description = "Malformed item ID", body = ErrorResponse),
        (status = 404, description = "Item not found or expired", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, path))]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(id) = path?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
