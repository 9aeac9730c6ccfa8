//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use quickshare_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QuickShare API",
        version = "0.1.0",
        description = "Share text snippets and files that expire automatically."
    ),
    paths(
        handlers::snippets::create_snippet,
        handlers::files::upload_file,
        handlers::files::download_file,
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::items::delete_item,
        handlers::health::health_check,
    ),
    components(schemas(
        models::Item,
        models::ItemKind,
        handlers::snippets::CreateSnippetRequest,
        handlers::health::HealthResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "items", description = "Shared snippets and files"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
