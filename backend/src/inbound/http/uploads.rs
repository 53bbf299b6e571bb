//! Asset serving endpoint.
//!
//! ```text
//! GET /uploads/{file}  Raw bytes of a stored image
//! ```

use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Assets are never rewritten, so clients may cache them indefinitely.
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Infer a response content type from an asset filename.
///
/// # Examples
/// ```
/// use pixelwall::inbound::http::uploads::content_type_for;
///
/// assert_eq!(content_type_for("1-cat.PNG"), "image/png");
/// assert_eq!(content_type_for("1-notes"), "application/octet-stream");
/// ```
pub fn content_type_for(file: &str) -> &'static str {
    let extension = file
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Stream a stored asset.
#[utoipa::path(
    get,
    path = "/uploads/{file}",
    params(("file" = String, Path, description = "Asset filename returned in `GET /pixels`")),
    responses(
        (status = 200, description = "Asset bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Asset not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pixels"],
    operation_id = "getUpload"
)]
#[get("/uploads/{file}")]
pub async fn get_upload(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let file = path.into_inner();
    let bytes = state.gallery.fetch_asset(&file).await?;
    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, content_type_for(&file)))
        .insert_header((CACHE_CONTROL, ASSET_CACHE_CONTROL))
        .body(bytes))
}
