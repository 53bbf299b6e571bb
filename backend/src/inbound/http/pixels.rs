//! Gallery and region purchase endpoints.
//!
//! ```text
//! GET  /pixels  List every purchased region
//! POST /upload  Store an image and its placement
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Region;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UploadFormSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::upload_form::read_upload_form;

/// One purchased region as rendered by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PixelResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 10)]
    pub x: i32,
    #[schema(example = 20)]
    pub y: i32,
    /// Edge length of the square region in pixels.
    #[schema(example = 50)]
    pub size: i32,
    /// Asset filename, served under `/uploads/{image}`.
    #[schema(example = "1700000000000-cat.png")]
    pub image: String,
}

impl From<&Region> for PixelResponse {
    fn from(region: &Region) -> Self {
        let placement = region.placement();
        Self {
            id: region.id().get(),
            x: placement.x(),
            y: placement.y(),
            size: placement.size(),
            image: region.image().to_string(),
        }
    }
}

/// Acknowledgement returned by `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
}

/// List every purchased region in insertion order.
#[utoipa::path(
    get,
    path = "/pixels",
    responses(
        (status = 200, description = "All regions", body = [PixelResponse]),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pixels"],
    operation_id = "listPixels"
)]
#[get("/pixels")]
pub async fn list_pixels(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PixelResponse>>> {
    let regions = state.gallery.list_regions().await?;
    Ok(web::Json(regions.iter().map(PixelResponse::from).collect()))
}

/// Store an uploaded image and the region it was bought for.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Region stored", body = UploadResponse),
        (status = 400, description = "Missing or invalid form fields", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pixels"],
    operation_id = "uploadPixels"
)]
#[post("/upload")]
pub async fn upload_pixels(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let request = read_upload_form(payload, state.max_upload_bytes).await?;
    state.purchases.upload_region(request).await?;
    Ok(HttpResponse::Ok().json(UploadResponse { success: true }))
}
