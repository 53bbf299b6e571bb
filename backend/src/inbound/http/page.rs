//! Static page serving the canvas and purchase flow.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Serve the single-page canvas UI.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Canvas page", content_type = "text/html")),
    tags = ["page"],
    operation_id = "getIndex"
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
