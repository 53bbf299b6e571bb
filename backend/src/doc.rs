//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers from `inbound::http::schemas`, so domain types
//! stay free of utoipa derives. Swagger UI serves it at `/docs` in debug
//! builds.

use utoipa::OpenApi;

use crate::inbound::http::payments::{PayRequest, PayResponse};
use crate::inbound::http::pixels::{PixelResponse, UploadResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UploadFormSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PixelWall API",
        description = "Buy canvas regions, upload images into them, and pay per pixel."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::page::index,
        crate::inbound::http::pixels::list_pixels,
        crate::inbound::http::pixels::upload_pixels,
        crate::inbound::http::uploads::get_upload,
        crate::inbound::http::payments::pay,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PixelResponse,
        UploadResponse,
        UploadFormSchema,
        PayRequest,
        PayResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "page", description = "Static canvas page"),
        (name = "pixels", description = "Gallery, uploads and asset serving"),
        (name = "payments", description = "Per-pixel payment intents"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
