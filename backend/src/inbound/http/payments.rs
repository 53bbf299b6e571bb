//! Payment endpoint.
//!
//! ```text
//! POST /pay  Create a payment intent for a pixel count
//! ```
//!
//! The intent is not tied to any upload; the page calls this endpoint and
//! `POST /upload` independently.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /pay`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PayRequest {
    /// Number of pixels being bought; at least 10.
    #[schema(example = 100, minimum = 10)]
    pub pixels: i64,
}

/// Response body for `POST /pay`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayResponse {
    /// Provider client secret, passed to the browser checkout verbatim.
    #[schema(example = "pi_123_secret_456")]
    pub client_secret: String,
}

/// Create a payment intent priced at the configured per-pixel rate.
#[utoipa::path(
    post,
    path = "/pay",
    request_body = PayRequest,
    responses(
        (status = 200, description = "Intent created", body = PayResponse),
        (status = 400, description = "Fewer than 10 pixels or malformed body", body = ErrorSchema),
        (status = 502, description = "Payment provider failed", body = ErrorSchema),
        (status = 503, description = "Payments not configured", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "createPayment"
)]
#[post("/pay")]
pub async fn pay(
    state: web::Data<HttpState>,
    payload: web::Json<PayRequest>,
) -> ApiResult<web::Json<PayResponse>> {
    let secret = state.payments.create_intent(payload.pixels).await?;
    Ok(web::Json(PayResponse {
        client_secret: secret.expose().to_owned(),
    }))
}
