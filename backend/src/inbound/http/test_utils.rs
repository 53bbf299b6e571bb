//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockPaymentCommand, MockPixelPurchaseCommand, MockPixelPurchaseQuery};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "pixelwall-test-boundary";

/// Mock ports handed to [`http_state`]; tests set expectations before
/// building the state.
#[derive(Default)]
pub struct MockPorts {
    pub purchases: MockPixelPurchaseCommand,
    pub gallery: MockPixelPurchaseQuery,
    pub payments: MockPaymentCommand,
}

/// Wrap mock ports into handler state with the given upload limit.
pub fn http_state(ports: MockPorts, max_upload_bytes: usize) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        HttpStatePorts {
            purchases: Arc::new(ports.purchases),
            gallery: Arc::new(ports.gallery),
            payments: Arc::new(ports.payments),
        },
        max_upload_bytes,
    ))
}

/// A multipart part: name, optional filename, and body.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

/// Encode `parts` as a `multipart/form-data` body.
///
/// Returns the `Content-Type` header value and the body bytes.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
