//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PaymentCommand, PixelPurchaseCommand, PixelPurchaseQuery};

/// Default cap on the size of one uploaded image, in bytes (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub purchases: Arc<dyn PixelPurchaseCommand>,
    pub gallery: Arc<dyn PixelPurchaseQuery>,
    pub payments: Arc<dyn PaymentCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub purchases: Arc<dyn PixelPurchaseCommand>,
    pub gallery: Arc<dyn PixelPurchaseQuery>,
    pub payments: Arc<dyn PaymentCommand>,
    /// Largest accepted image part in `POST /upload`.
    pub max_upload_bytes: usize,
}

impl HttpState {
    /// Construct state from port implementations and an upload limit.
    ///
    /// # Examples
    /// ```ignore
    /// let state = HttpState::new(ports, 1024);
    /// assert_eq!(state.max_upload_bytes, 1024);
    /// ```
    pub fn new(ports: HttpStatePorts, max_upload_bytes: usize) -> Self {
        let HttpStatePorts {
            purchases,
            gallery,
            payments,
        } = ports;
        Self {
            purchases,
            gallery,
            payments,
            max_upload_bytes,
        }
    }
}
