//! Readiness and liveness probes.
//!
//! ```text
//! GET /health/ready  200 once the listener is bound, 503 before
//! GET /health/live   200 until shutdown begins, 503 after
//! ```
//!
//! Readiness also reports the record store kind in a `record-store` header
//! (`memory` or `database`); a `memory` store loses every record on restart.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::header::{CacheControl, CacheDirective, HeaderName, HeaderValue};
use actix_web::{HttpResponse, get, web};

/// Process health flags shared between `main` and the probe handlers.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    alive: AtomicBool,
    volatile_records: AtomicBool,
}

/// Readiness header naming the record store kind.
pub const RECORD_STORE_HEADER: &str = "record-store";

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            alive: AtomicBool::new(true),
            volatile_records: AtomicBool::new(false),
        }
    }
}

impl HealthState {
    /// Not ready, alive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the HTTP listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Called when shutdown begins so orchestrators stop routing traffic.
    pub fn mark_unhealthy(&self) {
        self.alive.store(false, Ordering::Release);
        self.ready.store(false, Ordering::Release);
    }

    /// Called when regions are held in process memory only.
    pub fn mark_volatile_records(&self) {
        self.volatile_records.store(true, Ordering::Release);
    }

    pub fn records_are_volatile(&self) -> bool {
        self.volatile_records.load(Ordering::Acquire)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

fn probe(ok: bool) -> HttpResponse {
    let mut builder = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    operation_id = "getReady",
    responses(
        (status = 200, description = "Listener bound; traffic may be routed",
            headers(("record-store" = String, description = "`memory` or `database`"))),
        (status = 503, description = "Starting up or shutting down")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let mut res = probe(state.is_ready());
    let kind = if state.records_are_volatile() {
        "memory"
    } else {
        "database"
    };
    res.headers_mut().insert(
        HeaderName::from_static(RECORD_STORE_HEADER),
        HeaderValue::from_static(kind),
    );
    res
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    operation_id = "getLive",
    responses(
        (status = 200, description = "Process is alive"),
        (status = 503, description = "Shutdown in progress")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}
