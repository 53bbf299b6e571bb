//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod page;
pub mod payments;
pub mod pixels;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod upload_form;
pub mod uploads;

pub use error::ApiResult;

/// Register every pixel wall endpoint and the JSON error handler.
///
/// Health probes are registered separately because they need
/// [`health::HealthState`].
///
/// # Examples
/// ```ignore
/// let app = App::new().app_data(http_state).configure(configure_routes);
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(page::index)
        .service(pixels::list_pixels)
        .service(pixels::upload_pixels)
        .service(uploads::get_upload)
        .service(payments::pay);
}
