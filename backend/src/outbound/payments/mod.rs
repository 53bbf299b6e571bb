//! Payment provider outbound adapters.
//!
//! Provides a thin HTTP implementation of the `PaymentGateway` port.

mod dto;
mod stripe_http_gateway;

pub use stripe_http_gateway::StripeHttpGateway;
