//! HTTP adapter for the SMS webhook.
//!
//! - `POST /sms/inbound` - Inbound messages from the SMS provider
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{SmsApiError, SmsAppState};
pub use routes::{sms_router, sms_routes};
