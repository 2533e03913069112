//! HTTP adapters - Webhook endpoints.

pub mod sms;

pub use sms::{sms_router, SmsAppState};
