//! Axum router configuration for the SMS webhook.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, receive_sms, SmsAppState};

/// Create the SMS webhook router.
///
/// # Routes
/// - `POST /inbound` - Inbound SMS webhook
pub fn sms_routes() -> Router<SmsAppState> {
    Router::new().route("/inbound", post(receive_sms))
}

/// Create the complete service router.
///
/// # Routes
/// - `GET /health` - Liveness probe
/// - `POST /sms/inbound` - Inbound SMS webhook
pub fn sms_router() -> Router<SmsAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/sms", sms_routes())
}
