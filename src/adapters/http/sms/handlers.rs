//! HTTP handlers for the SMS webhook.
//!
//! These handlers connect Axum routes to the chat command handlers.

use std::sync::Arc;

use axum::extract::{Form, Json, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::chat::{
    HandleInboundMessageCommand, HandleInboundMessageHandler, HandleMessageError,
    SendRepliesCommand, SendRepliesHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::TransportError;

use super::dto::{ErrorResponse, HealthResponse, InboundSmsForm, EMPTY_TWIML};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the SMS endpoints.
#[derive(Clone)]
pub struct SmsAppState {
    pub inbound: Arc<HandleInboundMessageHandler>,
    pub replies: Arc<SendRepliesHandler>,
}

impl SmsAppState {
    pub fn new(inbound: Arc<HandleInboundMessageHandler>, replies: Arc<SendRepliesHandler>) -> Self {
        Self { inbound, replies }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /sms/inbound - Handle an inbound SMS webhook
///
/// Replies are delivered before the webhook is acknowledged. A failure answers
/// 500 so the provider retries; the retry is deduplicated by message id.
pub async fn receive_sms(
    State(state): State<SmsAppState>,
    Form(form): Form<InboundSmsForm>,
) -> Result<impl IntoResponse, SmsApiError> {
    let result = state
        .inbound
        .handle(HandleInboundMessageCommand::new(form.into_message()))
        .await?;

    if !result.replies.is_empty() {
        state
            .replies
            .handle(SendRepliesCommand {
                replies: result.replies,
            })
            .await?;
    }

    Ok(([(header::CONTENT_TYPE, "text/xml")], EMPTY_TWIML))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts handler errors to HTTP responses.
#[derive(Debug)]
pub struct SmsApiError(DomainError);

impl From<HandleMessageError> for SmsApiError {
    fn from(err: HandleMessageError) -> Self {
        match err {
            HandleMessageError::InvalidSender(invalid) => Self(invalid.into()),
            other => Self(DomainError::new(other.code(), other.to_string())),
        }
    }
}

impl From<TransportError> for SmsApiError {
    fn from(err: TransportError) -> Self {
        Self(DomainError::new(err.code(), err.to_string()))
    }
}

impl IntoResponse for SmsApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0.message, "SMS webhook failed");
        }

        let body =
            ErrorResponse::new(self.0.code.to_string(), self.0.message).with_details(self.0.details);
        (status, Json(body)).into_response()
    }
}
