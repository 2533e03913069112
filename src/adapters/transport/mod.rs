//! Outbound SMS transports.
//!
//! - `TwilioSender` - Twilio Messages API
//! - `LoggingSender` - logs instead of sending, for development

mod logging;
mod twilio;

pub use logging::LoggingSender;
pub use twilio::{TwilioConfig, TwilioSender};
