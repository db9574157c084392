use chrono::SecondsFormat;
use contact_models::contact::ContactAcknowledgement;
use serde::Serialize;

pub const MESSAGE_SENT: &str = "Message sent successfully";

#[derive(Debug, Serialize)]
pub struct ApiContactAcknowledgement {
    pub message: &'static str,
    /// ISO 8601 timestamp in UTC with millisecond precision
    pub timestamp: String,
}

impl From<ContactAcknowledgement> for ApiContactAcknowledgement {
    fn from(value: ContactAcknowledgement) -> Self {
        Self {
            message: MESSAGE_SENT,
            timestamp: value.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
