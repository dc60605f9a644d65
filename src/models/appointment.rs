use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An opaque bookable time token. The remote calendar service defines its
/// shape; the client only hands it back unchanged. A slot is valid only for
/// the date it was fetched under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(pub String);

impl TimeSlot {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TimeSlot {
    fn from(s: &str) -> Self {
        TimeSlot(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
}

/// One submission attempt. Built per request and discarded once the remote
/// call resolves; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub guest: GuestInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppointmentResult {
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        AppointmentResult {
            success: false,
            id: None,
            message: message.into(),
            error: Some(error.into()),
        }
    }

    /// success=true must carry an id; anything else is malformed.
    pub fn is_well_formed(&self) -> bool {
        !self.success || self.id.is_some()
    }
}

/// Credential state of the remote calendar integration. Read-only from this
/// side; `needs_refresh` means the credential may still be valid but is
/// expiring soon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A fully resolved booked appointment as the remote service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub guests: Vec<String>,
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
}
