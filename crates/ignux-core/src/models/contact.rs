//! Contact form, quick quote and chat deep-link payloads

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::validation::{
    check_email, check_length, check_not_blank, check_optional_length,
};
use crate::Result;

/// Inquiry submitted from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub message: String,
}

impl ContactInquiry {
    pub fn validate(&self) -> Result<()> {
        check_length("name", &self.name, 2, 100)?;
        check_email("email", &self.email)?;
        check_length("phone", &self.phone, 10, 20)?;
        check_length("event_type", &self.event_type, 2, 50)?;
        check_length("message", &self.message, 10, 5000)
    }
}

/// Stored contact message as echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    #[serde(flatten)]
    pub inquiry: ContactInquiry,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub responded: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request for a server-rendered chat deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppRequest {
    pub phone: String,
    pub message: String,
    /// Named quick-message template (`wedding`, `corporate`, `quote`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl WhatsAppRequest {
    pub fn validate(&self) -> Result<()> {
        check_length("phone", &self.phone, 10, 20)?;
        check_length("message", &self.message, 2, 1000)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppLink {
    pub whatsapp_url: String,
    pub phone: String,
    pub message_preview: String,
    #[serde(default)]
    pub template_used: Option<String>,
}

/// Lightweight quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    pub location: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub contact_email: String,
    pub contact_phone: String,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<()> {
        check_not_blank("service_type", &self.service_type)?;
        check_not_blank("location", &self.location)?;
        check_not_blank("duration", &self.duration)?;
        check_email("contact_email", &self.contact_email)?;
        check_not_blank("contact_phone", &self.contact_phone)?;
        check_optional_length("special_requests", self.special_requests.as_deref(), 1, 5000)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteReceipt {
    pub reference: String,
    pub service_type: String,
    pub contact_email: String,
    pub estimated_response: String,
}
