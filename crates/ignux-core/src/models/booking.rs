//! Booking payloads and filters

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::validation::{check_email, check_length, check_positive};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(Error::InvalidInput(format!(
                "Unknown booking status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueType {
    Indoor,
    Outdoor,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    Ground,
    Aerial,
    Mixed,
}

/// Booking request as submitted by the booking form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    #[serde(default)]
    pub client_address: Option<String>,

    pub event_type: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub event_location: String,
    pub venue_type: VenueType,
    #[serde(default)]
    pub expected_guests: Option<u32>,

    pub service_type: String,
    pub service_package: String,
    #[serde(default)]
    pub additional_services: Vec<String>,

    pub display_duration: String,
    pub display_type: DisplayType,
    #[serde(default)]
    pub colors_requested: Option<String>,
    #[serde(default)]
    pub music_sync: bool,
    #[serde(default)]
    pub special_effects: Option<String>,

    pub base_price: f64,
    #[serde(default)]
    pub additional_charges: f64,
    #[serde(default)]
    pub discount: f64,
    pub total_price: f64,

    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub insurance_required: bool,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<()> {
        check_length("client_name", &self.client_name, 2, 100)?;
        check_email("client_email", &self.client_email)?;
        check_length("client_phone", &self.client_phone, 10, 20)?;
        check_length("event_type", &self.event_type, 2, 50)?;
        check_length("event_name", &self.event_name, 2, 100)?;
        check_length("event_location", &self.event_location, 5, 200)?;
        check_length("service_type", &self.service_type, 2, 50)?;
        check_length("service_package", &self.service_package, 2, 50)?;
        check_length("display_duration", &self.display_duration, 2, 20)?;
        if self.expected_guests == Some(0) {
            return Err(Error::InvalidInput(
                "expected_guests must be greater than 0".to_string(),
            ));
        }
        check_positive("base_price", self.base_price)?;
        check_positive("total_price", self.total_price)
    }
}

/// Booking record returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    #[serde(flatten)]
    pub request: BookingRequest,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub deposit_paid: f64,
    #[serde(default)]
    pub balance_due: f64,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub confirmed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub assigned_team_leader: Option<String>,
    #[serde(default)]
    pub team_size: u32,
    #[serde(default)]
    pub permit_required: bool,
    #[serde(default)]
    pub permit_obtained: bool,
}

/// Query filters for listing bookings; unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// Booked vs. open days over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub booked_dates: Vec<NaiveDate>,
    pub available_dates: Vec<NaiveDate>,
    pub total_days: u32,
    pub booked_days: u32,
    pub available_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> BookingRequest {
        BookingRequest {
            client_name: "Jane Doe".to_string(),
            client_email: "jane@example.com".to_string(),
            client_phone: "0712345678".to_string(),
            client_address: None,
            event_type: "wedding".to_string(),
            event_name: "Doe Wedding".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            event_time: "23:45".to_string(),
            event_location: "Karen Gardens, Nairobi".to_string(),
            venue_type: VenueType::Outdoor,
            expected_guests: Some(150),
            service_type: "fireworks".to_string(),
            service_package: "premium".to_string(),
            additional_services: vec!["cold sparks".to_string()],
            display_duration: "15 minutes".to_string(),
            display_type: DisplayType::Aerial,
            colors_requested: Some("gold".to_string()),
            music_sync: true,
            special_effects: None,
            base_price: 250_000.0,
            additional_charges: 0.0,
            discount: 0.0,
            total_price: 250_000.0,
            special_instructions: None,
            emergency_contact: None,
            insurance_required: false,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn zero_total_price_is_rejected() {
        let mut request = sample_request();
        request.total_price = 0.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn zero_guests_is_rejected() {
        let mut request = sample_request();
        request.expected_guests = Some(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn enums_use_backend_spelling() {
        let value = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(value["venue_type"], json!("outdoor"));
        assert_eq!(value["display_type"], json!("aerial"));
        assert_eq!(
            serde_json::to_value(BookingStatus::InProgress).unwrap(),
            json!("in_progress")
        );
    }

    #[test]
    fn booking_status_parses_from_cli_text() {
        assert_eq!(
            "in_progress".parse::<BookingStatus>().unwrap(),
            BookingStatus::InProgress
        );
        assert!("unknown".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn empty_filter_serializes_to_nothing() {
        let value = serde_json::to_value(BookingFilter::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
