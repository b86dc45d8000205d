//! Service catalogue and testimonials

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::validation::{check_length, check_slug};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub base_price: f64,
    pub price_range_min: f64,
    pub price_range_max: f64,
    pub duration: String,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

/// Normalize and validate a slug before it is put in a URL path.
pub fn normalize_slug(raw: &str) -> Result<String> {
    let slug = raw.trim();
    check_slug(slug)?;
    Ok(slug.to_string())
}

/// Testimonial as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialSubmission {
    pub client_name: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    pub rating: u8,
    pub testimonial: String,
}

impl TestimonialSubmission {
    pub fn validate(&self) -> Result<()> {
        check_length("client_name", &self.client_name, 2, 100)?;
        check_length("event_type", &self.event_type, 2, 50)?;
        if !(1..=5).contains(&self.rating) {
            return Err(Error::InvalidInput(format!(
                "rating must be between 1 and 5 (got {})",
                self.rating
            )));
        }
        check_length("testimonial", &self.testimonial, 10, 2000)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: i64,
    #[serde(flatten)]
    pub submission: TestimonialSubmission,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
}
