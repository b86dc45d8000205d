//! Newsletter subscription payloads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::validation::{check_email, check_optional_length};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "website".to_string()
}

impl NewsletterSubscription {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            source: default_source(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_email("email", &self.email)?;
        check_optional_length("name", self.name.as_deref(), 1, 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterUnsubscribe {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl NewsletterUnsubscribe {
    pub fn validate(&self) -> Result<()> {
        check_email("email", &self.email)
    }
}

/// Subscription state echoed by subscribe/unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `subscribed`, `already_subscribed`, `unsubscribed` or `not_subscribed`
    pub status: String,
    #[serde(default)]
    pub subscribed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub unsubscribed_at: Option<NaiveDateTime>,
}
