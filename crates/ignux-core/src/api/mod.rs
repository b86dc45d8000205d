//! Typed HTTP client for the IGNUX backend.
//!
//! One method per remote operation. Request DTOs are validated locally before
//! anything is sent; there are no retries.

mod content;

use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::models::{
    normalize_slug, ApiResponse, Availability, Booking, BookingFilter, BookingRequest,
    ContactInquiry, ContactMessage, NewsletterSubscription, NewsletterUnsubscribe, QuoteReceipt,
    QuoteRequest, Service, ServiceCategory, SubscriptionStatus, Testimonial,
    TestimonialSubmission, WhatsAppLink, WhatsAppRequest,
};
use crate::util::compact_text;
use crate::{Error, Result};

const MAX_FEATURED_LIMIT: u32 = 20;
const MAX_FEATURED_TESTIMONIALS: u32 = 10;

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| {
                Error::InvalidConfiguration(format!("Failed to build HTTP client: {error}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Client configured from `IGNUX_API_BASE_URL` / `IGNUX_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit the public contact form.
    pub async fn submit_contact(&self, inquiry: &ContactInquiry) -> Result<ContactMessage> {
        inquiry.validate()?;
        let message: ContactMessage = self
            .send_json(Method::POST, "/contacts/", |request| request.json(inquiry))
            .await?;
        info!(contact_id = message.id, "Contact inquiry submitted");
        Ok(message)
    }

    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        request.validate()?;
        let booking: Booking = self
            .send_json(Method::POST, "/bookings/", |builder| builder.json(request))
            .await?;
        info!(booking_id = booking.id, "Booking created");
        Ok(booking)
    }

    pub async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            check_date_range(from, to)?;
        }
        self.send_json(Method::GET, "/bookings/", |request| request.query(filter))
            .await
    }

    /// Booked and open days between two dates, inclusive.
    pub async fn check_availability(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Availability> {
        check_date_range(date_from, date_to)?;
        self.send_json(Method::GET, "/bookings/calendar/availability", |request| {
            request.query(&[("date_from", date_from), ("date_to", date_to)])
        })
        .await
    }

    pub async fn list_services(&self, category: Option<&str>) -> Result<Vec<Service>> {
        let category = category.map(str::trim).filter(|value| !value.is_empty());
        self.send_json(Method::GET, "/services/", |request| match category {
            Some(category) => request.query(&[("category", category)]),
            None => request,
        })
        .await
    }

    pub async fn get_service(&self, service_id: i64) -> Result<Service> {
        self.send_json(Method::GET, &format!("/services/{service_id}"), |request| request)
            .await
    }

    pub async fn get_service_by_slug(&self, slug: &str) -> Result<Service> {
        let slug = normalize_slug(slug)?;
        self.send_json(Method::GET, &format!("/services/slug/{slug}"), |request| request)
            .await
    }

    pub async fn list_service_categories(&self) -> Result<Vec<ServiceCategory>> {
        self.send_json(Method::GET, "/services/categories/", |request| request)
            .await
    }

    /// Featured services; `limit` must be in `1..=20`, the backend default is 6.
    pub async fn featured_services(&self, limit: Option<u32>) -> Result<Vec<Service>> {
        check_limit(limit, MAX_FEATURED_LIMIT)?;
        self.send_json(Method::GET, "/services/featured/", |request| match limit {
            Some(limit) => request.query(&[("limit", limit)]),
            None => request,
        })
        .await
    }

    pub async fn list_testimonials(&self, featured_only: bool) -> Result<Vec<Testimonial>> {
        self.send_json(Method::GET, "/services/testimonials/", |request| {
            request.query(&[("featured_only", featured_only)])
        })
        .await
    }

    /// Highest-rated approved testimonials; `limit` must be in `1..=10`, the
    /// backend default is 3.
    pub async fn featured_testimonials(&self, limit: Option<u32>) -> Result<Vec<Testimonial>> {
        check_limit(limit, MAX_FEATURED_TESTIMONIALS)?;
        self.send_json(Method::GET, "/services/testimonials/featured", |request| {
            match limit {
                Some(limit) => request.query(&[("limit", limit)]),
                None => request,
            }
        })
        .await
    }

    pub async fn submit_testimonial(
        &self,
        submission: &TestimonialSubmission,
    ) -> Result<Testimonial> {
        submission.validate()?;
        let testimonial: Testimonial = self
            .send_json(Method::POST, "/services/testimonials/", |request| {
                request.json(submission)
            })
            .await?;
        info!(testimonial_id = testimonial.id, "Testimonial submitted");
        Ok(testimonial)
    }

    /// Build a WhatsApp deep link for a prefilled message.
    pub async fn whatsapp_link(
        &self,
        request: &WhatsAppRequest,
    ) -> Result<ApiResponse<WhatsAppLink>> {
        request.validate()?;
        self.send_json(Method::POST, "/contacts/whatsapp", |builder| builder.json(request))
            .await
    }

    pub async fn quick_quote(&self, request: &QuoteRequest) -> Result<ApiResponse<QuoteReceipt>> {
        request.validate()?;
        let response: ApiResponse<QuoteReceipt> = self
            .send_json(Method::POST, "/contacts/quick-quote", |builder| {
                builder.json(request)
            })
            .await?;
        if response.success {
            info!(service_type = %request.service_type, "Quote request submitted");
        }
        Ok(response)
    }

    pub async fn subscribe_newsletter(
        &self,
        subscription: &NewsletterSubscription,
    ) -> Result<ApiResponse<SubscriptionStatus>> {
        subscription.validate()?;
        self.send_json(Method::POST, "/services/newsletter/subscribe", |request| {
            request.json(subscription)
        })
        .await
    }

    pub async fn unsubscribe_newsletter(
        &self,
        request: &NewsletterUnsubscribe,
    ) -> Result<ApiResponse<SubscriptionStatus>> {
        request.validate()?;
        self.send_json(Method::POST, "/services/newsletter/unsubscribe", |builder| {
            builder.json(request)
        })
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode a JSON body.
    async fn send_json<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<R> {
        let endpoint = format!("{method} {path}");
        let body = self.send(method, path, build).await?;
        serde_json::from_str(&body).map_err(|error| Error::InvalidResponse {
            endpoint,
            message: error.to_string(),
        })
    }

    /// Send a request and return the raw body of a 2xx response.
    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<String> {
        let endpoint = format!("{method} {path}");
        debug!(%endpoint, "Sending request");

        let request = build(
            self.client
                .request(method, self.url(path))
                .header("Accept", "application/json"),
        );
        let response = request
            .send()
            .await
            .map_err(|error| Error::RequestFailed {
                status: error.status().map(|status| status.as_u16()),
                endpoint: endpoint.clone(),
                message: error.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| Error::RequestFailed {
            status: Some(status.as_u16()),
            endpoint: endpoint.clone(),
            message: error.to_string(),
        })?;

        if !status.is_success() {
            return Err(Error::RequestFailed {
                status: Some(status.as_u16()),
                endpoint,
                message: parse_api_error(status, &body),
            });
        }
        Ok(body)
    }
}

fn check_limit(limit: Option<u32>, max: u32) -> Result<()> {
    match limit {
        Some(limit) if !(1..=max).contains(&limit) => Err(Error::InvalidInput(format!(
            "limit must be between 1 and {max}"
        ))),
        _ => Ok(()),
    }
}

fn check_date_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
    if from > to {
        return Err(Error::InvalidInput(format!(
            "date_from ({from}) must not be after date_to ({to})"
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<Value>,
    message: Option<String>,
    error: Option<String>,
}

/// Human-readable message from an error body.
///
/// The backend answers with `{"detail": "..."}`, a validation error list under
/// `detail`, or the `{success, message, error}` envelope.
fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        let message = payload
            .detail
            .and_then(|detail| describe_detail(&detail))
            .or(payload.error)
            .or(payload.message)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty());
        if let Some(message) = message {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), ToString::to_string)
    } else {
        compact_text(trimmed)
    }
}

fn describe_detail(detail: &Value) -> Option<String> {
    match detail {
        Value::String(message) => Some(message.clone()),
        Value::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .filter_map(|entry| {
                    let message = entry.get("msg")?.as_str()?;
                    let field = entry
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .and_then(Value::as_str);
                    Some(field.map_or_else(
                        || message.to_string(),
                        |field| format!("{field}: {message}"),
                    ))
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
