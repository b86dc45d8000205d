//! Data models for IGNUX

mod booking;
mod contact;
mod content;
mod newsletter;
mod response;
mod service;
pub mod validation;

pub use booking::{
    Availability, Booking, BookingFilter, BookingRequest, BookingStatus, DisplayType,
    PaymentStatus, VenueType,
};
pub use contact::{
    ContactInquiry, ContactMessage, QuoteReceipt, QuoteRequest, WhatsAppLink, WhatsAppRequest,
};
pub use content::{
    parse_fields, ContentFields, ContentId, ContentItem, ContentType, Fields, MANAGED_FIELDS,
};
pub use newsletter::{NewsletterSubscription, NewsletterUnsubscribe, SubscriptionStatus};
pub use response::ApiResponse;
pub use service::{normalize_slug, Service, ServiceCategory, Testimonial, TestimonialSubmission};
