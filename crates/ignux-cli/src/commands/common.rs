use std::io::{self, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use ignux_core::models::{parse_fields, Booking, Service, Testimonial};
use ignux_core::{ApiClient, ContentItem, Fields};
use serde::Serialize;
use serde_json::Value;

use crate::config::Settings;
use crate::error::CliError;

/// Field keys tried, in order, for a one-line content preview.
const PREVIEW_KEYS: [&str; 5] = ["title", "name", "client_name", "headline", "description"];

pub fn api_client(settings: &Settings) -> Result<ApiClient, CliError> {
    Ok(ApiClient::new(settings.client.clone())?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build content fields from `--json` and repeated `--field key=value` flags.
///
/// Field flags are applied over the JSON object. Values that parse as JSON
/// keep their type (`price=99` is a number); anything else is a string.
pub fn resolve_fields(assignments: &[String], json: Option<&str>) -> Result<Fields, CliError> {
    let mut fields = match json {
        Some(raw) => parse_fields(raw)?,
        None => Fields::new(),
    };

    for assignment in assignments {
        let (key, value) = parse_field_assignment(assignment)?;
        fields.insert(key, value);
    }

    if fields.is_empty() {
        return Err(CliError::EmptyFields);
    }
    Ok(fields)
}

pub fn parse_field_assignment(assignment: &str) -> Result<(String, Value), CliError> {
    let Some((key, raw_value)) = assignment.split_once('=') else {
        return Err(CliError::InvalidFieldAssignment(assignment.to_string()));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidFieldAssignment(assignment.to_string()));
    }

    let value = serde_json::from_str::<Value>(raw_value)
        .unwrap_or_else(|_| Value::String(raw_value.to_string()));
    Ok((key.to_string(), value))
}

pub fn normalize_content_id(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyContentId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Read a JSON document from a file, or from stdin when `path` is `-`.
pub fn read_json_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

pub fn format_content_lines(items: &[ContentItem], now: DateTime<Utc>) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let short_id = item.id.as_str().chars().take(13).collect::<String>();
            let preview = content_preview(&item.fields, 40);
            let relative_time = format_relative_time(item.updated_at, now);
            format!("{short_id:<13}  {preview:<40}  {relative_time}")
        })
        .collect()
}

pub fn content_preview(fields: &Fields, max_chars: usize) -> String {
    let text = PREVIEW_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .map_or_else(|| Value::Object(fields.clone()).to_string(), ToString::to_string);
    truncate(&text, max_chars)
}

pub fn format_service_lines(services: &[Service]) -> Vec<String> {
    services
        .iter()
        .map(|service| {
            let popular = if service.is_popular { "  *popular" } else { "" };
            format!(
                "{:<28}  {:<14}  {:>12}  {}{popular}",
                truncate(&service.slug, 28),
                truncate(&service.category, 14),
                format_price_range(service.price_range_min, service.price_range_max),
                truncate(&service.name, 40),
            )
        })
        .collect()
}

pub fn format_testimonial_lines(testimonials: &[Testimonial]) -> Vec<String> {
    testimonials
        .iter()
        .map(|testimonial| {
            let stars = "*".repeat(usize::from(testimonial.submission.rating.min(5)));
            format!(
                "{stars:<5}  {:<20}  {:<14}  {}",
                truncate(&testimonial.submission.client_name, 20),
                truncate(&testimonial.submission.event_type, 14),
                truncate(&testimonial.submission.testimonial, 60),
            )
        })
        .collect()
}

pub fn format_booking_lines(bookings: &[Booking]) -> Vec<String> {
    bookings
        .iter()
        .map(|booking| {
            format!(
                "#{:<6}  {}  {:<11}  {:<20}  {}",
                booking.id,
                booking.request.event_date,
                booking.booking_status.as_str(),
                truncate(&booking.request.client_name, 20),
                truncate(&booking.request.event_name, 40),
            )
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_price_range(min: f64, max: f64) -> String {
    if (max - min).abs() < f64::EPSILON {
        format!("{}", min.round() as u64)
    } else {
        format!("{}-{}", min.round() as u64, max.round() as u64)
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).num_milliseconds().max(0);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
