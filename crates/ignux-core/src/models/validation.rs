//! Client-side checks mirroring the backend's request constraints.
//!
//! Catching these locally saves a round-trip and gives form layers a
//! readable message instead of a 422 body.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex")
    })
}

fn slug_regex() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid slug regex"))
}

/// Require `value` (trimmed) to be between `min` and `max` characters.
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let count = value.trim().chars().count();
    if count < min || count > max {
        return Err(Error::InvalidInput(format!(
            "{field} must be between {min} and {max} characters (got {count})"
        )));
    }
    Ok(())
}

/// Same as [`check_length`] but skips `None`.
pub fn check_optional_length(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> Result<()> {
    value.map_or(Ok(()), |value| check_length(field, value, min, max))
}

pub fn check_email(field: &str, value: &str) -> Result<()> {
    if email_regex().is_match(value.trim()) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "{field} must be a valid email address"
        )))
    }
}

pub fn check_slug(value: &str) -> Result<()> {
    if slug_regex().is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "'{value}' is not a valid service slug"
        )))
    }
}

pub fn check_positive(field: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("{field} must be greater than 0")))
    }
}

pub fn check_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::InvalidInput(format!("{field} is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(check_length("name", "Jo", 2, 100).is_ok());
        assert!(check_length("name", "J", 2, 100).is_err());
        assert!(check_length("name", &"a".repeat(101), 2, 100).is_err());
    }

    #[test]
    fn optional_length_skips_none() {
        assert!(check_optional_length("notes", None, 2, 10).is_ok());
        assert!(check_optional_length("notes", Some("x"), 2, 10).is_err());
    }

    #[test]
    fn email_check() {
        assert!(check_email("email", "jane@example.com").is_ok());
        assert!(check_email("email", "jane@example").is_err());
        assert!(check_email("email", "jane example.com").is_err());
    }

    #[test]
    fn slug_check() {
        assert!(check_slug("wedding-fireworks").is_ok());
        assert!(check_slug("Wedding").is_err());
        assert!(check_slug("double--dash").is_err());
    }

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert!(check_positive("price", 1.5).is_ok());
        assert!(check_positive("price", 0.0).is_err());
        assert!(check_positive("price", f64::NAN).is_err());
    }
}
