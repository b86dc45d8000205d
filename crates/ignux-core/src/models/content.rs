//! Managed content items (portfolio, blog, testimonials, services, ...)

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Open set of type-specific fields, kept opaque by the synchronizer.
pub type Fields = serde_json::Map<String, Value>;

/// JSON keys owned by the synchronizer; patches never overwrite them.
pub const MANAGED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Bounds every per-type field payload must satisfy.
pub trait ContentFields: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> ContentFields for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// A validated content type name, used as URL segment and cache key part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentType(String);

impl ContentType {
    pub const PORTFOLIO: &'static str = "portfolio";
    pub const BLOG: &'static str = "blog";
    pub const TESTIMONIALS: &'static str = "testimonials";
    pub const SERVICES: &'static str = "services";

    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Content type cannot be empty".to_string(),
            ));
        }
        let valid = name
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_');
        if !valid {
            return Err(Error::InvalidInput(format!(
                "Content type '{name}' may only contain a-z, 0-9, '-' and '_'"
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContentType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.0
    }
}

/// Identifier of a content item. Locally created ids are UUID v7 (time-sortable);
/// items coming from the backend may carry any string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Generate a new unique, time-derived id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A content item: synchronizer-managed metadata plus flattened fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem<T = Fields> {
    pub id: ContentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: T,
}

impl<T> ContentItem<T> {
    /// Wrap fields into a fresh item; `created_at == updated_at`.
    #[must_use]
    pub fn new(fields: T) -> Self {
        let now = Utc::now();
        Self {
            id: ContentId::generate(),
            created_at: now,
            updated_at: now,
            fields,
        }
    }
}

impl<T: ContentFields> ContentItem<T> {
    /// Wrap caller-supplied fields into a fresh item, dropping any managed
    /// keys they carry.
    ///
    /// Fails when the fields do not serialize to a JSON object, or no longer
    /// deserialize into `T` once the managed keys are removed.
    pub fn from_fields(fields: T) -> Result<Self> {
        let mut map = match serde_json::to_value(&fields)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidInput(format!(
                    "Content fields must serialize to an object, got {other}"
                )))
            }
        };
        if !MANAGED_FIELDS.iter().any(|key| map.contains_key(*key)) {
            return Ok(Self::new(fields));
        }

        for key in MANAGED_FIELDS {
            map.remove(key);
        }
        let fields = serde_json::from_value(Value::Object(map))?;
        Ok(Self::new(fields))
    }

    /// Merge `patch` over this item's fields and refresh `updated_at`.
    ///
    /// Managed keys in the patch are ignored. Fails when the merged object no
    /// longer deserializes into `T`; `self` is left untouched in that case.
    pub fn patched(&self, patch: &Fields, now: DateTime<Utc>) -> Result<Self> {
        let mut merged = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidInput(format!(
                    "Content item did not serialize to an object: {other}"
                )))
            }
        };
        for (key, value) in patch {
            if !MANAGED_FIELDS.contains(&key.as_str()) {
                merged.insert(key.clone(), value.clone());
            }
        }

        let mut item: Self = serde_json::from_value(Value::Object(merged))?;
        item.updated_at = now;
        Ok(item)
    }
}

/// Parse a JSON object string into [`Fields`].
pub fn parse_fields(raw: &str) -> Result<Fields> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::InvalidInput(
            "Content fields must be a JSON object".to_string(),
        )),
    }
}
