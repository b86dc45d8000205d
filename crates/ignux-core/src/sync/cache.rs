//! Primary and fallback cache slots for content collections.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{ContentItem, ContentType};
use crate::storage::KeyValueStore;

/// Result of reading one cache slot.
#[derive(Debug)]
pub(crate) enum CacheRead<T> {
    Hit(Vec<ContentItem<T>>),
    Miss,
    /// Present but unreadable; carries the reason.
    Malformed(String),
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Primary,
    Fallback,
}

impl Slot {
    const fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

pub(crate) struct ContentCache<S> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> ContentCache<S> {
    pub(crate) const fn new(store: S, namespace: String) -> Self {
        Self { store, namespace }
    }

    /// `<namespace>_<type>`
    pub(crate) fn primary_key(&self, content_type: &ContentType) -> String {
        format!("{}_{content_type}", self.namespace)
    }

    /// `<namespace>_<type>_fallback`
    pub(crate) fn fallback_key(&self, content_type: &ContentType) -> String {
        format!("{}_{content_type}_fallback", self.namespace)
    }

    pub(crate) fn load_primary<T: DeserializeOwned>(
        &self,
        content_type: &ContentType,
    ) -> CacheRead<T> {
        self.load(Slot::Primary, &self.primary_key(content_type))
    }

    pub(crate) fn load_fallback<T: DeserializeOwned>(
        &self,
        content_type: &ContentType,
    ) -> CacheRead<T> {
        self.load(Slot::Fallback, &self.fallback_key(content_type))
    }

    /// Best effort: failures are logged and swallowed.
    pub(crate) fn save_primary<T: Serialize>(
        &self,
        content_type: &ContentType,
        items: &[ContentItem<T>],
    ) {
        self.save(Slot::Primary, &self.primary_key(content_type), items);
    }

    /// Best effort: failures are logged and swallowed.
    pub(crate) fn save_fallback<T: Serialize>(
        &self,
        content_type: &ContentType,
        items: &[ContentItem<T>],
    ) {
        self.save(Slot::Fallback, &self.fallback_key(content_type), items);
    }

    fn load<T: DeserializeOwned>(&self, slot: Slot, key: &str) -> CacheRead<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, slot = slot.label(), "Cache miss");
                return CacheRead::Miss;
            }
            Err(error) => {
                return CacheRead::Malformed(format!(
                    "Failed to read {} cache: {error}",
                    slot.label()
                ));
            }
        };

        match serde_json::from_str::<Vec<ContentItem<T>>>(&raw) {
            Ok(items) => {
                debug!(key, slot = slot.label(), count = items.len(), "Cache hit");
                CacheRead::Hit(items)
            }
            Err(error) => {
                warn!(key, slot = slot.label(), %error, "Ignoring malformed cache entry");
                CacheRead::Malformed(format!(
                    "Cached {} content is malformed: {error}",
                    slot.label()
                ))
            }
        }
    }

    fn save<T: Serialize>(&self, slot: Slot, key: &str, items: &[ContentItem<T>]) {
        let serialized = match serde_json::to_string(items) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(key, slot = slot.label(), %error, "Failed to serialize content for cache");
                return;
            }
        };
        if let Err(error) = self.store.set(key, &serialized) {
            warn!(key, slot = slot.label(), %error, "Failed to write content cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fields;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cache(store: &MemoryStore) -> ContentCache<MemoryStore> {
        ContentCache::new(store.clone(), "ignux_content".to_string())
    }

    fn portfolio() -> ContentType {
        ContentType::new(ContentType::PORTFOLIO).unwrap()
    }

    #[test]
    fn keys_follow_namespace_convention() {
        let cache = cache(&MemoryStore::new());
        assert_eq!(cache.primary_key(&portfolio()), "ignux_content_portfolio");
        assert_eq!(
            cache.fallback_key(&portfolio()),
            "ignux_content_portfolio_fallback"
        );
    }

    #[test]
    fn missing_key_is_a_miss() {
        let cache = cache(&MemoryStore::new());
        assert!(matches!(
            cache.load_primary::<Fields>(&portfolio()),
            CacheRead::Miss
        ));
    }

    #[test]
    fn malformed_value_is_reported_not_raised() {
        let store = MemoryStore::new();
        store.set("ignux_content_portfolio", "{oops").unwrap();
        match cache(&store).load_primary::<Fields>(&portfolio()) {
            CacheRead::Malformed(message) => assert!(message.contains("malformed")),
            other => panic!("unexpected read: {other:?}"),
        }
    }

    #[test]
    fn saved_items_load_back() {
        let store = MemoryStore::new();
        let cache = cache(&store);
        let item: ContentItem = serde_json::from_value(json!({
            "id": "1",
            "title": "X",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        cache.save_fallback(&portfolio(), &[item.clone()]);

        assert!(matches!(
            cache.load_primary::<Fields>(&portfolio()),
            CacheRead::Miss
        ));
        match cache.load_fallback::<Fields>(&portfolio()) {
            CacheRead::Hit(items) => assert_eq!(items, vec![item]),
            other => panic!("unexpected read: {other:?}"),
        }
    }
}
