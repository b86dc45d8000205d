use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{ContentId, ContentItem, ContentType, Fields};
use crate::Result;

/// Remote source of truth for content collections.
///
/// Implemented by [`crate::api::ApiClient`]; tests substitute in-memory fakes.
pub trait ContentRemote: Send + Sync {
    /// `GET <base>/<type>`
    fn list<T: DeserializeOwned + Send>(
        &self,
        content_type: &ContentType,
    ) -> impl Future<Output = Result<Vec<ContentItem<T>>>> + Send;

    /// `POST <base>/<type>` with the full item as body
    fn create<T: Serialize + Sync>(
        &self,
        content_type: &ContentType,
        item: &ContentItem<T>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `PUT <base>/<type>/<id>` with the patch as body
    fn update(
        &self,
        content_type: &ContentType,
        id: &ContentId,
        patch: &Fields,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `DELETE <base>/<type>/<id>`
    fn delete(
        &self,
        content_type: &ContentType,
        id: &ContentId,
    ) -> impl Future<Output = Result<()>> + Send;
}
