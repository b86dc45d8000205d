//! Content collection endpoints backing the synchronizer.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::ApiClient;
use crate::models::{ContentId, ContentItem, ContentType, Fields};
use crate::sync::ContentRemote;
use crate::Result;

fn collection_path(content_type: &ContentType) -> String {
    format!("/{content_type}")
}

/// Ids come from the backend and may hold any character, so the id segment
/// is percent-encoded.
fn item_path(content_type: &ContentType, id: &ContentId) -> String {
    format!("/{content_type}/{}", urlencoding::encode(id.as_str()))
}

impl ContentRemote for ApiClient {
    async fn list<T: DeserializeOwned + Send>(
        &self,
        content_type: &ContentType,
    ) -> Result<Vec<ContentItem<T>>> {
        self.send_json(Method::GET, &collection_path(content_type), |request| {
            request
        })
        .await
    }

    async fn create<T: Serialize + Sync>(
        &self,
        content_type: &ContentType,
        item: &ContentItem<T>,
    ) -> Result<()> {
        self.send(Method::POST, &collection_path(content_type), |request| {
            request.json(item)
        })
        .await?;
        debug!(%content_type, id = %item.id, "Content item created remotely");
        Ok(())
    }

    async fn update(
        &self,
        content_type: &ContentType,
        id: &ContentId,
        patch: &Fields,
    ) -> Result<()> {
        self.send(Method::PUT, &item_path(content_type, id), |request| {
            request.json(patch)
        })
        .await?;
        debug!(%content_type, %id, "Content item updated remotely");
        Ok(())
    }

    async fn delete(&self, content_type: &ContentType, id: &ContentId) -> Result<()> {
        self.send(Method::DELETE, &item_path(content_type, id), |request| request)
            .await?;
        debug!(%content_type, %id, "Content item deleted remotely");
        Ok(())
    }
}
