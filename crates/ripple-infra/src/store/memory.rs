//! In-memory post store - used as fallback when MongoDB is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use ripple_core::ports::{CommentDocument, LikeDocument, PostDocument, PostStore, StoreError};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Every mutation takes the write lock and edits the embedded array in
/// place, so mutations to the same document are serialized and a reader can
/// never observe a torn array - the same guarantee the Mongo store gets from
/// atomic update operators. Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<Uuid, PostDocument>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: PostDocument) -> Result<Option<PostDocument>, StoreError> {
        let mut posts = self.posts.write().await;
        let stored = post.clone();
        posts.insert(post.id, post);
        Ok(Some(stored))
    }

    async fn fetch_all(&self) -> Result<Vec<PostDocument>, StoreError> {
        let posts = self.posts.read().await;
        let mut all: Vec<PostDocument> = posts.values().cloned().collect();
        // Map iteration order is arbitrary; sort for a stable listing.
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<PostDocument>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        posts.remove(&id);
        Ok(())
    }

    async fn append_comment(
        &self,
        post_id: Uuid,
        comment: CommentDocument,
    ) -> Result<Option<PostDocument>, StoreError> {
        let mut posts = self.posts.write().await;

        let Some(post) = posts.get_mut(&post_id) else {
            return Ok(None);
        };

        post.comments.push(comment);
        post.updated_at = Some(Utc::now());
        Ok(Some(post.clone()))
    }

    async fn fetch_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<CommentDocument>, StoreError> {
        let posts = self.posts.read().await;

        Ok(posts
            .get(&post_id)
            .and_then(|post| post.comments.iter().find(|c| c.id == comment_id))
            .cloned())
    }

    async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;

        if let Some(post) = posts.get_mut(&post_id) {
            post.comments.retain(|c| c.id != comment_id);
            post.updated_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn append_like(
        &self,
        post_id: Uuid,
        like: LikeDocument,
    ) -> Result<Option<PostDocument>, StoreError> {
        let mut posts = self.posts.write().await;

        let Some(post) = posts.get_mut(&post_id) else {
            return Ok(None);
        };

        post.likes.push(like);
        post.updated_at = Some(Utc::now());
        Ok(Some(post.clone()))
    }

    async fn fetch_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<LikeDocument>, StoreError> {
        let posts = self.posts.read().await;

        Ok(posts
            .get(&post_id)
            .and_then(|post| post.likes.iter().find(|l| l.owner.user == owner_id))
            .cloned())
    }

    async fn remove_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;

        if let Some(post) = posts.get_mut(&post_id) {
            post.likes.retain(|l| l.owner.user != owner_id);
            post.updated_at = Some(Utc::now());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::ports::OwnerRecord;

    fn record(name: &str) -> OwnerRecord {
        OwnerRecord {
            user: Uuid::new_v4(),
            name: name.to_owned(),
            surname: "Doe".to_owned(),
            avatar: None,
        }
    }

    fn post_doc(owner: OwnerRecord) -> PostDocument {
        let now = Utc::now();
        PostDocument {
            id: Uuid::new_v4(),
            body: "a post".to_owned(),
            owner,
            comments: Vec::new(),
            likes: Vec::new(),
            created_at: now,
            updated_at: Some(now),
        }
    }

    fn comment_doc(owner: OwnerRecord, body: &str) -> CommentDocument {
        let now = Utc::now();
        CommentDocument {
            id: Uuid::new_v4(),
            body: body.to_owned(),
            owner,
            created_at: now,
            updated_at: Some(now),
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let store = InMemoryPostStore::new();
        let post = post_doc(record("alice"));
        let id = post.id;

        let stored = store.insert(post).await.unwrap();
        assert!(stored.is_some());

        let fetched = store.fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert!(fetched.comments.is_empty());
    }

    #[tokio::test]
    async fn test_append_comment_returns_updated_post() {
        let store = InMemoryPostStore::new();
        let post = post_doc(record("alice"));
        let id = post.id;
        store.insert(post).await.unwrap();

        let comment = comment_doc(record("bob"), "hi");
        let comment_id = comment.id;

        let updated = store.append_comment(id, comment).await.unwrap().unwrap();
        assert_eq!(updated.comments.len(), 1);
        assert_eq!(updated.comments[0].id, comment_id);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_append_comment_to_missing_post_is_absent() {
        let store = InMemoryPostStore::new();
        let comment = comment_doc(record("bob"), "into the void");

        let result = store.append_comment(Uuid::new_v4(), comment).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_comment_collapses_absence_cases() {
        let store = InMemoryPostStore::new();
        let post = post_doc(record("alice"));
        let id = post.id;
        store.insert(post).await.unwrap();

        // Missing post and missing comment look the same to the caller.
        let missing_post = store.fetch_comment(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
        let missing_comment = store.fetch_comment(id, Uuid::new_v4()).await.unwrap();
        assert!(missing_post.is_none());
        assert!(missing_comment.is_none());
    }

    #[tokio::test]
    async fn test_remove_comment_is_noop_on_absence() {
        let store = InMemoryPostStore::new();
        let post = post_doc(record("alice"));
        let id = post.id;
        store.insert(post).await.unwrap();

        store.remove_comment(id, Uuid::new_v4()).await.unwrap();
        store.remove_comment(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();

        assert!(store.fetch_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryPostStore::new();
        let post = post_doc(record("alice"));
        let id = post.id;
        store.insert(post).await.unwrap();

        store.delete_by_id(id).await.unwrap();
        store.delete_by_id(id).await.unwrap();
        assert!(store.fetch_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_like_lifecycle() {
        let store = InMemoryPostStore::new();
        let post = post_doc(record("alice"));
        let id = post.id;
        store.insert(post).await.unwrap();

        let carol = record("carol");
        let carol_id = carol.user;
        let now = Utc::now();
        let like = LikeDocument {
            owner: carol,
            created_at: now,
            updated_at: Some(now),
        };

        let updated = store.append_like(id, like).await.unwrap().unwrap();
        assert_eq!(updated.likes.len(), 1);

        let found = store.fetch_like_by_owner(id, carol_id).await.unwrap();
        assert!(found.is_some());

        store.remove_like_by_owner(id, carol_id).await.unwrap();
        let found = store.fetch_like_by_owner(id, carol_id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_is_ordered_by_creation() {
        let store = InMemoryPostStore::new();
        let base = Utc::now();

        let mut ids = Vec::new();
        for i in 0..3 {
            let mut post = post_doc(record("alice"));
            post.created_at = base + chrono::TimeDelta::seconds(i);
            ids.push(post.id);
            store.insert(post).await.unwrap();
        }

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 3);
        let fetched: Vec<Uuid> = all.iter().map(|p| p.id).collect();
        assert_eq!(fetched, ids);
    }
}
