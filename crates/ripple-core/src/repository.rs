//! Post repository adapter.
//!
//! Translates between the store's wire shape (owner as a foreign-key-shaped
//! record, `_id` fields) and the domain shape (owner flattened into a value
//! object). Every method mirrors one store operation 1:1; absence from the
//! store comes back as `None`, never as an error. No business rules live
//! here - ownership and existence enforcement is the domain service's job.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Like, Owner, Post};
use crate::ports::{
    CommentDocument, LikeDocument, OwnerRecord, PostDocument, PostStore, StoreError,
};

impl From<OwnerRecord> for Owner {
    fn from(record: OwnerRecord) -> Self {
        Self {
            id: record.user,
            name: record.name,
            surname: record.surname,
            avatar: record.avatar,
        }
    }
}

impl From<Owner> for OwnerRecord {
    fn from(owner: Owner) -> Self {
        Self {
            user: owner.id,
            name: owner.name,
            surname: owner.surname,
            avatar: owner.avatar,
        }
    }
}

impl From<CommentDocument> for Comment {
    fn from(doc: CommentDocument) -> Self {
        Self {
            id: doc.id,
            body: doc.body,
            owner: doc.owner.into(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<Comment> for CommentDocument {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            owner: comment.owner.into(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<LikeDocument> for Like {
    fn from(doc: LikeDocument) -> Self {
        Self {
            owner: doc.owner.into(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<Like> for LikeDocument {
    fn from(like: Like) -> Self {
        Self {
            owner: like.owner.into(),
            created_at: like.created_at,
            updated_at: like.updated_at,
        }
    }
}

/// The translation is recursive: post owner, every comment's owner and every
/// like's owner are all reshaped.
impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: doc.id,
            body: doc.body,
            owner: doc.owner.into(),
            comments: doc.comments.into_iter().map(Into::into).collect(),
            likes: doc.likes.into_iter().map(Into::into).collect(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<Post> for PostDocument {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            body: post.body,
            owner: post.owner.into(),
            comments: post.comments.into_iter().map(Into::into).collect(),
            likes: post.likes.into_iter().map(Into::into).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Post repository over a document store.
#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn PostStore>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn insert(&self, post: Post) -> Result<Option<Post>, StoreError> {
        let stored = self.store.insert(post.into()).await?;
        Ok(stored.map(Into::into))
    }

    pub async fn fetch_all(&self) -> Result<Vec<Post>, StoreError> {
        let docs = self.store.fetch_all().await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let doc = self.store.fetch_by_id(id).await?;
        Ok(doc.map(Into::into))
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete_by_id(id).await
    }

    pub async fn append_comment(
        &self,
        post_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Post>, StoreError> {
        let doc = self.store.append_comment(post_id, comment.into()).await?;
        Ok(doc.map(Into::into))
    }

    pub async fn fetch_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, StoreError> {
        let doc = self.store.fetch_comment(post_id, comment_id).await?;
        Ok(doc.map(Into::into))
    }

    pub async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<(), StoreError> {
        self.store.remove_comment(post_id, comment_id).await
    }

    pub async fn append_like(&self, post_id: Uuid, like: Like) -> Result<Option<Post>, StoreError> {
        let doc = self.store.append_like(post_id, like.into()).await?;
        Ok(doc.map(Into::into))
    }

    pub async fn fetch_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Like>, StoreError> {
        let doc = self.store.fetch_like_by_owner(post_id, owner_id).await?;
        Ok(doc.map(Into::into))
    }

    pub async fn remove_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), StoreError> {
        self.store.remove_like_by_owner(post_id, owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(name: &str) -> Owner {
        Owner {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            surname: "Doe".to_owned(),
            avatar: Some(format!("https://cdn.example/{name}.png")),
        }
    }

    #[test]
    fn post_round_trips_through_document_shape() {
        let alice = owner("alice");
        let bob = owner("bob");

        let mut post = Post::new(alice.clone(), "hello world".to_owned());
        post.comments.push(Comment::new(bob.clone(), "hi".to_owned()));
        post.likes.push(Like::new(bob.clone()));

        let doc: PostDocument = post.clone().into();
        let back: Post = doc.into();

        assert_eq!(back.id, post.id);
        assert_eq!(back.body, post.body);
        assert_eq!(back.owner, alice);
        assert_eq!(back.comments.len(), 1);
        assert_eq!(back.comments[0].body, "hi");
        assert_eq!(back.comments[0].owner, bob);
        assert_eq!(back.likes.len(), 1);
        assert_eq!(back.likes[0].owner.id, bob.id);
        assert_eq!(back.created_at, post.created_at);
        assert_eq!(back.updated_at, post.updated_at);
    }

    #[test]
    fn owner_record_carries_fk_shaped_reference() {
        let alice = owner("alice");
        let record: OwnerRecord = alice.clone().into();

        assert_eq!(record.user, alice.id);
        assert_eq!(record.name, alice.name);

        let back: Owner = record.into();
        assert_eq!(back, alice);
    }

    #[test]
    fn missing_updated_at_maps_to_absent() {
        let doc = PostDocument {
            id: Uuid::new_v4(),
            body: "legacy".to_owned(),
            owner: owner("alice").into(),
            comments: Vec::new(),
            likes: Vec::new(),
            created_at: chrono::Utc::now(),
            updated_at: None,
        };

        let post: Post = doc.into();
        assert!(post.updated_at.is_none());
    }
}
