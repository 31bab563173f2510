//! MongoDB post store.
//!
//! One `posts` collection holds the whole aggregate per document. Mutations
//! of the embedded arrays are single update operations (`$push`/`$pull`
//! combined with a `$set` of `updated_at`), so concurrent comment/like
//! writes against the same post are serialized by the server and cannot lose
//! updates. Single-item reads filter with `$elemMatch` and project the
//! matched element only, so the full document never crosses the wire for a
//! one-element lookup.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::Deserialize;
use uuid::Uuid;

use async_trait::async_trait;

use ripple_core::ports::{CommentDocument, LikeDocument, PostDocument, PostStore, StoreError};

/// MongoDB connection configuration.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// MongoDB-backed post store.
pub struct MongoPostStore {
    posts: Collection<PostDocument>,
}

/// Positional-projection result: only the matched element of `comments`.
#[derive(Debug, Deserialize)]
struct CommentsProjection {
    #[serde(default)]
    comments: Vec<CommentDocument>,
}

/// Positional-projection result: only the matched element of `likes`.
#[derive(Debug, Deserialize)]
struct LikesProjection {
    #[serde(default)]
    likes: Vec<LikeDocument>,
}

impl MongoPostStore {
    /// Connect and verify the deployment is reachable.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        tracing::info!(database = %config.database, "Connecting to MongoDB...");

        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let db = client.database(&config.database);

        // The client connects lazily; ping now so a bad deployment surfaces
        // here instead of on the first request.
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!("MongoDB connected");

        Ok(Self {
            posts: db.collection("posts"),
        })
    }

    fn touch() -> Result<Bson, StoreError> {
        bson::to_bson(&Some(Utc::now())).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

fn query_err(e: mongodb::error::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn insert(&self, post: PostDocument) -> Result<Option<PostDocument>, StoreError> {
        let id = post.id;
        self.posts.insert_one(&post).await.map_err(query_err)?;

        // Read the stored form back; an unreadable write reports as absent
        // and the layer above treats that as failure.
        self.fetch_by_id(id).await
    }

    async fn fetch_all(&self) -> Result<Vec<PostDocument>, StoreError> {
        let cursor = self.posts.find(doc! {}).await.map_err(query_err)?;
        cursor.try_collect().await.map_err(query_err)
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<PostDocument>, StoreError> {
        self.posts
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(query_err)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.posts
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn append_comment(
        &self,
        post_id: Uuid,
        comment: CommentDocument,
    ) -> Result<Option<PostDocument>, StoreError> {
        let comment =
            bson::to_bson(&comment).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.posts
            .find_one_and_update(
                doc! { "_id": post_id.to_string() },
                doc! {
                    "$push": { "comments": comment },
                    "$set": { "updated_at": Self::touch()? },
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(query_err)
    }

    async fn fetch_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<CommentDocument>, StoreError> {
        let found = self
            .posts
            .clone_with_type::<CommentsProjection>()
            .find_one(doc! {
                "_id": post_id.to_string(),
                "comments": { "$elemMatch": { "_id": comment_id.to_string() } },
            })
            .projection(doc! { "comments.$": 1 })
            .await
            .map_err(query_err)?;

        Ok(found.and_then(|mut p| p.comments.pop()))
    }

    async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<(), StoreError> {
        self.posts
            .update_one(
                doc! { "_id": post_id.to_string() },
                doc! {
                    "$pull": { "comments": { "_id": comment_id.to_string() } },
                    "$set": { "updated_at": Self::touch()? },
                },
            )
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn append_like(
        &self,
        post_id: Uuid,
        like: LikeDocument,
    ) -> Result<Option<PostDocument>, StoreError> {
        let like = bson::to_bson(&like).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.posts
            .find_one_and_update(
                doc! { "_id": post_id.to_string() },
                doc! {
                    "$push": { "likes": like },
                    "$set": { "updated_at": Self::touch()? },
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(query_err)
    }

    async fn fetch_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<LikeDocument>, StoreError> {
        let found = self
            .posts
            .clone_with_type::<LikesProjection>()
            .find_one(doc! {
                "_id": post_id.to_string(),
                "likes": { "$elemMatch": { "owner.user": owner_id.to_string() } },
            })
            .projection(doc! { "likes.$": 1 })
            .await
            .map_err(query_err)?;

        Ok(found.and_then(|mut p| p.likes.pop()))
    }

    async fn remove_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), StoreError> {
        self.posts
            .update_one(
                doc! { "_id": post_id.to_string() },
                doc! {
                    "$pull": { "likes": { "owner.user": owner_id.to_string() } },
                    "$set": { "updated_at": Self::touch()? },
                },
            )
            .await
            .map_err(query_err)?;
        Ok(())
    }
}
