//! Nested-document store port.
//!
//! The post aggregate is persisted as one document embedding its comments and
//! likes. Every mutation of the embedded collections is a single targeted
//! update against that document - never fetch-mutate-store in application
//! code - so two requests racing on the same post cannot lose each other's
//! comment or like. Single-item reads are pushed down as filter-and-project
//! operations so a post with thousands of comments is not deserialized to
//! answer "does user X's like exist".

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner as stored on disk: a foreign-key-shaped reference to the users
/// collection plus the denormalized profile snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub user: Uuid,
    pub name: String,
    pub surname: String,
    pub avatar: Option<String>,
}

/// Stored form of the post aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub body: String,
    pub owner: OwnerRecord,
    #[serde(default)]
    pub comments: Vec<CommentDocument>,
    #[serde(default)]
    pub likes: Vec<LikeDocument>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Stored form of an embedded comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub body: String,
    pub owner: OwnerRecord,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Stored form of an embedded like. Identified by `owner.user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeDocument {
    pub owner: OwnerRecord,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Post store trait - abstraction over document storage backends
/// (MongoDB, in-memory).
///
/// Absence is always data here (`None`), never an error. `StoreError` is
/// reserved for infrastructure failure: connection loss, malformed data,
/// rejected queries.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Store a new post. Returns the stored form, or `None` if the write
    /// did not take effect - callers treat that as failure, not absence.
    async fn insert(&self, post: PostDocument) -> Result<Option<PostDocument>, StoreError>;

    /// Every stored post. Order is stable across calls absent mutation, but
    /// otherwise unspecified.
    async fn fetch_all(&self) -> Result<Vec<PostDocument>, StoreError>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<PostDocument>, StoreError>;

    /// Remove the whole document, embedded comments and likes included.
    /// Idempotent: deleting an absent post succeeds.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    /// Atomically add `comment` to the post's comment array and refresh
    /// `updated_at`. Returns the entire updated post so the caller can
    /// observe the new comment without a second round trip, or `None` if
    /// the post does not exist.
    async fn append_comment(
        &self,
        post_id: Uuid,
        comment: CommentDocument,
    ) -> Result<Option<PostDocument>, StoreError>;

    /// Fetch a single comment by filter-and-project. `None` covers both
    /// "post absent" and "comment absent within the post" - this operation
    /// does not distinguish them.
    async fn fetch_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<CommentDocument>, StoreError>;

    /// Atomically remove the matching comment. No-op if the post or the
    /// comment does not exist.
    async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<(), StoreError>;

    /// Atomically add `like` and refresh `updated_at`. Returns the updated
    /// post, or `None` if the post does not exist. No uniqueness check:
    /// callers are expected to have verified "not already liked" first.
    async fn append_like(
        &self,
        post_id: Uuid,
        like: LikeDocument,
    ) -> Result<Option<PostDocument>, StoreError>;

    /// Fetch a single like by its owner id, same filter-and-project
    /// technique (and the same collapsed absence) as `fetch_comment`.
    async fn fetch_like_by_owner(
        &self,
        post_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<LikeDocument>, StoreError>;

    /// Atomically remove the like owned by `owner_id`. No-op if absent.
    async fn remove_like_by_owner(&self, post_id: Uuid, owner_id: Uuid)
    -> Result<(), StoreError>;
}

/// Store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Query(String),
}
