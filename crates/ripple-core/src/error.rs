//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::StoreError;

/// Post subsystem errors - the full taxonomy of ways a post operation can
/// fail. Only the domain service produces these; the repository and store
/// below it report absence as data, never as an error.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    #[error("Comment {comment_id} not found in post {post_id}")]
    CommentNotFound { post_id: Uuid, comment_id: Uuid },

    #[error("Only the post owner may delete a post")]
    NotPostOwner,

    #[error("Only the comment owner may delete a comment")]
    NotCommentOwner,

    #[error("Post is not liked by this user")]
    NotLiked,

    #[error("Storage failure during {operation}: {detail}")]
    Storage {
        operation: &'static str,
        detail: String,
    },
}

impl PostError {
    /// Rewrap a store failure with the name of the domain operation it
    /// interrupted. The store's native error value never crosses this
    /// boundary, only its description.
    pub fn storage(operation: &'static str, err: StoreError) -> Self {
        Self::Storage {
            operation,
            detail: err.to_string(),
        }
    }
}

/// User-repository errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
