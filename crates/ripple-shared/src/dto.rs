//! Data Transfer Objects - request/response types for the API.
//!
//! Timestamps are rendered as RFC 3339 strings at this boundary; everything
//! below it works with `DateTime<Utc>` values.

use serde::{Deserialize, Serialize};

use ripple_core::domain::{Comment, Like, Owner, Post};
use ripple_core::projection::{ProjectedComment, ProjectedPost};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub surname: String,
    pub avatar: Option<String>,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub avatar: Option<String>,
    pub email: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// Author snapshot as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub avatar: Option<String>,
}

impl From<Owner> for OwnerResponse {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id.to_string(),
            name: owner.name,
            surname: owner.surname,
            avatar: owner.avatar,
        }
    }
}

/// Comment as rendered to clients, without viewer-relative fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub body: String,
    pub owner: OwnerResponse,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            body: comment.body,
            owner: comment.owner.into(),
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Like as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub owner: OwnerResponse,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self {
            owner: like.owner.into(),
            created_at: like.created_at.to_rfc3339(),
            updated_at: like.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Post as rendered on the unauthenticated reads: the bare domain shape,
/// no viewer-relative fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub body: String,
    pub owner: OwnerResponse,
    pub comments: Vec<CommentResponse>,
    pub likes: Vec<LikeResponse>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            body: post.body,
            owner: post.owner.into(),
            comments: post.comments.into_iter().map(Into::into).collect(),
            likes: post.likes.into_iter().map(Into::into).collect(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Comment as rendered on authenticated reads, annotated for the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedCommentResponse {
    pub id: String,
    pub body: String,
    pub owner: OwnerResponse,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub user_is_owner: bool,
}

impl From<ProjectedComment> for ExtendedCommentResponse {
    fn from(projected: ProjectedComment) -> Self {
        let comment = projected.comment;
        Self {
            id: comment.id.to_string(),
            body: comment.body,
            owner: comment.owner.into(),
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.map(|t| t.to_rfc3339()),
            user_is_owner: projected.user_is_owner,
        }
    }
}

/// Post as rendered on authenticated reads and mutate-and-return operations,
/// annotated for the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedPostResponse {
    pub id: String,
    pub body: String,
    pub owner: OwnerResponse,
    pub comments: Vec<ExtendedCommentResponse>,
    pub likes: Vec<LikeResponse>,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub user_is_owner: bool,
    pub user_has_liked: bool,
}

impl From<ProjectedPost> for ExtendedPostResponse {
    fn from(projected: ProjectedPost) -> Self {
        Self {
            id: projected.id.to_string(),
            body: projected.body,
            owner: projected.owner.into(),
            comments: projected.comments.into_iter().map(Into::into).collect(),
            likes: projected.likes.into_iter().map(Into::into).collect(),
            created_at: projected.created_at.to_rfc3339(),
            updated_at: projected.updated_at.map(|t| t.to_rfc3339()),
            user_is_owner: projected.user_is_owner,
            user_has_liked: projected.user_has_liked,
        }
    }
}
