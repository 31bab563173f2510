use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of a user's public profile, copied onto a post, comment or like
/// at creation time. Never updated afterwards, even if the user renames
/// themselves or changes their avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub avatar: Option<String>,
}

/// Post aggregate root. Comments and likes are embedded: the whole aggregate
/// is persisted and fetched as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub body: String,
    pub owner: Owner,
    /// Insertion order is chronological order. No two comments share an id.
    pub comments: Vec<Comment>,
    /// Unique by owner id - one like per user per post.
    pub likes: Vec<Like>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new, empty post owned by `owner`.
    pub fn new(owner: Owner, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            body,
            owner,
            comments: Vec::new(),
            likes: Vec::new(),
            created_at: now,
            updated_at: Some(now),
        }
    }
}

/// Comment embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub body: String,
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(owner: Owner, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            body,
            owner,
            created_at: now,
            updated_at: Some(now),
        }
    }
}

/// Like embedded in a post. Identified by `owner.id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Like {
    pub fn new(owner: Owner) -> Self {
        let now = Utc::now();
        Self {
            owner,
            created_at: now,
            updated_at: Some(now),
        }
    }
}
