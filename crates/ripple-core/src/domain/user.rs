use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Owner;

/// User entity - the account behind authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub avatar: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(
        name: String,
        surname: String,
        avatar: Option<String>,
        email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            surname,
            avatar,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// The public-profile snapshot stamped onto posts, comments and likes
    /// this user creates.
    pub fn profile(&self) -> Owner {
        Owner {
            id: self.id,
            name: self.name.clone(),
            surname: self.surname.clone(),
            avatar: self.avatar.clone(),
        }
    }
}
