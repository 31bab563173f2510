//! MongoDB user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ripple_core::domain::User;
use ripple_core::error::RepoError;
use ripple_core::ports::UserRepository;

use crate::store::MongoConfig;

/// Stored form of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    surname: String,
    avatar: Option<String>,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            surname: doc.surname,
            avatar: doc.avatar,
            email: doc.email,
            password_hash: doc.password_hash,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<User> for UserDocument {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            avatar: user.avatar,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// MongoDB-backed user repository.
pub struct MongoUserRepository {
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub async fn connect(config: &MongoConfig) -> Result<Self, RepoError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        Ok(Self {
            users: client.database(&config.database).collection("users"),
        })
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let found = self
            .users
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let found = self
            .users
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(found.map(Into::into))
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let document: UserDocument = user.clone().into();

        self.users
            .replace_one(doc! { "_id": document.id.to_string() }, &document)
            .upsert(true)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(user)
    }
}
