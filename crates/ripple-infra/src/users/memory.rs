//! In-memory user repository - used as fallback when MongoDB is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ripple_core::domain::User;
use ripple_core::error::RepoError;
use ripple_core::ports::UserRepository;

/// In-memory user repository. Note: Accounts are lost on process restart.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = User::new(
            "Alice".to_owned(),
            "Doe".to_owned(),
            None,
            "alice@example.com".to_owned(),
            "hash".to_owned(),
        );
        let id = user.id;

        repo.save(user).await.unwrap();

        let by_id = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");

        let by_email = repo.find_by_email("alice@example.com").await.unwrap();
        assert!(by_email.is_some());

        let absent = repo.find_by_email("nobody@example.com").await.unwrap();
        assert!(absent.is_none());
    }
}
