//! Application state - shared across all handlers.

use std::sync::Arc;

use ripple_core::ports::{PasswordService, PostStore, TokenService, UserRepository};
use ripple_core::{PostRepository, PostService};
use ripple_infra::auth::{Argon2PasswordService, JwtTokenService};
use ripple_infra::store::InMemoryPostStore;
use ripple_infra::users::InMemoryUserRepository;

#[cfg(feature = "mongo")]
use ripple_infra::store::MongoPostStore;
#[cfg(feature = "mongo")]
use ripple_infra::users::MongoUserRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "mongo")]
        let (store, users): (Arc<dyn PostStore>, Arc<dyn UserRepository>) = {
            match &config.mongo {
                Some(mongo) => match Self::connect_mongo(mongo).await {
                    Ok(backends) => backends,
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to MongoDB: {}. Using in-memory fallback.",
                            e
                        );
                        Self::memory_backends()
                    }
                },
                None => {
                    tracing::warn!("MONGO_URI not set. Running without database (in-memory mode).");
                    Self::memory_backends()
                }
            }
        };

        #[cfg(not(feature = "mongo"))]
        let (store, users): (Arc<dyn PostStore>, Arc<dyn UserRepository>) = {
            tracing::info!("Running without mongo feature - using in-memory storage");
            Self::memory_backends()
        };

        tracing::info!("Application state initialized");

        Self {
            posts: PostService::new(PostRepository::new(store)),
            users,
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    fn memory_backends() -> (Arc<dyn PostStore>, Arc<dyn UserRepository>) {
        (
            Arc::new(InMemoryPostStore::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }

    #[cfg(feature = "mongo")]
    async fn connect_mongo(
        config: &ripple_infra::MongoConfig,
    ) -> Result<(Arc<dyn PostStore>, Arc<dyn UserRepository>), String> {
        let store = MongoPostStore::connect(config)
            .await
            .map_err(|e| e.to_string())?;
        let users = MongoUserRepository::connect(config)
            .await
            .map_err(|e| e.to_string())?;

        Ok((Arc::new(store), Arc::new(users)))
    }
}
