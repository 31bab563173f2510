//! Authentication and authorization ports.

use uuid::Uuid;

use crate::domain::Owner;

/// Claims stored in JWT tokens. The token carries the user's public profile
/// so that every request arrives with a fully resolved viewer identity and
/// no user lookup is needed to stamp owner snapshots.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub name: String,
    pub surname: String,
    pub avatar: Option<String>,
    pub exp: i64,
}

impl TokenClaims {
    /// The owner snapshot this viewer stamps onto posts, comments and likes.
    pub fn owner(&self) -> Owner {
        Owner {
            id: self.user_id,
            name: self.name.clone(),
            surname: self.surname.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Generate an access token carrying the user's profile.
    fn generate_token(&self, owner: &Owner) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
