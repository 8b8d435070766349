pub mod google;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use uuid::Uuid;

use crate::db::models::{NewUser, User};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};

/// Claims returned by the external identity provider for a verified token.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoogleClaims {
    /// Stable Google subject id.
    pub sub: String,
    pub email: String,
    /// Audience, must match our configured client id.
    pub aud: String,
    pub name: Option<String>,
}

/// Verification of a bearer credential against the identity provider.
/// Failures are fail-fast; nothing here retries.
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> AppResult<GoogleClaims>;
}

/// User record lookup and creation keyed on the provider identity.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DatabaseError>;
    async fn create(&self, new_user: &NewUser) -> Result<User, DatabaseError>;
    async fn is_teacher(&self, user_id: Uuid) -> Result<bool, DatabaseError>;
}

/// Resolves the caller behind a bearer credential to a known user.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve_bearer(&self, token: &str) -> AppResult<User>;
}

/// Production resolver: verify the token with Google, then map the subject
/// to a local user. Unknown subjects are an authentication failure, not an
/// invitation to create an account.
pub struct GoogleIdentityResolver {
    verifier: Arc<dyn GoogleTokenVerifier>,
    users: Arc<dyn UserDirectory>,
    audience: String,
}

impl GoogleIdentityResolver {
    pub fn new(
        verifier: Arc<dyn GoogleTokenVerifier>,
        users: Arc<dyn UserDirectory>,
        audience: String,
    ) -> Self {
        Self {
            verifier,
            users,
            audience,
        }
    }
}

#[async_trait]
impl IdentityResolver for GoogleIdentityResolver {
    async fn resolve_bearer(&self, token: &str) -> AppResult<User> {
        let claims = self.verifier.verify(token).await?;
        if claims.aud != self.audience {
            return Err(AppError::Authentication(
                "token issued for a different audience".to_string(),
            ));
        }
        self.users
            .find_by_google_id(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("no account for this Google identity".to_string())
            })
    }
}

/// Pulls the bearer token out of the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Authentication("missing bearer credential".to_string()))
}
