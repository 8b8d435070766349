use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{GoogleTokenVerifier, UserDirectory};
use crate::db::models::{NewUser, User};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn GoogleTokenVerifier>,
    pub users: Arc<dyn UserDirectory>,
    pub google_client_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckGoogleTokenBody {
    pub token: String,
    pub email: String,
    pub google_id: String,
}

#[derive(Debug, Serialize)]
pub struct CheckTokenResponse {
    pub details: User,
    pub is_teacher: bool,
}

/// Verifies a Google id token, double-checks it against the submitted
/// details, and finds or creates the matching user.
pub async fn check_google_token(
    State(state): State<AuthState>,
    Json(body): Json<CheckGoogleTokenBody>,
) -> AppResult<Json<CheckTokenResponse>> {
    let claims = state.verifier.verify(&body.token).await?;

    if claims.email != body.email
        || claims.sub != body.google_id
        || claims.aud != state.google_client_id
    {
        return Err(AppError::Authentication(
            "Google token could not be authenticated".to_string(),
        ));
    }

    let user = match state.users.find_by_google_id(&claims.sub).await? {
        Some(user) => user,
        None => {
            let name = claims.name.clone().unwrap_or_else(|| claims.email.clone());
            let created = state
                .users
                .create(&NewUser {
                    name,
                    email: claims.email.clone(),
                    google_id: Some(claims.sub.clone()),
                })
                .await?;
            info!(user_id = %created.id, "created user from Google sign-in");
            created
        }
    };

    let is_teacher = state.users.is_teacher(user.id).await?;

    Ok(Json(CheckTokenResponse {
        details: user,
        is_teacher,
    }))
}
