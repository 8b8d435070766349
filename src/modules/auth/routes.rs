use axum::routing::post;
use axum::Router;

use super::handlers::{check_google_token, AuthState};

pub fn auth_routes() -> Router<AuthState> {
    Router::new().route("/google", post(check_google_token))
}
