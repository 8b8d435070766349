use async_trait::async_trait;
use tracing::warn;

use crate::auth::{GoogleClaims, GoogleTokenVerifier};
use crate::error::{AppError, AppResult};

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verifies id tokens against Google's tokeninfo endpoint.
pub struct GoogleTokenInfoVerifier {
    http: reqwest::Client,
    endpoint: String,
}

impl GoogleTokenInfoVerifier {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: TOKENINFO_URL.to_string(),
        }
    }

    #[allow(unused)]
    pub fn with_endpoint(http: reqwest::Client, endpoint: String) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl GoogleTokenVerifier for GoogleTokenInfoVerifier {
    async fn verify(&self, token: &str) -> AppResult<GoogleClaims> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| {
                warn!("Google tokeninfo request failed: {}", e);
                AppError::Authentication("Google token could not be authenticated".to_string())
            })?;

        if !response.status().is_success() {
            return Err(AppError::Authentication(
                "Google token could not be authenticated".to_string(),
            ));
        }

        response.json::<GoogleClaims>().await.map_err(|e| {
            warn!("Google tokeninfo returned an unreadable body: {}", e);
            AppError::Authentication("Google token could not be authenticated".to_string())
        })
    }
}
