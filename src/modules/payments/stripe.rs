use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::warn;

use crate::error::{AppError, AppResult};

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Outbound seam to the payment processor. One call, no retries, no local
/// reconciliation.
#[async_trait]
pub trait StripeGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        course_package: &str,
    ) -> AppResult<PaymentIntent>;
}

pub struct StripeHttpGateway {
    http: reqwest::Client,
    secret_key: SecretString,
}

impl StripeHttpGateway {
    pub fn new(http: reqwest::Client, secret_key: SecretString) -> Self {
        Self { http, secret_key }
    }
}

#[async_trait]
impl StripeGateway for StripeHttpGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        course_package: &str,
    ) -> AppResult<PaymentIntent> {
        let response = self
            .http
            .post(PAYMENT_INTENTS_URL)
            .bearer_auth(self.secret_key.expose_secret())
            .form(&[
                ("amount", amount.to_string()),
                ("currency", currency.to_string()),
                ("metadata[course_package]", course_package.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("payment intent request failed: {}", e);
                AppError::Upstream("payment processor unreachable".to_string())
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "payment processor rejected the request");
            return Err(AppError::Upstream(
                "payment processor rejected the request".to_string(),
            ));
        }

        response.json::<PaymentIntent>().await.map_err(|e| {
            warn!("payment processor returned an unreadable body: {}", e);
            AppError::Upstream("payment processor returned an unreadable body".to_string())
        })
    }
}
