use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::signature::verify_signature;
use super::stripe::StripeGateway;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct PaymentsState {
    pub gateway: Arc<dyn StripeGateway>,
    pub webhook_secret: SecretString,
    pub webhook_tolerance_secs: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
}

impl Currency {
    fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentPayload {
    pub amount: i64,
    pub currency: Currency,
    pub course_package: String,
}

pub async fn create_payment_intent(
    State(state): State<PaymentsState>,
    Json(payload): Json<CreatePaymentIntentPayload>,
) -> AppResult<Json<Value>> {
    if payload.amount <= 0 {
        return Err(AppError::Validation(
            "amount must be a positive number of cents".to_string(),
        ));
    }
    let intent = state
        .gateway
        .create_payment_intent(
            payload.amount,
            payload.currency.as_str(),
            &payload.course_package,
        )
        .await?;
    Ok(Json(json!({ "secret": intent.client_secret })))
}

/// Stripe webhook sink. The signature is checked against the raw body
/// before anything is parsed; an unverifiable delivery is a 400.
pub async fn receive_stripe_webhook(
    State(state): State<PaymentsState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("missing Stripe-Signature header".to_string()))?;

    verify_signature(
        &body,
        signature,
        state.webhook_secret.expose_secret(),
        state.webhook_tolerance_secs,
        OffsetDateTime::now_utc(),
    )
    .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let event: Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("webhook body is not valid JSON".to_string()))?;

    match event["type"].as_str() {
        Some("payment_intent.succeeded") => {
            let intent_id = event["data"]["object"]["id"].as_str().unwrap_or("unknown");
            info!(intent_id, "payment intent succeeded");
        }
        Some(other) => {
            debug!(event_type = other, "unhandled webhook event type");
        }
        None => {
            return Err(AppError::BadRequest(
                "webhook event is missing a type".to_string(),
            ));
        }
    }

    Ok(Json(json!({ "received": true })))
}
