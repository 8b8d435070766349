use axum::routing::post;
use axum::Router;

use super::handlers::{create_payment_intent, receive_stripe_webhook, PaymentsState};

pub fn payment_routes() -> Router<PaymentsState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/stripe-webhook", post(receive_stripe_webhook))
}
