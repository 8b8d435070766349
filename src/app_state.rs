use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::google::GoogleTokenInfoVerifier;
use crate::auth::{GoogleIdentityResolver, GoogleTokenVerifier, IdentityResolver, UserDirectory};
use crate::bookings::{AvailabilityStore, BookingService, TeacherDirectory};
use crate::config::Config;
use crate::db::repositories::{PgAvailabilityStore, PgTeacherDirectory, PgUserDirectory};
use crate::modules::auth::AuthState;
use crate::modules::bookings::BookingsState;
use crate::modules::payments::stripe::StripeHttpGateway;
use crate::modules::payments::PaymentsState;

/// Shared state: the pool, the configuration, and the per-module states
/// wired from them. All seams are built here, once, at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub bookings: BookingsState,
    pub auth: AuthState,
    pub payments: PaymentsState,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        let http = reqwest::Client::new();

        let store: Arc<dyn AvailabilityStore> = Arc::new(PgAvailabilityStore::new(db.clone()));
        let teachers: Arc<dyn TeacherDirectory> = Arc::new(PgTeacherDirectory::new(db.clone()));
        let users: Arc<dyn UserDirectory> = Arc::new(PgUserDirectory::new(db.clone()));
        let verifier: Arc<dyn GoogleTokenVerifier> =
            Arc::new(GoogleTokenInfoVerifier::new(http.clone()));
        let identity: Arc<dyn IdentityResolver> = Arc::new(GoogleIdentityResolver::new(
            verifier.clone(),
            users.clone(),
            config.auth.google_client_id.clone(),
        ));

        let bookings = BookingsState {
            service: Arc::new(BookingService::new(store, teachers)),
            identity,
            default_page_size: config.app.default_page_size,
        };

        let auth = AuthState {
            verifier,
            users,
            google_client_id: config.auth.google_client_id.clone(),
        };

        let payments = PaymentsState {
            gateway: Arc::new(StripeHttpGateway::new(http, config.stripe.secret_key.clone())),
            webhook_secret: config.stripe.webhook_secret.clone(),
            webhook_tolerance_secs: config.stripe.webhook_tolerance_secs,
        };

        Self {
            db,
            config,
            bookings,
            auth,
            payments,
        }
    }
}
