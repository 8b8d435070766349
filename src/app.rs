use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::{
    app_state::AppState,
    middleware::request_observability,
    modules::{
        auth::auth_routes, bookings::booking_routes, courses::course_routes,
        payments::payment_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    let bookings = booking_routes().with_state(state.bookings.clone());
    let auth = auth_routes().with_state(state.auth.clone());
    let payments = payment_routes().with_state(state.payments.clone());

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/bookings", bookings)
        .nest("/auth", auth)
        .nest("/courses", course_routes())
        .nest("/payment", payments)
        .layer(middleware::from_fn(request_observability))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Tutoring backend says hello!\n"
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status
        }
    }))
}
