use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    delete_availability, list_availability, replace_availability, update_availability,
    BookingsState,
};

pub fn booking_routes() -> Router<BookingsState> {
    Router::new()
        .route(
            "/teacher-availability",
            get(list_availability).post(replace_availability),
        )
        .route(
            "/teacher-availability/{id}",
            put(update_availability).delete(delete_availability),
        )
}
