pub mod handlers;
pub mod routes;

pub use handlers::BookingsState;
pub use routes::booking_routes;
