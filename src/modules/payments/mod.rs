pub mod handlers;
pub mod routes;
pub mod signature;
pub mod stripe;

pub use handlers::PaymentsState;
pub use routes::payment_routes;
