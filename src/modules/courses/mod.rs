pub mod handlers;
pub mod routes;

pub use routes::course_routes;
