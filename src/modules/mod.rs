pub mod auth;
pub mod bookings;
pub mod courses;
pub mod payments;
