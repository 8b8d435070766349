pub mod service;
pub mod store;

#[cfg(test)]
pub mod testing;

pub use service::BookingService;
pub use store::{AvailabilityStore, TeacherDirectory};
