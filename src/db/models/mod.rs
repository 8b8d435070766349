mod course;
mod organization;
mod payment;
mod time_window;
mod user;

pub use course::*;
pub use organization::*;
pub use payment::*;
pub use time_window::*;
pub use user::*;
