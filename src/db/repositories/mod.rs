mod availability_repository;
mod course_repository;
mod organization_repository;
mod teacher_repository;
mod user_repository;

pub use availability_repository::PgAvailabilityStore;
pub use course_repository::CourseRepository;
pub use organization_repository::OrganizationRepository;
pub use teacher_repository::PgTeacherDirectory;
pub use user_repository::PgUserDirectory;
