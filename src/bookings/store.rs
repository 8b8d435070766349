use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{Teacher, TimeWindow, Timeframe, WindowEvent};
use crate::db::DatabaseError;

/// Persistence seam for availability windows. The Postgres implementation
/// lives in `db::repositories`; tests run against an in-memory one.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Windows owned by the teacher with `start > from` and `end < until`.
    /// Bounds are strict on both sides: a window that exactly touches a
    /// boundary is excluded. Ordered by start ascending, then paginated.
    async fn list(
        &self,
        teacher_id: Uuid,
        from: OffsetDateTime,
        until: OffsetDateTime,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TimeWindow>, DatabaseError>;

    /// Removes the teacher's windows strictly contained in `[start, end]`
    /// (`start_time > start AND end_time < end`). Windows that only
    /// partially overlap the range survive. Returns the number removed.
    async fn delete_contained(
        &self,
        teacher_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<u64, DatabaseError>;

    /// Clearing write path: delete-contained then insert the events, each
    /// stamped with the teacher id, as a single atomic unit. A concurrent
    /// reader never observes the half-cleared state.
    async fn replace(
        &self,
        teacher_id: Uuid,
        timeframe: Timeframe,
        events: &[WindowEvent],
    ) -> Result<Vec<TimeWindow>, DatabaseError>;

    async fn get(&self, id: Uuid) -> Result<Option<TimeWindow>, DatabaseError>;

    /// Patches start, end and title of an existing window. Returns `None`
    /// for an unknown id. Callers must have validated `end > start`.
    async fn update(
        &self,
        id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
        title: Option<String>,
    ) -> Result<Option<TimeWindow>, DatabaseError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Lookup of the teacher record belonging to an authenticated user.
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    async fn teacher_for_user(&self, user_id: Uuid) -> Result<Option<Teacher>, DatabaseError>;
}
