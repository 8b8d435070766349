use std::sync::Arc;

use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::bookings::store::{AvailabilityStore, TeacherDirectory};
use crate::db::models::{chronological, Teacher, TimeWindow, Timeframe, UpdateAvailabilityPayload, WindowEvent};
use crate::error::{AppError, AppResult};

/// Booking core: clearing policy on writes, ownership-scoped reads.
///
/// Every call resolves the caller's teacher record fresh; authorization is
/// never cached. Two concurrent replaces over overlapping timeframes race
/// and the last write wins, which is an accepted limitation.
pub struct BookingService {
    store: Arc<dyn AvailabilityStore>,
    teachers: Arc<dyn TeacherDirectory>,
}

impl BookingService {
    pub fn new(store: Arc<dyn AvailabilityStore>, teachers: Arc<dyn TeacherDirectory>) -> Self {
        Self { store, teachers }
    }

    /// The caller may only touch windows of the teacher record tied to
    /// their own identity; no teacher record means nothing to query.
    async fn resolve_teacher(&self, user_id: Uuid) -> AppResult<Teacher> {
        self.teachers
            .teacher_for_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No teacher found for user {user_id}")))
    }

    pub async fn list_windows(
        &self,
        user_id: Uuid,
        from: OffsetDateTime,
        until: OffsetDateTime,
        limit: i64,
        page: i64,
    ) -> AppResult<Vec<TimeWindow>> {
        let teacher = self.resolve_teacher(user_id).await?;
        let offset = page * limit;
        let windows = self
            .store
            .list(teacher.id, from, until, limit, offset)
            .await?;
        Ok(windows)
    }

    /// Bulk replace: clears the teacher's windows strictly contained in the
    /// timeframe, then inserts the supplied events under caller-chosen ids.
    /// Every event is validated before any write; one bad event rejects the
    /// whole batch.
    pub async fn replace_windows(
        &self,
        user_id: Uuid,
        timeframe: Timeframe,
        events: Vec<WindowEvent>,
    ) -> AppResult<Vec<TimeWindow>> {
        let teacher = self.resolve_teacher(user_id).await?;
        for event in &events {
            if !chronological(event.start, event.end) {
                return Err(AppError::Validation(format!(
                    "event {}: end must be after start",
                    event.id
                )));
            }
        }
        let inserted = self.store.replace(teacher.id, timeframe, &events).await?;
        debug!(
            teacher_id = %teacher.id,
            inserted = inserted.len(),
            "replaced availability within timeframe"
        );
        Ok(inserted)
    }

    pub async fn update_window(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: &UpdateAvailabilityPayload,
    ) -> AppResult<TimeWindow> {
        let teacher = self.resolve_teacher(user_id).await?;
        let window = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No availability window {id}")))?;
        if window.teacher_id != teacher.id {
            return Err(AppError::PermissionDenied(format!(
                "availability window {id} belongs to another teacher"
            )));
        }
        if !chronological(payload.start, payload.end) {
            return Err(AppError::Validation("end must be after start".to_string()));
        }
        self.store
            .update(id, payload.start, payload.end, payload.title.clone())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No availability window {id}")))
    }

    pub async fn delete_window(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let teacher = self.resolve_teacher(user_id).await?;
        let window = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No availability window {id}")))?;
        if window.teacher_id != teacher.id {
            return Err(AppError::PermissionDenied(format!(
                "availability window {id} belongs to another teacher"
            )));
        }
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("No availability window {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::testing::{fixture_schedule, window, Fixture};
    use time::macros::datetime;

    #[tokio::test]
    async fn list_returns_all_windows_in_a_wide_range() {
        let fx = Fixture::with_schedule();
        let windows = fx
            .service
            .list_windows(
                fx.user_id,
                datetime!(2022-06-20 00:00 UTC),
                datetime!(2022-07-20 00:00 UTC),
                100,
                0,
            )
            .await
            .unwrap();
        assert_eq!(windows.len(), 3);
    }

    #[tokio::test]
    async fn list_uses_strict_exclusive_bounds() {
        let fx = Fixture::with_schedule();
        // The 6/24 window ends after the until bound and is excluded.
        let windows = fx
            .service
            .list_windows(
                fx.user_id,
                datetime!(2022-06-23 00:00 UTC),
                datetime!(2022-06-24 00:00 UTC),
                100,
                0,
            )
            .await
            .unwrap();
        assert_eq!(windows.len(), 2);
        assert!(windows
            .iter()
            .all(|w| w.start > datetime!(2022-06-23 00:00 UTC)
                && w.end < datetime!(2022-06-24 00:00 UTC)));
    }

    #[tokio::test]
    async fn list_excludes_window_touching_the_boundary() {
        let fx = Fixture::new();
        fx.store.seed(vec![window(
            fx.teacher_id,
            datetime!(2022-06-23 07:00 UTC),
            datetime!(2022-06-24 00:00 UTC),
        )]);
        let windows = fx
            .service
            .list_windows(
                fx.user_id,
                datetime!(2022-06-23 00:00 UTC),
                datetime!(2022-06-24 00:00 UTC),
                100,
                0,
            )
            .await
            .unwrap();
        assert!(windows.is_empty());
    }

    #[tokio::test]
    async fn list_is_ordered_by_start_and_paginated() {
        let fx = Fixture::with_schedule();
        let page0 = fx
            .service
            .list_windows(
                fx.user_id,
                datetime!(2022-06-20 00:00 UTC),
                datetime!(2022-07-20 00:00 UTC),
                2,
                0,
            )
            .await
            .unwrap();
        let page1 = fx
            .service
            .list_windows(
                fx.user_id,
                datetime!(2022-06-20 00:00 UTC),
                datetime!(2022-07-20 00:00 UTC),
                2,
                1,
            )
            .await
            .unwrap();
        assert_eq!(page0.len(), 2);
        assert_eq!(page1.len(), 1);
        assert!(page0[0].start < page0[1].start);
        assert!(page0[1].start < page1[0].start);
    }

    #[tokio::test]
    async fn replace_clears_contained_windows_and_inserts_events() {
        let fx = Fixture::with_schedule();
        let inserted = fx
            .service
            .replace_windows(
                fx.user_id,
                Timeframe {
                    start: datetime!(2022-06-23 00:00 UTC),
                    end: datetime!(2022-06-24 00:00 UTC),
                },
                vec![WindowEvent {
                    id: Uuid::new_v4(),
                    title: None,
                    start: datetime!(2022-06-23 14:00 UTC),
                    end: datetime!(2022-06-23 15:00 UTC),
                }],
            )
            .await
            .unwrap();
        assert_eq!(inserted.len(), 1);
        // Both 6/23 windows were contained and deleted; the 6/24 one
        // survives; one new window was inserted.
        assert_eq!(fx.store.all().len(), 2);
    }

    #[tokio::test]
    async fn replace_leaves_straddling_windows_untouched() {
        let fx = Fixture::new();
        let straddling = window(
            fx.teacher_id,
            datetime!(2022-06-22 22:00 UTC),
            datetime!(2022-06-23 02:00 UTC),
        );
        let contained = window(
            fx.teacher_id,
            datetime!(2022-06-23 08:00 UTC),
            datetime!(2022-06-23 10:00 UTC),
        );
        let outside = window(
            fx.teacher_id,
            datetime!(2022-06-25 08:00 UTC),
            datetime!(2022-06-25 10:00 UTC),
        );
        fx.store
            .seed(vec![straddling.clone(), contained, outside.clone()]);

        fx.service
            .replace_windows(
                fx.user_id,
                Timeframe {
                    start: datetime!(2022-06-23 00:00 UTC),
                    end: datetime!(2022-06-24 00:00 UTC),
                },
                vec![],
            )
            .await
            .unwrap();

        let left = fx.store.all();
        assert_eq!(left.len(), 2);
        assert!(left.iter().any(|w| w.id == straddling.id));
        assert!(left.iter().any(|w| w.id == outside.id));
    }

    #[tokio::test]
    async fn replace_preserves_caller_supplied_ids() {
        let fx = Fixture::new();
        let id = Uuid::new_v4();
        let inserted = fx
            .service
            .replace_windows(
                fx.user_id,
                Timeframe {
                    start: datetime!(2022-06-23 00:00 UTC),
                    end: datetime!(2022-06-24 00:00 UTC),
                },
                vec![WindowEvent {
                    id,
                    title: Some("morning".to_string()),
                    start: datetime!(2022-06-23 09:00 UTC),
                    end: datetime!(2022-06-23 11:00 UTC),
                }],
            )
            .await
            .unwrap();
        assert_eq!(inserted[0].id, id);
        assert_eq!(inserted[0].teacher_id, fx.teacher_id);
        assert_eq!(inserted[0].title.as_deref(), Some("morning"));
    }

    #[tokio::test]
    async fn replace_rejects_whole_batch_on_one_invalid_event() {
        let fx = Fixture::with_schedule();
        let err = fx
            .service
            .replace_windows(
                fx.user_id,
                Timeframe {
                    start: datetime!(2022-06-23 00:00 UTC),
                    end: datetime!(2022-06-24 00:00 UTC),
                },
                vec![
                    WindowEvent {
                        id: Uuid::new_v4(),
                        title: None,
                        start: datetime!(2022-06-23 14:00 UTC),
                        end: datetime!(2022-06-23 15:00 UTC),
                    },
                    WindowEvent {
                        id: Uuid::new_v4(),
                        title: None,
                        start: datetime!(2022-06-23 16:00 UTC),
                        end: datetime!(2022-06-23 16:00 UTC),
                    },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // No writes happened: the fixture schedule is intact.
        assert_eq!(fx.store.all().len(), 3);
    }

    #[tokio::test]
    async fn update_rejects_inverted_range_and_leaves_window_unchanged() {
        let fx = Fixture::with_schedule();
        let target = fx.store.all()[0].clone();
        let err = fx
            .service
            .update_window(
                fx.user_id,
                target.id,
                &UpdateAvailabilityPayload {
                    id: target.id,
                    title: None,
                    start: datetime!(2022-08-01 19:00 UTC),
                    end: datetime!(2022-08-01 09:00 UTC),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let unchanged = fx.store.all().into_iter().find(|w| w.id == target.id).unwrap();
        assert_eq!(unchanged.start, target.start);
        assert_eq!(unchanged.end, target.end);
    }

    #[tokio::test]
    async fn update_patches_start_end_title_only() {
        let fx = Fixture::with_schedule();
        let target = fx.store.all()[0].clone();
        let updated = fx
            .service
            .update_window(
                fx.user_id,
                target.id,
                &UpdateAvailabilityPayload {
                    id: target.id,
                    title: Some("office hours".to_string()),
                    start: datetime!(2022-08-01 09:00 UTC),
                    end: datetime!(2022-08-01 19:00 UTC),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.start, datetime!(2022-08-01 09:00 UTC));
        assert_eq!(updated.end, datetime!(2022-08-01 19:00 UTC));
        assert_eq!(updated.title.as_deref(), Some("office hours"));
        assert_eq!(updated.teacher_id, target.teacher_id);
    }

    #[tokio::test]
    async fn update_of_unknown_window_is_not_found() {
        let fx = Fixture::with_schedule();
        let err = fx
            .service
            .update_window(
                fx.user_id,
                Uuid::new_v4(),
                &UpdateAvailabilityPayload {
                    id: Uuid::new_v4(),
                    title: None,
                    start: datetime!(2022-08-01 09:00 UTC),
                    end: datetime!(2022-08-01 19:00 UTC),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn mutating_a_foreign_window_is_a_permission_error() {
        let fx = Fixture::with_schedule();
        let foreign = window(
            Uuid::new_v4(),
            datetime!(2022-06-25 09:00 UTC),
            datetime!(2022-06-25 17:00 UTC),
        );
        fx.store.seed(vec![foreign.clone()]);

        let err = fx
            .service
            .delete_window(fx.user_id, foreign.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
        assert!(fx.store.all().iter().any(|w| w.id == foreign.id));
    }

    #[tokio::test]
    async fn delete_removes_the_window() {
        let fx = Fixture::with_schedule();
        let target = fx.store.all()[0].clone();
        fx.service.delete_window(fx.user_id, target.id).await.unwrap();
        assert!(fx.store.all().iter().all(|w| w.id != target.id));

        let err = fx
            .service
            .delete_window(fx.user_id, target.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn user_without_teacher_record_cannot_query() {
        let fx = Fixture::with_schedule();
        let stranger = Uuid::new_v4();
        let err = fx
            .service
            .list_windows(
                stranger,
                datetime!(2022-06-20 00:00 UTC),
                datetime!(2022-07-20 00:00 UTC),
                100,
                0,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn fixture_schedule_matches_expected_shape() {
        let teacher_id = Uuid::new_v4();
        let schedule = fixture_schedule(teacher_id);
        assert_eq!(schedule.len(), 3);
        assert!(schedule.iter().all(|w| w.end > w.start));
    }
}
