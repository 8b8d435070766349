//! In-memory fakes for exercising the booking core without Postgres.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::macros::datetime;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::IdentityResolver;
use crate::bookings::service::BookingService;
use crate::bookings::store::{AvailabilityStore, TeacherDirectory};
use crate::db::models::{Teacher, TimeWindow, Timeframe, User, WindowEvent, WindowKind};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};

/// Mirror of the Postgres store semantics over a Vec behind a mutex.
#[derive(Default)]
pub struct InMemoryAvailabilityStore {
    windows: Mutex<Vec<TimeWindow>>,
}

impl InMemoryAvailabilityStore {
    pub fn seed(&self, mut windows: Vec<TimeWindow>) {
        self.windows.lock().unwrap().append(&mut windows);
    }

    pub fn all(&self) -> Vec<TimeWindow> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryAvailabilityStore {
    async fn list(
        &self,
        teacher_id: Uuid,
        from: OffsetDateTime,
        until: OffsetDateTime,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TimeWindow>, DatabaseError> {
        let mut matching: Vec<TimeWindow> = self
            .windows
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.teacher_id == teacher_id && w.start > from && w.end < until)
            .cloned()
            .collect();
        matching.sort_by_key(|w| w.start);
        Ok(matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn delete_contained(
        &self,
        teacher_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<u64, DatabaseError> {
        let mut windows = self.windows.lock().unwrap();
        let before = windows.len();
        windows.retain(|w| !(w.teacher_id == teacher_id && w.start > start && w.end < end));
        Ok((before - windows.len()) as u64)
    }

    async fn replace(
        &self,
        teacher_id: Uuid,
        timeframe: Timeframe,
        events: &[WindowEvent],
    ) -> Result<Vec<TimeWindow>, DatabaseError> {
        self.delete_contained(teacher_id, timeframe.start, timeframe.end)
            .await?;
        let mut inserted = Vec::with_capacity(events.len());
        let mut windows = self.windows.lock().unwrap();
        for event in events {
            let row = TimeWindow {
                id: event.id,
                teacher_id,
                kind: WindowKind::Available,
                start: event.start,
                end: event.end,
                title: event.title.clone(),
                created_at: OffsetDateTime::now_utc(),
            };
            windows.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn get(&self, id: Uuid) -> Result<Option<TimeWindow>, DatabaseError> {
        Ok(self
            .windows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
        title: Option<String>,
    ) -> Result<Option<TimeWindow>, DatabaseError> {
        let mut windows = self.windows.lock().unwrap();
        match windows.iter_mut().find(|w| w.id == id) {
            Some(window) => {
                window.apply_update(start, end, title);
                Ok(Some(window.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut windows = self.windows.lock().unwrap();
        let before = windows.len();
        windows.retain(|w| w.id != id);
        Ok(windows.len() < before)
    }
}

/// Fixed user-to-teacher mapping.
#[derive(Default)]
pub struct StaticTeacherDirectory {
    teachers: Mutex<Vec<Teacher>>,
}

impl StaticTeacherDirectory {
    pub fn with_teacher(teacher: Teacher) -> Self {
        Self {
            teachers: Mutex::new(vec![teacher]),
        }
    }
}

#[async_trait]
impl TeacherDirectory for StaticTeacherDirectory {
    async fn teacher_for_user(&self, user_id: Uuid) -> Result<Option<Teacher>, DatabaseError> {
        Ok(self
            .teachers
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.user_id == user_id)
            .cloned())
    }
}

/// Identity seam that accepts any bearer token as the configured user.
pub struct StaticIdentity {
    pub user: User,
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn resolve_bearer(&self, _token: &str) -> AppResult<User> {
        Ok(self.user.clone())
    }
}

/// Identity seam that rejects every credential.
pub struct RejectingIdentity;

#[async_trait]
impl IdentityResolver for RejectingIdentity {
    async fn resolve_bearer(&self, _token: &str) -> AppResult<User> {
        Err(AppError::Authentication("token rejected".to_string()))
    }
}

pub fn window(teacher_id: Uuid, start: OffsetDateTime, end: OffsetDateTime) -> TimeWindow {
    TimeWindow {
        id: Uuid::new_v4(),
        teacher_id,
        kind: WindowKind::Available,
        start,
        end,
        title: None,
        created_at: OffsetDateTime::now_utc(),
    }
}

/// The canonical three-window schedule used throughout the booking tests.
pub fn fixture_schedule(teacher_id: Uuid) -> Vec<TimeWindow> {
    vec![
        window(
            teacher_id,
            datetime!(2022-06-23 07:00 UTC),
            datetime!(2022-06-23 12:00 UTC),
        ),
        window(
            teacher_id,
            datetime!(2022-06-23 13:00 UTC),
            datetime!(2022-06-23 17:00 UTC),
        ),
        window(
            teacher_id,
            datetime!(2022-06-24 09:00 UTC),
            datetime!(2022-06-24 17:00 UTC),
        ),
    ]
}

pub fn test_user(id: Uuid) -> User {
    User {
        id,
        name: "Karen".to_string(),
        email: "karen@example.com".to_string(),
        google_id: Some("google-sub-karen".to_string()),
        created_at: OffsetDateTime::now_utc(),
    }
}

/// A booking service wired to in-memory collaborators.
pub struct Fixture {
    pub store: Arc<InMemoryAvailabilityStore>,
    pub service: BookingService,
    pub user_id: Uuid,
    pub teacher_id: Uuid,
}

impl Fixture {
    pub fn new() -> Self {
        let user_id = Uuid::new_v4();
        let teacher = Teacher {
            id: Uuid::new_v4(),
            user_id,
            created_at: OffsetDateTime::now_utc(),
        };
        let teacher_id = teacher.id;
        let store = Arc::new(InMemoryAvailabilityStore::default());
        let teachers = Arc::new(StaticTeacherDirectory::with_teacher(teacher));
        let service = BookingService::new(store.clone(), teachers);
        Self {
            store,
            service,
            user_id,
            teacher_id,
        }
    }

    pub fn with_schedule() -> Self {
        let fixture = Self::new();
        fixture.store.seed(fixture_schedule(fixture.teacher_id));
        fixture
    }
}
