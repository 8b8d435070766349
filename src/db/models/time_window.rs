use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// Kind tag for an availability window. Only `available` rows are produced
/// today; the enum is open for booked/unavailable variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "window_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Available,
    Booked,
    Unavailable,
}

/// One contiguous interval during which a teacher is open for bookings.
///
/// Invariant: `end > start`, checked before every insert and update. The
/// owning teacher is immutable for the lifetime of the row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct TimeWindow {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub kind: WindowKind,
    #[sqlx(rename = "start_time")]
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[sqlx(rename = "end_time")]
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    pub title: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TimeWindow {
    /// Explicit merge for updates. Only start, end and title are patchable;
    /// id, owner and kind never change through this path.
    pub fn apply_update(&mut self, start: OffsetDateTime, end: OffsetDateTime, title: Option<String>) {
        self.start = start;
        self.end = end;
        self.title = title;
    }
}

/// Creation input for one window inside a bulk replace. Distinct from the
/// stored entity on purpose: the caller supplies the id, nothing else about
/// the row (owner, kind, created_at) is theirs to set.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowEvent {
    pub id: Uuid,
    pub title: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

/// The contiguous range a bulk replace reconciles against.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Timeframe {
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceAvailabilityPayload {
    pub timeframe: Timeframe,
    pub events: Vec<WindowEvent>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAvailabilityPayload {
    pub id: Uuid,
    pub title: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

/// `end > start` holds for every stored window.
pub fn chronological(start: OffsetDateTime, end: OffsetDateTime) -> bool {
    end > start
}
