use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::bookings::store::AvailabilityStore;
use crate::db::models::{TimeWindow, Timeframe, WindowEvent, WindowKind};
use crate::db::DatabaseError;

const WINDOW_COLUMNS: &str = "id, teacher_id, kind, start_time, end_time, title, created_at";

/// Postgres-backed availability store.
pub struct PgAvailabilityStore {
    pool: PgPool,
}

impl PgAvailabilityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn delete_contained_tx(
    tx: &mut Transaction<'_, Postgres>,
    teacher_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<u64, sqlx::Error> {
    // Strict containment: rows that only partially overlap the range are
    // kept. Documented source behavior, do not widen without product
    // confirmation.
    let result = sqlx::query(
        r#"
        DELETE FROM teacher_availability
        WHERE teacher_id = $1 AND start_time > $2 AND end_time < $3
        "#,
    )
    .bind(teacher_id)
    .bind(start)
    .bind(end)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected())
}

#[async_trait]
impl AvailabilityStore for PgAvailabilityStore {
    async fn list(
        &self,
        teacher_id: Uuid,
        from: OffsetDateTime,
        until: OffsetDateTime,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TimeWindow>, DatabaseError> {
        let windows = sqlx::query_as::<_, TimeWindow>(&format!(
            r#"
            SELECT {WINDOW_COLUMNS}
            FROM teacher_availability
            WHERE teacher_id = $1 AND start_time > $2 AND end_time < $3
            ORDER BY start_time ASC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(teacher_id)
        .bind(from)
        .bind(until)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(windows)
    }

    async fn delete_contained(
        &self,
        teacher_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let removed = delete_contained_tx(&mut tx, teacher_id, start, end).await?;
        tx.commit().await?;
        Ok(removed)
    }

    async fn replace(
        &self,
        teacher_id: Uuid,
        timeframe: Timeframe,
        events: &[WindowEvent],
    ) -> Result<Vec<TimeWindow>, DatabaseError> {
        // Delete and insert must commit together; a reader never sees the
        // timeframe half-cleared.
        let mut tx = self.pool.begin().await?;
        delete_contained_tx(&mut tx, teacher_id, timeframe.start, timeframe.end).await?;

        let mut inserted = Vec::with_capacity(events.len());
        for event in events {
            let window = sqlx::query_as::<_, TimeWindow>(&format!(
                r#"
                INSERT INTO teacher_availability (id, teacher_id, kind, start_time, end_time, title)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {WINDOW_COLUMNS}
                "#
            ))
            .bind(event.id)
            .bind(teacher_id)
            .bind(WindowKind::Available)
            .bind(event.start)
            .bind(event.end)
            .bind(&event.title)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(window);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn get(&self, id: Uuid) -> Result<Option<TimeWindow>, DatabaseError> {
        let window = sqlx::query_as::<_, TimeWindow>(&format!(
            r#"
            SELECT {WINDOW_COLUMNS}
            FROM teacher_availability
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(window)
    }

    async fn update(
        &self,
        id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
        title: Option<String>,
    ) -> Result<Option<TimeWindow>, DatabaseError> {
        let window = sqlx::query_as::<_, TimeWindow>(&format!(
            r#"
            UPDATE teacher_availability
            SET start_time = $1, end_time = $2, title = $3
            WHERE id = $4
            RETURNING {WINDOW_COLUMNS}
            "#
        ))
        .bind(start)
        .bind(end)
        .bind(title)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(window)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM teacher_availability WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
