use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::bookings::store::TeacherDirectory;
use crate::db::models::Teacher;
use crate::db::DatabaseError;

pub struct PgTeacherDirectory {
    pool: PgPool,
}

impl PgTeacherDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherDirectory for PgTeacherDirectory {
    async fn teacher_for_user(&self, user_id: Uuid) -> Result<Option<Teacher>, DatabaseError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            SELECT id, user_id, created_at
            FROM teachers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }
}
