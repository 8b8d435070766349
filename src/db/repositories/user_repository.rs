use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::UserDirectory;
use crate::db::models::{NewUser, User};
use crate::db::DatabaseError;

const USER_COLUMNS: &str = "id, name, email, google_id, created_at";

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE google_id = $1
            "#
        ))
        .bind(google_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, google_id)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.name)
        .bind(new_user.email.to_lowercase())
        .bind(&new_user.google_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn is_teacher(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM teachers WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
