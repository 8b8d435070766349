use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Organization;
use crate::db::DatabaseError;

pub struct OrganizationRepository;

impl OrganizationRepository {
    /// Fetches the tenant's default organization, creating the row on first
    /// use. The id comes from configuration, never from the request.
    pub async fn get_or_create(pool: &PgPool, id: Uuid) -> Result<Organization, DatabaseError> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (id)
            VALUES ($1)
            ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
            RETURNING id, name, created_at
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(organization)
    }
}
