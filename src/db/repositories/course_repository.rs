use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Course, CourseTeacher, LiveClass, NewCoursePayload};
use crate::db::DatabaseError;

const COURSE_COLUMNS: &str =
    "id, organization_id, name, description, difficulty, max_students, price, created_at, updated_at";

pub struct CourseRepository;

impl CourseRepository {
    pub async fn list(
        pool: &PgPool,
        organization_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, DatabaseError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE organization_id = $1
            ORDER BY difficulty ASC, name ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(organization_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(courses)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Course>, DatabaseError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(course)
    }

    /// Creates the course and its initial teacher link in one transaction.
    pub async fn create(
        pool: &PgPool,
        organization_id: Uuid,
        payload: &NewCoursePayload,
    ) -> Result<(Course, CourseTeacher), DatabaseError> {
        let mut tx = pool.begin().await?;

        let course = sqlx::query_as::<_, Course>(&format!(
            r#"
            INSERT INTO courses (organization_id, name, description, difficulty, max_students, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(organization_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.difficulty)
        .bind(payload.max_students)
        .bind(payload.price)
        .fetch_one(&mut *tx)
        .await?;

        let course_teacher = sqlx::query_as::<_, CourseTeacher>(
            r#"
            INSERT INTO course_teachers (course_id, teacher_id)
            VALUES ($1, $2)
            RETURNING id, course_id, teacher_id
            "#,
        )
        .bind(course.id)
        .bind(payload.teacher_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((course, course_teacher))
    }

    /// Persists a course previously merged through `merge_course_update`;
    /// only the patchable columns are written.
    pub async fn update(pool: &PgPool, course: &Course) -> Result<Course, DatabaseError> {
        let updated = sqlx::query_as::<_, Course>(&format!(
            r#"
            UPDATE courses
            SET name = $1, description = $2, difficulty = $3, max_students = $4,
                price = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(&course.name)
        .bind(&course.description)
        .bind(course.difficulty)
        .bind(course.max_students)
        .bind(course.price)
        .bind(course.id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)?;
        Ok(updated)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn classes(pool: &PgPool, course_id: Uuid) -> Result<Vec<LiveClass>, DatabaseError> {
        let classes = sqlx::query_as::<_, LiveClass>(
            r#"
            SELECT id, course_id, name, description, url, created_at
            FROM live_classes
            WHERE course_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;
        Ok(classes)
    }
}
