use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: String,
    /// Number to help order in terms of difficulty.
    pub difficulty: i32,
    pub max_students: i32,
    pub price: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct LiveClass {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CourseTeacher {
    pub id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CourseStudent {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub payment_package_id: Option<Uuid>,
}

fn default_max_students() -> i32 {
    4
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCoursePayload {
    #[validate(length(min = 1, message = "Name must be at least 1 character long"))]
    pub name: String,
    pub description: String,
    pub difficulty: i32,
    #[serde(default = "default_max_students")]
    #[validate(range(min = 1, message = "A course must admit at least 1 student"))]
    pub max_students: i32,
    pub price: i64,
    pub teacher_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct CourseUpdatePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<i32>,
    pub max_students: Option<i32>,
    pub price: Option<i64>,
}

/// Full course view returned on creation: the record plus its teacher links.
#[derive(Debug, Serialize)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub course_teachers: Vec<CourseTeacher>,
}

/// Explicit merge for course updates. Exactly these five fields are
/// patchable; `organization_id` and teacher links are not reachable here.
pub fn merge_course_update(course: &mut Course, payload: &CourseUpdatePayload) {
    if let Some(name) = &payload.name {
        course.name = name.clone();
    }
    if let Some(description) = &payload.description {
        course.description = description.clone();
    }
    if let Some(difficulty) = payload.difficulty {
        course.difficulty = difficulty;
    }
    if let Some(max_students) = payload.max_students {
        course.max_students = max_students;
    }
    if let Some(price) = payload.price {
        course.price = price;
    }
}
