use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    merge_course_update, Course, CourseDetails, CourseUpdatePayload, LiveClass, NewCoursePayload,
};
use crate::db::repositories::{CourseRepository, OrganizationRepository};
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<Course>>> {
    let organization =
        OrganizationRepository::get_or_create(&state.db, state.config.app.default_organization_id)
            .await?;
    let limit = params.limit.unwrap_or(state.config.app.default_page_size);
    let offset = params.page.unwrap_or(0) * limit;
    let courses = CourseRepository::list(&state.db, organization.id, limit, offset).await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<Course>> {
    let course = CourseRepository::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found by ID".to_string()))?;
    Ok(Json(course))
}

pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<NewCoursePayload>,
) -> AppResult<Json<CourseDetails>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let organization =
        OrganizationRepository::get_or_create(&state.db, state.config.app.default_organization_id)
            .await?;
    let (course, course_teacher) =
        CourseRepository::create(&state.db, organization.id, &payload).await?;
    Ok(Json(CourseDetails {
        course,
        course_teachers: vec![course_teacher],
    }))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<CourseUpdatePayload>,
) -> AppResult<Json<Course>> {
    let mut course = CourseRepository::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found by ID".to_string()))?;
    merge_course_update(&mut course, &payload);
    let updated = CourseRepository::update(&state.db, &course).await?;
    Ok(Json(updated))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !CourseRepository::delete(&state.db, course_id).await? {
        return Err(AppError::NotFound("Course not found by ID".to_string()));
    }
    Ok(StatusCode::OK)
}

pub async fn get_course_classes(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<Vec<LiveClass>>> {
    // 404 for an unknown course rather than an empty list.
    CourseRepository::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found by ID".to_string()))?;
    let classes = CourseRepository::classes(&state.db, course_id).await?;
    Ok(Json(classes))
}
