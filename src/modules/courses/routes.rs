use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;

use super::handlers::{
    create_course, delete_course, get_course, get_course_classes, list_courses, update_course,
};

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/{course_id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/{course_id}/classes", get(get_course_classes))
}
