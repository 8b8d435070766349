use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::auth::{bearer_token, IdentityResolver};
use crate::bookings::BookingService;
use crate::db::models::{ReplaceAvailabilityPayload, TimeWindow, UpdateAvailabilityPayload};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct BookingsState {
    pub service: Arc<BookingService>,
    pub identity: Arc<dyn IdentityResolver>,
    pub default_page_size: i64,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub from_date: String,
    pub until_date: String,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

/// Range bounds arrive as YYYY-MM-DD and are read as midnight UTC.
fn parse_day(value: &str) -> AppResult<OffsetDateTime> {
    let format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(value, &format)
        .map_err(|_| AppError::Validation("dates must be formatted YYYY-MM-DD".to_string()))?;
    Ok(date.midnight().assume_utc())
}

pub async fn list_availability(
    State(state): State<BookingsState>,
    headers: HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<TimeWindow>>> {
    let from = parse_day(&query.from_date)?;
    let until = parse_day(&query.until_date)?;
    let user = state.identity.resolve_bearer(bearer_token(&headers)?).await?;
    let limit = query.limit.unwrap_or(state.default_page_size);
    let page = query.page.unwrap_or(0);
    let windows = state
        .service
        .list_windows(user.id, from, until, limit, page)
        .await?;
    Ok(Json(windows))
}

pub async fn replace_availability(
    State(state): State<BookingsState>,
    headers: HeaderMap,
    Json(payload): Json<ReplaceAvailabilityPayload>,
) -> AppResult<Json<Vec<TimeWindow>>> {
    let user = state.identity.resolve_bearer(bearer_token(&headers)?).await?;
    let inserted = state
        .service
        .replace_windows(user.id, payload.timeframe, payload.events)
        .await?;
    Ok(Json(inserted))
}

pub async fn update_availability(
    State(state): State<BookingsState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAvailabilityPayload>,
) -> AppResult<Json<TimeWindow>> {
    let user = state.identity.resolve_bearer(bearer_token(&headers)?).await?;
    let updated = state.service.update_window(user.id, id, &payload).await?;
    Ok(Json(updated))
}

pub async fn delete_availability(
    State(state): State<BookingsState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let user = state.identity.resolve_bearer(bearer_token(&headers)?).await?;
    state.service.delete_window(user.id, id).await?;
    Ok(StatusCode::ACCEPTED)
}
