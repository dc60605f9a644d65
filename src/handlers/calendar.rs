use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{AppointmentRequest, AppointmentResult, AuthStatus, TimeSlot};
use crate::state::AppState;

// GET /api/calendar?date=YYYY-MM-DD
#[derive(Deserialize)]
pub struct CalendarQuery {
    pub date: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    available_slots: Vec<TimeSlot>,
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let raw = query
        .date
        .ok_or_else(|| AppError::BadRequest("missing date parameter".to_string()))?;
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date: {raw}")))?;

    let available_slots = state
        .calendar
        .fetch_slots(date)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(SlotsResponse { available_slots }))
}

// POST /api/appointments
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AppointmentRequest>,
) -> Result<Json<AppointmentResult>, AppError> {
    let result = state
        .submitter
        .submit(state.calendar.as_ref(), &request)
        .await
        .map_err(|_| AppError::Conflict)?;

    Ok(Json(result))
}

// GET /api/auth/status
pub async fn get_auth_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AuthStatus>, AppError> {
    let status = state
        .calendar
        .auth_status()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(status))
}
