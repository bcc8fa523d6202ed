//! Pricing Calendar API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::auth::Actor;
use crate::core::ServerState;
use crate::db::models::{PricingCalendarEntry, PricingCalendarEntryCreate, PricingCalendarEntryUpdate};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CalendarListQuery {
    /// Restrict the listing to a single date
    pub date: Option<NaiveDate>,
}

/// GET /api/pricing-calendar?date=2025-01-01
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
    Query(query): Query<CalendarListQuery>,
) -> AppResult<Json<Vec<PricingCalendarEntry>>> {
    let repo = state.calendar_repo();
    let entries = match query.date {
        Some(date) => repo.find_for_date(&actor.company_id, date).await?,
        None => repo.find_for_company(&actor.company_id).await?,
    };
    Ok(Json(entries))
}

/// GET /api/pricing-calendar/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<PricingCalendarEntry>> {
    let entry = state
        .calendar_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("calendar entry {id}")))?;
    actor.ensure_company(&entry.company_id)?;
    Ok(Json(entry))
}

/// POST /api/pricing-calendar
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(mut payload): Json<PricingCalendarEntryCreate>,
) -> AppResult<Json<PricingCalendarEntry>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if payload.company_id.is_empty() {
        payload.company_id = actor.company_id.clone();
    }
    actor.ensure_company(&payload.company_id)?;

    let entry = state.calendar_repo().create(payload).await?;
    Ok(Json(entry))
}

/// PUT /api/pricing-calendar/{id}
pub async fn update(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
    Json(payload): Json<PricingCalendarEntryUpdate>,
) -> AppResult<Json<PricingCalendarEntry>> {
    let repo = state.calendar_repo();
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("calendar entry {id}")))?;
    actor.ensure_company(&existing.company_id)?;

    let entry = repo.update(&id, payload).await?;
    Ok(Json(entry))
}

/// DELETE /api/pricing-calendar/{id}
pub async fn delete(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = state.calendar_repo();
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("calendar entry {id}")))?;
    actor.ensure_company(&existing.company_id)?;

    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
