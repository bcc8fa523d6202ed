//! Role Pricing Template API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::Actor;
use crate::core::ServerState;
use crate::db::models::{RolePricingTemplate, RolePricingTemplateCreate, RolePricingTemplateUpdate};
use crate::utils::{AppError, AppResult};

/// GET /api/pricing-templates - 当前公司全部模板
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
) -> AppResult<Json<Vec<RolePricingTemplate>>> {
    let templates = state.template_repo().find_for_company(&actor.company_id).await?;
    Ok(Json(templates))
}

/// GET /api/pricing-templates/for-store/{store_id} - 门店可用模板
pub async fn list_for_store(
    State(state): State<ServerState>,
    actor: Actor,
    Path(store_id): Path<String>,
) -> AppResult<Json<Vec<RolePricingTemplate>>> {
    actor.ensure_store_access(&store_id)?;
    let templates = state
        .template_repo()
        .find_for_store(&actor.company_id, &store_id)
        .await?;
    Ok(Json(templates))
}

/// GET /api/pricing-templates/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<RolePricingTemplate>> {
    let template = state
        .template_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("pricing template {id}")))?;
    actor.ensure_company(&template.company_id)?;
    Ok(Json(template))
}

/// POST /api/pricing-templates
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(mut payload): Json<RolePricingTemplateCreate>,
) -> AppResult<Json<RolePricingTemplate>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if payload.company_id.is_empty() {
        payload.company_id = actor.company_id.clone();
    }
    actor.ensure_company(&payload.company_id)?;
    payload.created_by.get_or_insert_with(|| actor.id.clone());

    let template = state.template_repo().create(payload).await?;
    Ok(Json(template))
}

/// PUT /api/pricing-templates/{id}
pub async fn update(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
    Json(payload): Json<RolePricingTemplateUpdate>,
) -> AppResult<Json<RolePricingTemplate>> {
    let repo = state.template_repo();
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("pricing template {id}")))?;
    actor.ensure_company(&existing.company_id)?;

    let template = repo.update(&id, payload).await?;
    Ok(Json(template))
}

/// DELETE /api/pricing-templates/{id} - 软删除
///
/// 历史订单保存了模板条款快照，模板只停用不删除。
pub async fn delete(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = state.template_repo();
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("pricing template {id}")))?;
    actor.ensure_company(&existing.company_id)?;

    let result = repo.deactivate(&id).await?;
    Ok(Json(result))
}
