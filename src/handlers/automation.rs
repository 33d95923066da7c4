use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ActionKind, CreateAutomationRuleRequest, UpdateAutomationRuleRequest};
use crate::services::validate_action_config;
use crate::utils::{validate_request, ResponseData};

use super::{get_user_id, owned_board, owned_rule, AppState};

/// POST /api/v1/boards/{id}/automations
pub async fn create_rule(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CreateAutomationRuleRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;

    let trigger_config = data.trigger_config.unwrap_or_default();
    let action_config = data.action_config.unwrap_or_default();
    validate_action_config(data.action_kind, &action_config)?;

    let rule = state
        .automation_repo
        .create(
            board.id,
            &data.name,
            &data.trigger_kind.to_string(),
            serde_json::to_value(&trigger_config)?,
            &data.action_kind.to_string(),
            serde_json::to_value(&action_config)?,
        )
        .await?;

    Ok(HttpResponse::Created().json(ResponseData::with_data(
        201,
        "Automation rule created successfully",
        rule,
    )))
}

/// GET /api/v1/boards/{id}/automations
pub async fn get_board_rules(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;

    let rules = state.automation_repo.list_by_board(board.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Automation rules retrieved successfully",
        rules,
    )))
}

/// PUT /api/v1/automations/{id}
pub async fn update_rule(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateAutomationRuleRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let rule = owned_rule(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;

    // The kind/config pair that would be stored must stay coherent
    let effective_kind = match data.action_kind {
        Some(kind) => kind,
        None => ActionKind::parse(&rule.action_kind).ok_or_else(|| {
            AppError::InternalError("Stored action kind is invalid".to_string())
        })?,
    };
    let effective_config = data
        .action_config
        .clone()
        .unwrap_or_else(|| rule.action_config());
    validate_action_config(effective_kind, &effective_config)?;

    let trigger_config = match data.trigger_config {
        Some(c) => Some(serde_json::to_value(&c)?),
        None => None,
    };
    let action_config = match data.action_config {
        Some(c) => Some(serde_json::to_value(&c)?),
        None => None,
    };

    let updated = state
        .automation_repo
        .update(
            rule.id,
            data.name.as_deref(),
            data.trigger_kind.map(|k| k.to_string()).as_deref(),
            trigger_config,
            data.action_kind.map(|k| k.to_string()).as_deref(),
            action_config,
            data.is_enabled,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Automation rule updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/automations/{id}
pub async fn delete_rule(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let rule = owned_rule(&state, path.into_inner(), user_id).await?;

    state.automation_repo.delete(rule.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Automation rule deleted successfully")))
}
