pub mod automation;
pub mod board;
pub mod card;
pub mod custom_field;
pub mod label;
pub mod list;
pub mod workspace;

use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{self, HealthResponse};
use crate::repository::*;
use crate::services::*;
use crate::utils::{is_valid_hex_color, Claims, ResponseData};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,

    // Repositories
    pub workspace_repo: Arc<WorkspaceRepository>,
    pub board_repo: Arc<BoardRepository>,
    pub list_repo: Arc<ListRepository>,
    pub card_repo: Arc<CardRepository>,
    pub label_repo: Arc<LabelRepository>,
    pub field_repo: Arc<CustomFieldRepository>,
    pub automation_repo: Arc<AutomationRepository>,

    // Services
    pub card_service: Arc<CardService>,
    pub automation_service: Arc<AutomationService>,
}

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Service is healthy",
        HealthResponse {
            status: "healthy".to_string(),
            service: "TACKLE Backend (Rust/Actix)".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    ))
}

pub(crate) fn get_user_id(req: &HttpRequest) -> AppResult<Uuid> {
    req.extensions()
        .get::<Claims>()
        .map(|c| c.user_id())
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

pub(crate) fn check_hex_color(value: Option<&str>, field: &str) -> AppResult<()> {
    match value {
        Some(color) if !is_valid_hex_color(color) => Err(AppError::ValidationError(format!(
            "{} must be a #rrggbb color",
            field
        ))),
        _ => Ok(()),
    }
}

// Ownership resolution. Unknown ids yield 404; known ids owned by someone
// else yield 403. Board-scoped resources inherit access from their board.

pub(crate) async fn owned_workspace(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<models::Workspace> {
    let workspace = state
        .workspace_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".to_string()))?;
    if workspace.owner_id != user_id {
        return Err(AppError::Forbidden(
            "You do not own this workspace".to_string(),
        ));
    }
    Ok(workspace)
}

pub(crate) async fn owned_board(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<models::Board> {
    let board = state
        .board_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Board not found".to_string()))?;
    if board.owner_id != user_id {
        return Err(AppError::Forbidden("You do not own this board".to_string()));
    }
    Ok(board)
}

pub(crate) async fn owned_list(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<models::List> {
    let list = state
        .list_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("List not found".to_string()))?;
    owned_board(state, list.board_id, user_id).await?;
    Ok(list)
}

pub(crate) async fn owned_card(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<models::Card> {
    let card = state
        .card_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Card not found".to_string()))?;
    owned_board(state, card.board_id, user_id).await?;
    Ok(card)
}

pub(crate) async fn owned_label(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<models::Label> {
    let label = state
        .label_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Label not found".to_string()))?;
    owned_board(state, label.board_id, user_id).await?;
    Ok(label)
}

pub(crate) async fn owned_field(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<models::CustomField> {
    let field = state
        .field_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Custom field not found".to_string()))?;
    owned_board(state, field.board_id, user_id).await?;
    Ok(field)
}

pub(crate) async fn owned_rule(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> AppResult<models::AutomationRule> {
    let rule = state
        .automation_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Automation rule not found".to_string()))?;
    owned_board(state, rule.board_id, user_id).await?;
    Ok(rule)
}
