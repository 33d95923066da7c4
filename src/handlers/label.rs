use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateLabelRequest, UpdateLabelRequest};
use crate::utils::{validate_request, ResponseData};

use super::{check_hex_color, get_user_id, owned_board, owned_label, AppState};

/// POST /api/v1/boards/{id}/labels
pub async fn create_label(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CreateLabelRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;
    check_hex_color(Some(&data.color), "color")?;

    let label = state
        .label_repo
        .create(board.id, &data.name, &data.color)
        .await?;

    Ok(HttpResponse::Created().json(ResponseData::with_data(
        201,
        "Label created successfully",
        label,
    )))
}

/// GET /api/v1/boards/{id}/labels
pub async fn get_board_labels(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;

    let labels = state.label_repo.list_by_board(board.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Labels retrieved successfully",
        labels,
    )))
}

/// PUT /api/v1/labels/{id}
pub async fn update_label(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateLabelRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let label = owned_label(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;
    check_hex_color(data.color.as_deref(), "color")?;

    let updated = state
        .label_repo
        .update(label.id, data.name.as_deref(), data.color.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Label updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/labels/{id}
pub async fn delete_label(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let label = owned_label(&state, path.into_inner(), user_id).await?;

    state.label_repo.delete(label.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Label deleted successfully")))
}
