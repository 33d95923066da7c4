use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateListRequest, UpdateListRequest};
use crate::utils::{validate_request, ResponseData};

use super::{get_user_id, owned_board, owned_list, AppState};

/// POST /api/v1/boards/{id}/lists
pub async fn create_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CreateListRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;

    let list = state.list_repo.create(board.id, &data.name).await?;

    Ok(HttpResponse::Created().json(ResponseData::with_data(
        201,
        "List created successfully",
        list,
    )))
}

/// GET /api/v1/boards/{id}/lists
pub async fn get_board_lists(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;

    let lists = state.list_repo.list_by_board(board.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Lists retrieved successfully",
        lists,
    )))
}

/// PUT /api/v1/lists/{id}
pub async fn update_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateListRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let list = owned_list(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;

    let updated = state
        .list_repo
        .update(list.id, data.name.as_deref(), data.position, data.is_archived)
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "List updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/lists/{id}
pub async fn delete_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let list = owned_list(&state, path.into_inner(), user_id).await?;

    state.list_repo.delete(list.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "List deleted successfully")))
}
