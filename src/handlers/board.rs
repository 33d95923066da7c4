use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateBoardRequest, PaginationQuery, UpdateBoardRequest};
use crate::utils::{validate_request, Paginate, ResponseData};

use super::{check_hex_color, get_user_id, owned_board, owned_workspace, AppState};

/// POST /api/v1/workspaces/{id}/boards
pub async fn create_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CreateBoardRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let workspace = owned_workspace(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;
    check_hex_color(data.background_color.as_deref(), "background_color")?;

    let board = state
        .board_repo
        .create(
            workspace.id,
            &data.name,
            data.description.as_deref(),
            user_id,
            data.background_color.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(ResponseData::with_data(
        201,
        "Board created successfully",
        board,
    )))
}

/// GET /api/v1/workspaces/{id}/boards
pub async fn list_boards(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let workspace = owned_workspace(&state, path.into_inner(), user_id).await?;

    let total = state.board_repo.count_by_workspace(workspace.id).await?;
    let paginate = Paginate::new(query.limit, query.page, total);
    let boards = state
        .board_repo
        .list_by_workspace(workspace.id, paginate.limit, paginate.offset)
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_pagination(
        200,
        "Boards retrieved successfully",
        boards,
        paginate,
    )))
}

/// GET /api/v1/boards/{id}
pub async fn get_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Board retrieved successfully",
        board,
    )))
}

/// PUT /api/v1/boards/{id}
pub async fn update_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBoardRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;
    check_hex_color(data.background_color.as_deref(), "background_color")?;

    let updated = state
        .board_repo
        .update(
            board.id,
            data.name.as_deref(),
            data.description.as_deref(),
            data.background_color.as_deref(),
            data.is_closed,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Board updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/boards/{id}
pub async fn delete_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;

    state.board_repo.delete(board.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Board deleted successfully")))
}
