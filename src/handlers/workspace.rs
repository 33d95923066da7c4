use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{CreateWorkspaceRequest, PaginationQuery, UpdateWorkspaceRequest, Visibility};
use crate::utils::{validate_request, Paginate, ResponseData};

use super::{get_user_id, owned_workspace, AppState};

/// POST /api/v1/workspaces
pub async fn create_workspace(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateWorkspaceRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let data = body.into_inner();
    validate_request(&data)?;

    let visibility = data.visibility.unwrap_or_default();
    let workspace = state
        .workspace_repo
        .create(
            &data.name,
            data.description.as_deref(),
            user_id,
            &visibility.to_string(),
        )
        .await?;

    Ok(HttpResponse::Created().json(ResponseData::with_data(
        201,
        "Workspace created successfully",
        workspace,
    )))
}

/// GET /api/v1/workspaces
pub async fn list_workspaces(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;

    let total = state.workspace_repo.count_by_owner(user_id).await?;
    let paginate = Paginate::new(query.limit, query.page, total);
    let workspaces = state
        .workspace_repo
        .list_by_owner(user_id, paginate.limit, paginate.offset)
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_pagination(
        200,
        "Workspaces retrieved successfully",
        workspaces,
        paginate,
    )))
}

/// GET /api/v1/workspaces/{id}
pub async fn get_workspace(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let workspace = owned_workspace(&state, path.into_inner(), user_id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Workspace retrieved successfully",
        workspace,
    )))
}

/// PUT /api/v1/workspaces/{id}
pub async fn update_workspace(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateWorkspaceRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let workspace = owned_workspace(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;

    let visibility = data.visibility.as_ref().map(Visibility::to_string);
    let updated = state
        .workspace_repo
        .update(
            workspace.id,
            data.name.as_deref(),
            data.description.as_deref(),
            visibility.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Workspace updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/workspaces/{id}
pub async fn delete_workspace(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let workspace = owned_workspace(&state, path.into_inner(), user_id).await?;

    state.workspace_repo.delete(workspace.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Workspace deleted successfully")))
}
