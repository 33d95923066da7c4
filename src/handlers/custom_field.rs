use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateCustomFieldRequest, FieldType, UpdateCustomFieldRequest};
use crate::utils::{validate_request, ResponseData};

use super::{get_user_id, owned_board, owned_field, AppState};

/// POST /api/v1/boards/{id}/custom-fields
pub async fn create_custom_field(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CreateCustomFieldRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;

    if data.field_type == FieldType::Dropdown && data.options.as_ref().map_or(true, |o| o.is_empty())
    {
        return Err(AppError::ValidationError(
            "Dropdown fields require options".to_string(),
        ));
    }

    let options = data.options.map(|o| serde_json::json!(o));
    let field = state
        .field_repo
        .create(board.id, &data.name, &data.field_type.to_string(), options)
        .await?;

    Ok(HttpResponse::Created().json(ResponseData::with_data(
        201,
        "Custom field created successfully",
        field,
    )))
}

/// GET /api/v1/boards/{id}/custom-fields
pub async fn get_board_custom_fields(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;

    let fields = state.field_repo.list_by_board(board.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Custom fields retrieved successfully",
        fields,
    )))
}

/// PUT /api/v1/custom-fields/{id}
pub async fn update_custom_field(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCustomFieldRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let field = owned_field(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;

    if field.field_type == FieldType::Dropdown.to_string()
        && data.options.as_ref().map_or(false, |o| o.is_empty())
    {
        return Err(AppError::ValidationError(
            "Dropdown fields require options".to_string(),
        ));
    }

    let options = data.options.map(|o| serde_json::json!(o));
    let updated = state
        .field_repo
        .update(field.id, data.name.as_deref(), options, data.position)
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Custom field updated successfully",
        updated,
    )))
}

/// DELETE /api/v1/custom-fields/{id}
pub async fn delete_custom_field(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let field = owned_field(&state, path.into_inner(), user_id).await?;

    state.field_repo.delete(field.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Custom field deleted successfully")))
}
