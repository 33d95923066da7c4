use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    CardSearchQuery, CreateCardRequest, MoveCardRequest, PaginationQuery, SetFieldValueRequest,
    UpdateCardRequest,
};
use crate::utils::{validate_request, Paginate, ResponseData};

use super::{
    check_hex_color, get_user_id, owned_board, owned_card, owned_field, owned_label, owned_list,
    AppState,
};

/// POST /api/v1/lists/{id}/cards
pub async fn create_card(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CreateCardRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let list = owned_list(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;
    check_hex_color(data.cover_color.as_deref(), "cover_color")?;

    let card = state.card_service.create_card(&list, data, user_id).await?;

    Ok(HttpResponse::Created().json(ResponseData::with_data(
        201,
        "Card created successfully",
        card,
    )))
}

/// GET /api/v1/lists/{id}/cards
pub async fn get_list_cards(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let list = owned_list(&state, path.into_inner(), user_id).await?;

    let total = state.card_repo.count_by_list(list.id).await?;
    let paginate = Paginate::new(query.limit, query.page, total);
    let cards = state
        .card_repo
        .list_by_list(list.id, paginate.limit, paginate.offset)
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_pagination(
        200,
        "Cards retrieved successfully",
        cards,
        paginate,
    )))
}

/// GET /api/v1/boards/{id}/cards
pub async fn search_cards(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<CardSearchQuery>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let board = owned_board(&state, path.into_inner(), user_id).await?;

    // One filter drives both the count and the page fetch
    let filter = query.filter();
    let total = state.card_repo.count_search(board.id, &filter).await?;
    let paginate = Paginate::new(query.limit, query.page, total);
    let cards = state
        .card_repo
        .search(board.id, &filter, paginate.limit, paginate.offset)
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_pagination(
        200,
        "Cards retrieved successfully",
        cards,
        paginate,
    )))
}

/// GET /api/v1/cards/{id}
pub async fn get_card(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let card = owned_card(&state, path.into_inner(), user_id).await?;
    let card = state.card_service.card_detail(card).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Card retrieved successfully",
        card,
    )))
}

/// PUT /api/v1/cards/{id}
pub async fn update_card(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCardRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let card = owned_card(&state, path.into_inner(), user_id).await?;
    let data = body.into_inner();
    validate_request(&data)?;
    check_hex_color(data.cover_color.as_deref(), "cover_color")?;

    let updated = state.card_service.update_card(&card, data).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Card updated successfully",
        updated,
    )))
}

/// POST /api/v1/cards/{id}/move
pub async fn move_card(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<MoveCardRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let card = owned_card(&state, path.into_inner(), user_id).await?;

    let moved = state.card_service.move_card(&card, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Card moved successfully",
        moved,
    )))
}

/// DELETE /api/v1/cards/{id}
pub async fn delete_card(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let card = owned_card(&state, path.into_inner(), user_id).await?;

    state.card_repo.delete(card.id).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Card deleted successfully")))
}

/// POST /api/v1/cards/{id}/labels/{label_id}
pub async fn attach_label(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let (card_id, label_id) = path.into_inner();
    let card = owned_card(&state, card_id, user_id).await?;
    let label = owned_label(&state, label_id, user_id).await?;

    state.card_service.attach_label(&card, &label).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Label attached successfully")))
}

/// DELETE /api/v1/cards/{id}/labels/{label_id}
pub async fn detach_label(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let (card_id, label_id) = path.into_inner();
    let card = owned_card(&state, card_id, user_id).await?;
    let label = owned_label(&state, label_id, user_id).await?;

    state.card_service.detach_label(&card, &label).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Label detached successfully")))
}

/// PUT /api/v1/cards/{id}/custom-fields/{field_id}
pub async fn set_field_value(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<SetFieldValueRequest>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let (card_id, field_id) = path.into_inner();
    let card = owned_card(&state, card_id, user_id).await?;
    let field = owned_field(&state, field_id, user_id).await?;

    let value = state
        .card_service
        .set_field_value(&card, &field, &body.value)
        .await?;

    Ok(HttpResponse::Ok().json(ResponseData::with_data(
        200,
        "Field value set successfully",
        value,
    )))
}

/// DELETE /api/v1/cards/{id}/custom-fields/{field_id}
pub async fn clear_field_value(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    let (card_id, field_id) = path.into_inner();
    let card = owned_card(&state, card_id, user_id).await?;
    let field = owned_field(&state, field_id, user_id).await?;

    state.card_service.clear_field_value(&card, &field).await?;

    Ok(HttpResponse::Ok().json(ResponseData::message(200, "Field value cleared successfully")))
}
