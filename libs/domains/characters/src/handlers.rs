use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ObjectIdPath,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CharacterResult;
use crate::models::{CharacterResponse, NewCharacter, NicknameQuery, PageParams};
use crate::repository::CharacterRepository;
use crate::schema::CharacterDraft;
use crate::service::CharacterService;

pub const CREATED: &str = "Character created successfully";
pub const UPDATED: &str = "Character updated successfully";
pub const DELETED: &str = "Character deleted successfully";

/// OpenAPI documentation for the Characters API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_by_nickname,
        create_character,
        update_by_nickname,
        delete_by_nickname,
        list_characters,
        list_paginated,
        get_character,
        update_character,
        delete_character,
    ),
    components(
        schemas(CharacterResponse, NewCharacter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Characters", description = "Marvel character management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the characters router with all HTTP endpoints
pub fn router<R: CharacterRepository + 'static>(service: CharacterService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(get_by_nickname)
                .post(create_character)
                .put(update_by_nickname)
                .delete(delete_by_nickname),
        )
        .route("/list", get(list_characters))
        .route("/paginated", get(list_paginated))
        .route(
            "/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
        .with_state(shared_service)
}

/// Find a character by nickname (case-insensitive, exact)
#[utoipa::path(
    get,
    path = "",
    tag = "Characters",
    params(NicknameQuery),
    responses(
        (status = 200, description = "Character found", body = CharacterResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_nickname<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    Query(query): Query<NicknameQuery>,
) -> CharacterResult<Json<CharacterResponse>> {
    let character = service.get_by_nickname(query.nickname.as_deref()).await?;
    Ok(Json(character.into()))
}

/// Create a new character
#[utoipa::path(
    post,
    path = "",
    tag = "Characters",
    request_body = NewCharacter,
    responses(
        (status = 201, description = "Character created", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_character<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    body: Result<Json<CharacterDraft>, JsonRejection>,
) -> CharacterResult<impl IntoResponse> {
    let Json(draft) = body?;
    let input = NewCharacter::try_from(draft)?;
    service.create_character(input).await?;
    Ok((StatusCode::CREATED, CREATED))
}

/// Merge fields into the character matching a nickname
#[utoipa::path(
    put,
    path = "",
    tag = "Characters",
    params(NicknameQuery),
    request_body(content = Object, description = "Fields to set"),
    responses(
        (status = 200, description = "Character updated", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_by_nickname<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    Query(query): Query<NicknameQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> CharacterResult<&'static str> {
    let Json(patch) = body?;
    service
        .update_by_nickname(query.nickname.as_deref(), patch)
        .await?;
    Ok(UPDATED)
}

/// Delete the character matching a nickname
#[utoipa::path(
    delete,
    path = "",
    tag = "Characters",
    params(NicknameQuery),
    responses(
        (status = 200, description = "Character deleted", body = String, content_type = "text/plain"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_by_nickname<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    Query(query): Query<NicknameQuery>,
) -> CharacterResult<&'static str> {
    service.delete_by_nickname(query.nickname.as_deref()).await?;
    Ok(DELETED)
}

/// List every character
#[utoipa::path(
    get,
    path = "/list",
    tag = "Characters",
    responses(
        (status = 200, description = "All characters", body = Vec<CharacterResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_characters<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
) -> CharacterResult<Json<Vec<CharacterResponse>>> {
    let characters = service.list_characters().await?;
    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

/// List one page of characters
///
/// Paging metadata is returned in the `X-Page`, `X-Page-Size`,
/// `X-Total-Pages` and `X-Total-Results` headers.
#[utoipa::path(
    get,
    path = "/paginated",
    tag = "Characters",
    params(PageParams),
    responses(
        (status = 200, description = "Page of characters", body = Vec<CharacterResponse>,
            headers(
                ("X-Page" = u64, description = "Current page"),
                ("X-Page-Size" = u64, description = "Items per page"),
                ("X-Total-Pages" = u64, description = "Number of pages"),
                ("X-Total-Results" = u64, description = "Number of characters")
            )
        ),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_paginated<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    Query(params): Query<PageParams>,
) -> CharacterResult<impl IntoResponse> {
    let page = service.list_page(params).await?;

    let mut headers = HeaderMap::new();
    for (name, value) in [
        ("x-page", page.page),
        ("x-page-size", page.page_size),
        ("x-total-pages", page.total_pages),
        ("x-total-results", page.total_results),
    ] {
        headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
    }

    let items: Vec<CharacterResponse> = page.items.into_iter().map(Into::into).collect();
    Ok((headers, Json(items)))
}

/// Get a character by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Characters",
    params(
        ("id" = String, Path, description = "Character ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Character found", body = CharacterResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_character<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CharacterResult<Json<CharacterResponse>> {
    let character = service.get_character(id).await?;
    Ok(Json(character.into()))
}

/// Merge fields into a character
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Characters",
    params(
        ("id" = String, Path, description = "Character ObjectId (24 hex characters)")
    ),
    request_body(content = Object, description = "Fields to set"),
    responses(
        (status = 200, description = "Character updated", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_character<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    body: Result<Json<Value>, JsonRejection>,
) -> CharacterResult<&'static str> {
    let Json(patch) = body?;
    service.update_character(id, patch).await?;
    Ok(UPDATED)
}

/// Delete a character
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Characters",
    params(
        ("id" = String, Path, description = "Character ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Character deleted", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_character<R: CharacterRepository>(
    State(service): State<Arc<CharacterService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CharacterResult<&'static str> {
    service.delete_character(id).await?;
    Ok(DELETED)
}
