// src/handlers/landlords.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::roles::{LandlordOrAdmin, RequireRole},
    models::{
        auth::CurrentUser,
        landlords::{CreateLandlordPayload, Landlord, UpdateLandlordPayload},
    },
};

// ?search= sobre nomes, e-mail e telefone
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

pub async fn create_landlord(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Json(payload): Json<CreateLandlordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let landlord = app_state.landlord_service.create(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(landlord)))
}

pub async fn list_landlords(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Landlord>>, AppError> {
    Ok(Json(
        app_state
            .landlord_service
            .list(&user, params.search.as_deref())
            .await?,
    ))
}

// GET /api/landlords/my-landlord-profile
pub async fn my_landlord_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Landlord>, AppError> {
    Ok(Json(app_state.landlord_service.my_landlord_profile(&user).await?))
}

pub async fn get_landlord(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Landlord>, AppError> {
    Ok(Json(app_state.landlord_service.get(&user, id).await?))
}

pub async fn update_landlord(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLandlordPayload>,
) -> Result<Json<Landlord>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state.landlord_service.update(&user, id, &payload).await?,
    ))
}

pub async fn delete_landlord(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.landlord_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
