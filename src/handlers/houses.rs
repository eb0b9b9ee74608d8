// src/handlers/houses.rs

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
        properties::{AssignTenantPayload, CreateHousePayload, House, UpdateHousePayload},
    },
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

pub async fn create_house(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Json(payload): Json<CreateHousePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let house = app_state.property_service.create_house(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(house)))
}

pub async fn list_houses(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<House>>, AppError> {
    Ok(Json(
        app_state
            .property_service
            .list_houses(&user, params.search.as_deref())
            .await?,
    ))
}

// GET /api/houses/vacant
pub async fn list_vacant_houses(
    State(app_state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<House>>, AppError> {
    Ok(Json(app_state.property_service.list_vacant_houses().await?))
}

pub async fn get_house(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<House>, AppError> {
    Ok(Json(app_state.property_service.get_house(&user, id).await?))
}

pub async fn update_house(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHousePayload>,
) -> Result<Json<House>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state.property_service.update_house(&user, id, &payload).await?,
    ))
}

pub async fn delete_house(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.delete_house(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/houses/{id}/assign-tenant
pub async fn assign_tenant(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignTenantPayload>,
) -> Result<Json<House>, AppError> {
    Ok(Json(
        app_state
            .property_service
            .assign_tenant(&user, id, payload.tenant_id)
            .await?,
    ))
}

// POST /api/houses/{id}/vacate
pub async fn vacate_house(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<House>, AppError> {
    Ok(Json(app_state.property_service.vacate_house(&user, id).await?))
}
