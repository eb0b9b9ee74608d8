// src/handlers/properties.rs

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
        properties::{
            Apartment, ApartmentType, CreateApartmentPayload, CreateTypePayload, House,
            HouseType, UpdateApartmentPayload, UpdateTypePayload,
        },
    },
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

// ---
// Apartment types
// ---

pub async fn create_apartment_type(
    State(app_state): State<AppState>,
    _gate: RequireRole<LandlordOrAdmin>,
    Json(payload): Json<CreateTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let kind = app_state.property_service.create_apartment_type(&payload).await?;
    Ok((StatusCode::CREATED, Json(kind)))
}

pub async fn list_apartment_types(
    State(app_state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<ApartmentType>>, AppError> {
    Ok(Json(app_state.property_service.list_apartment_types().await?))
}

pub async fn get_apartment_type(
    State(app_state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApartmentType>, AppError> {
    Ok(Json(app_state.property_service.get_apartment_type(id).await?))
}

pub async fn update_apartment_type(
    State(app_state): State<AppState>,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTypePayload>,
) -> Result<Json<ApartmentType>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state
            .property_service
            .update_apartment_type(id, &payload)
            .await?,
    ))
}

pub async fn delete_apartment_type(
    State(app_state): State<AppState>,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.delete_apartment_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// House types
// ---

pub async fn create_house_type(
    State(app_state): State<AppState>,
    _gate: RequireRole<LandlordOrAdmin>,
    Json(payload): Json<CreateTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let kind = app_state.property_service.create_house_type(&payload).await?;
    Ok((StatusCode::CREATED, Json(kind)))
}

pub async fn list_house_types(
    State(app_state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<HouseType>>, AppError> {
    Ok(Json(app_state.property_service.list_house_types().await?))
}

pub async fn get_house_type(
    State(app_state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HouseType>, AppError> {
    Ok(Json(app_state.property_service.get_house_type(id).await?))
}

pub async fn update_house_type(
    State(app_state): State<AppState>,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTypePayload>,
) -> Result<Json<HouseType>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state.property_service.update_house_type(id, &payload).await?,
    ))
}

pub async fn delete_house_type(
    State(app_state): State<AppState>,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.delete_house_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Apartments
// ---

pub async fn create_apartment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Json(payload): Json<CreateApartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let apartment = app_state
        .property_service
        .create_apartment(&user, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(apartment)))
}

pub async fn list_apartments(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Apartment>>, AppError> {
    Ok(Json(
        app_state
            .property_service
            .list_apartments(&user, params.search.as_deref())
            .await?,
    ))
}

pub async fn get_apartment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Apartment>, AppError> {
    Ok(Json(app_state.property_service.get_apartment(&user, id).await?))
}

// GET /api/apartments/{id}/houses
pub async fn houses_of_apartment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<House>>, AppError> {
    Ok(Json(
        app_state.property_service.houses_of_apartment(&user, id).await?,
    ))
}

pub async fn update_apartment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApartmentPayload>,
) -> Result<Json<Apartment>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state
            .property_service
            .update_apartment(&user, id, &payload)
            .await?,
    ))
}

pub async fn delete_apartment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.delete_apartment(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
