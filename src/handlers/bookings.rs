// src/handlers/bookings.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::roles::{LandlordOrAdmin, RequireRole, TenantOrAdmin},
    models::{
        auth::CurrentUser,
        bookings::{
            CreateBookingPayload, HouseBooking, UpdateBookingPayload, UpdateBookingStatusPayload,
        },
    },
};

pub async fn create_booking(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<TenantOrAdmin>,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let booking = app_state.booking_service.create(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn list_bookings(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<HouseBooking>>, AppError> {
    Ok(Json(app_state.booking_service.list(&user).await?))
}

pub async fn get_booking(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HouseBooking>, AppError> {
    Ok(Json(app_state.booking_service.get(&user, id).await?))
}

pub async fn update_booking(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingPayload>,
) -> Result<Json<HouseBooking>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state.booking_service.update(&user, id, &payload).await?,
    ))
}

// PATCH /api/bookings/{id}/status
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusPayload>,
) -> Result<Json<HouseBooking>, AppError> {
    Ok(Json(
        app_state
            .booking_service
            .update_status(&user, id, &payload.status)
            .await?,
    ))
}

pub async fn delete_booking(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.booking_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
