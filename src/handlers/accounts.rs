// src/handlers/accounts.rs

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
    middleware::roles::{AdminOnly, RequireRole},
    models::{
        accounts::{Profile, Role, UpdateProfilePayload, UpdateRolePayload},
        auth::{CurrentUser, UpdateUserPayload, User},
    },
};

// ---
// Users
// ---

pub async fn list_users(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(app_state.account_service.list_users(&user).await?))
}

pub async fn get_user(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(app_state.account_service.get_user(&user, id).await?))
}

pub async fn update_user(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state.account_service.update_user(&user, id, &payload).await?,
    ))
}

pub async fn delete_user(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.account_service.delete_user(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Profiles
// ---

pub async fn list_profiles(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(app_state.account_service.list_profiles(&user).await?))
}

pub async fn create_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let profile = app_state.account_service.create_profile(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

// GET /api/profiles/my-profile
pub async fn my_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(app_state.account_service.my_profile(&user).await?))
}

// PUT /api/profiles/my-profile
pub async fn update_my_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<Profile>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state.account_service.update_my_profile(&user, &payload).await?,
    ))
}

pub async fn get_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(app_state.account_service.get_profile(&user, id).await?))
}

pub async fn update_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<Profile>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state
            .account_service
            .update_profile(&user, id, &payload)
            .await?,
    ))
}

pub async fn delete_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.account_service.delete_profile(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Roles
// ---

pub async fn list_roles(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(app_state.account_service.list_roles(&user).await?))
}

// GET /api/roles/my-role
pub async fn my_role(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Role>, AppError> {
    Ok(Json(app_state.account_service.my_role(&user).await?))
}

pub async fn get_role(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(app_state.account_service.get_role(&user, id).await?))
}

// Só admins mexem em papéis
pub async fn update_role(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(
        app_state.account_service.update_role(&user, id, &payload).await?,
    ))
}
