// src/handlers/tenants.rs

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
    middleware::roles::{RequireRole, TenantOrAdmin},
    models::{
        auth::CurrentUser,
        tenants::{CreateTenantPayload, Tenant, UpdateTenantPayload},
    },
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

// Qualquer usuário autenticado pode abrir o próprio cadastro de inquilino
pub async fn create_tenant(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let tenant = app_state.tenant_service.create(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

pub async fn list_tenants(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Tenant>>, AppError> {
    Ok(Json(
        app_state
            .tenant_service
            .list(&user, params.search.as_deref())
            .await?,
    ))
}

// GET /api/tenants/my-tenant-profile
pub async fn my_tenant_profile(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Tenant>, AppError> {
    Ok(Json(app_state.tenant_service.my_tenant_profile(&user).await?))
}

pub async fn get_tenant(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Tenant>, AppError> {
    Ok(Json(app_state.tenant_service.get(&user, id).await?))
}

pub async fn update_tenant(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<TenantOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTenantPayload>,
) -> Result<Json<Tenant>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state.tenant_service.update(&user, id, &payload).await?,
    ))
}

pub async fn delete_tenant(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<TenantOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tenant_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
