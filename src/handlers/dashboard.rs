// src/handlers/dashboard.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::CurrentUser, dashboard::DashboardStats},
};

// GET /api/dashboard/stats
pub async fn dashboard_stats(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(app_state.dashboard_service.stats(&user).await?))
}
