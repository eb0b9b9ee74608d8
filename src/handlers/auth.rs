// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{
        AuthResponse, Claims, CurrentUser, LoginResponse, LoginUserPayload, LogoutResponse,
        RegisterUserPayload, User,
    },
};

// Handler de registro
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (token, user) = app_state.auth_service.register_user(&payload).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

// Handler de login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;

    Ok(Json(response))
}

// Handler de logout: revoga o token apresentado
pub async fn logout(
    State(app_state): State<AppState>,
    claims: Claims,
) -> Result<Json<LogoutResponse>, AppError> {
    app_state.auth_service.logout(&claims).await?;

    Ok(Json(LogoutResponse {
        message: "Sessão encerrada com sucesso.".into(),
    }))
}

// Handler da rota protegida /me
pub async fn get_me(user: CurrentUser) -> Json<User> {
    Json(user.user)
}
