// src/handlers/billing.rs

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
        billing::{
            CreateInvoicePayload, CreatePaymentPayload, Invoice, Payment, UpdateInvoicePayload,
            UpdatePaymentPayload,
        },
    },
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

// ---
// Invoices
// ---

pub async fn create_invoice(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let invoice = app_state.billing_service.create_invoice(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn list_invoices(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    Ok(Json(
        app_state
            .billing_service
            .list_invoices(&user, params.search.as_deref(), false)
            .await?,
    ))
}

// GET /api/invoices/my-invoices
pub async fn my_invoices(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Invoice>>, AppError> {
    Ok(Json(app_state.billing_service.my_invoices(&user).await?))
}

// GET /api/invoices/unpaid: faturas em aberto (unpaid/overdue) do recorte do usuário
pub async fn unpaid_invoices(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Invoice>>, AppError> {
    Ok(Json(
        app_state.billing_service.list_invoices(&user, None, true).await?,
    ))
}

pub async fn get_invoice(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(app_state.billing_service.get_invoice(&user, id).await?))
}

pub async fn update_invoice(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvoicePayload>,
) -> Result<Json<Invoice>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state
            .billing_service
            .update_invoice(&user, id, &payload)
            .await?,
    ))
}

pub async fn delete_invoice(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.billing_service.delete_invoice(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payments
// ---

// Inquilino registra pagamento da própria fatura; admin e proprietário
// registram recebimentos manuais
pub async fn create_payment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let payment = app_state.billing_service.create_payment(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_payments(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Payment>>, AppError> {
    Ok(Json(app_state.billing_service.list_payments(&user).await?))
}

// GET /api/payments/my-payments
pub async fn my_payments(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Payment>>, AppError> {
    Ok(Json(app_state.billing_service.my_payments(&user).await?))
}

pub async fn get_payment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(app_state.billing_service.get_payment(&user, id).await?))
}

pub async fn update_payment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentPayload>,
) -> Result<Json<Payment>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state
            .billing_service
            .update_payment(&user, id, &payload)
            .await?,
    ))
}

pub async fn delete_payment(
    State(app_state): State<AppState>,
    user: CurrentUser,
    _gate: RequireRole<LandlordOrAdmin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.billing_service.delete_payment(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
