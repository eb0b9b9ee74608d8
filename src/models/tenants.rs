// src/models/tenants.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::PHONE_REGEX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tenant_occupation", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TenantOccupation {
    Employed,
    SelfEmployed,
    Student,
    Retired,
    Unemployed,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id_number_or_passport: Option<String>,
    pub email: Option<String>,
    pub phone_number: String,
    pub physical_address: String,
    pub occupation: Option<TenantOccupation>,
    pub workplace: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantPayload {
    // Quando aponta para o próprio usuário, o papel dele vira 'tenant'.
    // Vincular a outro usuário é privilégio de admin.
    pub user_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id_number_or_passport: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "O telefone deve estar no formato '+999999999', com até 15 dígitos."
    ))]
    pub phone_number: String,
    pub physical_address: Option<String>,
    pub occupation: Option<TenantOccupation>,
    pub workplace: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "O telefone de emergência deve estar no formato '+999999999'."
    ))]
    pub emergency_contact_phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id_number_or_passport: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "O telefone deve estar no formato '+999999999', com até 15 dígitos."
    ))]
    pub phone_number: Option<String>,
    pub physical_address: Option<String>,
    pub occupation: Option<TenantOccupation>,
    pub workplace: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "O telefone de emergência deve estar no formato '+999999999'."
    ))]
    pub emergency_contact_phone: Option<String>,
}
