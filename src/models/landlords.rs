// src/models/landlords.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::PHONE_REGEX;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Landlord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub other_names: Option<String>,
    // CPF, bilhete de identidade ou passaporte
    pub id_number: String,
    pub email: String,
    pub phone_number: String,
    pub physical_address: String,
    // Área de atuação ("Area of Business")
    pub aob: Option<String>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLandlordPayload {
    // Admin pode vincular o cadastro a um usuário existente
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O primeiro nome é obrigatório."))]
    pub first_name: String,
    pub middle_name: Option<String>,
    pub other_names: Option<String>,
    #[validate(length(min = 1, message = "O número do documento é obrigatório."))]
    pub id_number: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "O telefone deve estar no formato '+999999999', com até 15 dígitos."
    ))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "O endereço físico é obrigatório."))]
    pub physical_address: String,
    pub aob: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLandlordPayload {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub other_names: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "O telefone deve estar no formato '+999999999', com até 15 dígitos."
    ))]
    pub phone_number: Option<String>,
    pub physical_address: Option<String>,
    pub aob: Option<String>,
}
