// src/models/accounts.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::PHONE_REGEX;

// ---
// 1. Role (O "Papel" do usuário no sistema)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Admin,
    Landlord,
    Tenant,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role_type: RoleType,
    pub date_assigned: DateTime<Utc>,
}

// Apenas admins alteram papéis
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    pub role_type: RoleType,
}

// ---
// 2. Profile (Dados complementares do usuário)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "education_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Bachelor,
    Master,
    Phd,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub picture: Option<String>,
    pub phone: Option<String>,
    pub studied_at: Option<String>,
    pub county: Option<String>,
    pub location: Option<String>,
    pub my_profile: Option<String>,
    pub occupation: Option<String>,
    pub education: Option<EducationLevel>,
    pub skills: Option<String>,
    pub country: Option<String>,
}

// Todos os campos são opcionais: o perfil nasce vazio no registro
// e vai sendo preenchido aos poucos.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    pub picture: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        message = "O telefone deve estar no formato '+999999999', com até 15 dígitos."
    ))]
    pub phone: Option<String>,
    pub studied_at: Option<String>,
    pub county: Option<String>,
    pub location: Option<String>,
    pub my_profile: Option<String>,
    pub occupation: Option<String>,
    pub education: Option<EducationLevel>,
    pub skills: Option<String>,
    pub country: Option<String>,
}
