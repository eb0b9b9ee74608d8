// src/models/properties.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::{validate_non_negative, validate_percentage};

// ---
// 1. Tipos de prédio e de casa (catálogo)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HouseType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date_added: DateTime<Utc>,
}

// O mesmo formulário serve para os dois catálogos
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTypePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTypePayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,
    pub description: Option<String>,
}

// ---
// 2. Apartment (O "Prédio")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: Uuid,
    pub name: String,
    pub apartment_type_id: Uuid,
    pub location: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub management_fee_percentage: Decimal,
    // Derivado: recontado a cada criação/remoção de casa
    pub total_houses: i32,
    pub image: Option<String>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApartmentPayload {
    #[validate(length(min = 1, message = "O nome do prédio é obrigatório."))]
    pub name: String,
    pub apartment_type_id: Uuid,
    #[validate(length(min = 1, message = "A localização é obrigatória."))]
    pub location: String,
    pub description: Option<String>,
    // Landlord cria para si mesmo; admin precisa informar o dono
    pub owner_id: Option<Uuid>,
    #[validate(custom(function = validate_percentage))]
    pub management_fee_percentage: Decimal,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApartmentPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,
    pub apartment_type_id: Option<Uuid>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = validate_percentage))]
    pub management_fee_percentage: Option<Decimal>,
    pub image: Option<String>,
}

// ---
// 3. House (A unidade alugável)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "house_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HouseStatus {
    Vacant,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: Uuid,
    pub apartment_id: Uuid,
    pub number: String,
    pub monthly_rent: Decimal,
    pub deposit_amount: Option<Decimal>,
    pub house_type_id: Uuid,
    pub description: Option<String>,
    pub status: HouseStatus,
    pub tenant_id: Option<Uuid>,
    pub image: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl House {
    /// Status derivado da presença de inquilino: com inquilino é 'occupied';
    /// sem inquilino volta a 'vacant', exceto quando está em manutenção.
    pub fn derived_status(tenant_id: Option<Uuid>, current: HouseStatus) -> HouseStatus {
        match (tenant_id, current) {
            (Some(_), _) => HouseStatus::Occupied,
            (None, HouseStatus::Maintenance) => HouseStatus::Maintenance,
            (None, _) => HouseStatus::Vacant,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHousePayload {
    pub apartment_id: Uuid,
    #[validate(length(min = 1, message = "O número da casa é obrigatório."))]
    pub number: String,
    #[validate(custom(function = validate_non_negative))]
    pub monthly_rent: Decimal,
    #[validate(custom(function = validate_non_negative))]
    pub deposit_amount: Option<Decimal>,
    pub house_type_id: Uuid,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHousePayload {
    // Mudar de prédio reconta as casas dos dois lados
    pub apartment_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O número não pode ficar vazio."))]
    pub number: Option<String>,
    #[validate(custom(function = validate_non_negative))]
    pub monthly_rent: Option<Decimal>,
    #[validate(custom(function = validate_non_negative))]
    pub deposit_amount: Option<Decimal>,
    pub house_type_id: Option<Uuid>,
    pub description: Option<String>,
    // Só aceita alternar entre 'vacant' e 'maintenance';
    // 'occupied' é sempre derivado do inquilino
    pub status: Option<HouseStatus>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTenantPayload {
    pub tenant_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_with_tenant_is_occupied() {
        let id = Uuid::new_v4();
        assert_eq!(
            House::derived_status(Some(id), HouseStatus::Vacant),
            HouseStatus::Occupied
        );
        assert_eq!(
            House::derived_status(Some(id), HouseStatus::Maintenance),
            HouseStatus::Occupied
        );
    }

    #[test]
    fn house_without_tenant_goes_vacant_unless_maintenance() {
        assert_eq!(
            House::derived_status(None, HouseStatus::Occupied),
            HouseStatus::Vacant
        );
        assert_eq!(
            House::derived_status(None, HouseStatus::Maintenance),
            HouseStatus::Maintenance
        );
    }
}
