// src/models/bookings.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validators::validate_non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Aceita o valor textual vindo da API ("pending", "approved", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HouseBooking {
    pub id: Uuid,
    pub house_id: Uuid,
    pub tenant_id: Uuid,
    pub deposit_amount: Decimal,
    pub rent_amount_paid: Decimal,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub move_in_date: Option<NaiveDate>,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub house_id: Uuid,
    // Ausente: usa o cadastro de inquilino do próprio usuário
    pub tenant_id: Option<Uuid>,
    #[validate(custom(function = validate_non_negative))]
    pub deposit_amount: Decimal,
    #[validate(custom(function = validate_non_negative))]
    pub rent_amount_paid: Decimal,
    pub move_in_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingPayload {
    #[validate(custom(function = validate_non_negative))]
    pub deposit_amount: Option<Decimal>,
    #[validate(custom(function = validate_non_negative))]
    pub rent_amount_paid: Option<Decimal>,
    pub move_in_date: Option<NaiveDate>,
}

// O status chega como texto para devolvermos 400 (e não 422)
// quando o valor não é um dos estados conhecidos.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusPayload {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_statuses() {
        assert_eq!(BookingStatus::parse("pending"), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::parse("approved"), Some(BookingStatus::Approved));
        assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Cancelled));
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(BookingStatus::parse("APPROVED"), None);
        assert_eq!(BookingStatus::parse("reserved"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }
}
